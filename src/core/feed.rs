use crate::core::date::parse_date;
use crate::core::grouping::{has_price, CategoryGrouper};
use crate::core::note::{long_note, meal_name};
use crate::core::price::{complete_prices, normalize_price, parse_amount, parse_labeled_price};
use crate::core::text::normalize;
use crate::core::writer::FeedWriter;
use crate::domain::model::{Day, Meal, Price, Role, RowFragments};
use crate::domain::ports::{DocumentTree, PricePolicy, PriceStyle, SourceProfile};
use crate::utils::error::{MensaError, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub days: usize,
    pub closed_days: usize,
    pub categories: usize,
    pub meals: usize,
}

impl FeedStats {
    fn record(&mut self, day: &Day) {
        self.days += 1;
        if day.is_closed() {
            self.closed_days += 1;
        }
        self.categories += day.categories.len();
        self.meals += day.meal_count();
    }
}

/// Drives a [`SourceProfile`] over a document and turns what it locates
/// into days, categories and meals.
pub struct FeedGenerator<'a, P: SourceProfile> {
    profile: &'a P,
    reference_year: i32,
}

impl<'a, P: SourceProfile> FeedGenerator<'a, P> {
    pub fn new(profile: &'a P, reference_year: i32) -> Self {
        Self {
            profile,
            reference_year,
        }
    }

    /// Writes the whole feed. Days are flushed as they complete, so a fatal
    /// error leaves the days before it in the output.
    pub fn generate<T: DocumentTree, W: Write>(
        &self,
        tree: &T,
        mut writer: FeedWriter<W>,
    ) -> Result<FeedStats> {
        let mut stats = FeedStats::default();
        writer.begin()?;
        for node in self.profile.locate_days(tree)? {
            let day = self.build_day(tree, node)?;
            writer.write_day(&day)?;
            stats.record(&day);
        }
        writer.finish()?;
        Ok(stats)
    }

    pub fn days<T: DocumentTree>(&self, tree: &T) -> Result<Vec<Day>> {
        self.profile
            .locate_days(tree)?
            .into_iter()
            .map(|node| self.build_day(tree, node))
            .collect()
    }

    pub fn build_day<T: DocumentTree>(&self, tree: &T, node: T::Node) -> Result<Day> {
        let heading = self.profile.day_heading(tree, node)?;
        let date = parse_date(&heading, self.reference_year)?;

        let mut grouper = CategoryGrouper::new();
        let mut dropped = 0;
        for row in self.profile.locate_rows(tree, node)? {
            let fragments = self.profile.read_row(tree, row)?;
            let category = fragments
                .category
                .as_deref()
                .map(normalize)
                .filter(|c| !c.is_empty());
            match self.build_meal(&fragments)? {
                Some(meal) => grouper.push(category, meal),
                None => dropped += 1,
            }
        }

        let categories = grouper.finish();
        tracing::debug!(
            "{}: {} categories, {} rows dropped",
            date,
            categories.len(),
            dropped
        );
        Ok(Day { date, categories })
    }

    /// `None` when the row carries no offering.
    pub fn build_meal(&self, row: &RowFragments) -> Result<Option<Meal>> {
        let rules = self.profile.rules();
        if rules.skip_unpriced && !has_price(&row.prices) {
            return Ok(None);
        }
        let Some(name) = meal_name(&row.name) else {
            tracing::debug!("skipping row without a meal name");
            return Ok(None);
        };

        let mut notes = Vec::new();
        if let Some(note) = row.note.as_deref().map(normalize).filter(|n| !n.is_empty()) {
            notes.push(note);
        }
        notes.extend(
            row.tags
                .iter()
                .map(|t| normalize(t))
                .filter(|t| !t.is_empty()),
        );
        if rules.long_note {
            notes.extend(long_note(&row.name));
        }

        let prices = self.prices(&row.prices)?;
        Ok(Some(Meal {
            name,
            notes,
            prices,
        }))
    }

    fn prices(&self, fragments: &[String]) -> Result<Vec<Price>> {
        let rules = self.profile.rules();
        let lines: Vec<String> = fragments
            .iter()
            .map(|f| normalize(f))
            .filter(|f| !f.is_empty())
            .collect();

        let parsed: Result<Vec<Price>> = match rules.price_style {
            PriceStyle::Labeled if lines.is_empty() => Err(MensaError::format("price", "")),
            PriceStyle::Labeled => lines.iter().map(|l| parse_labeled_price(l)).collect(),
            PriceStyle::StudentBase => {
                let first = lines.first().map(String::as_str).unwrap_or_default();
                normalize_price(first)
                    .and_then(|s| parse_amount(&s))
                    .map(|amount| {
                        vec![Price {
                            role: Role::Student,
                            amount,
                        }]
                    })
            }
        };

        match (parsed.and_then(complete_prices), rules.price_policy) {
            (Ok(prices), _) => Ok(prices),
            (Err(e), PricePolicy::Optional) => {
                tracing::debug!("meal without price: {}", e);
                Ok(Vec::new())
            }
            (Err(e), PricePolicy::Required) => Err(e),
        }
    }
}
