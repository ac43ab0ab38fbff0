//! Source profiles as data.
//!
//! Each markup layout is one [`QueryProfile`] value: the XPath queries that
//! locate its days, headings, rows and row fragments, plus the rules that
//! turn a row into a meal. The built-in layouts live in [`builtin`]; further
//! layouts can be described in TOML (see `config::profile_file`).

pub mod builtin;

use crate::domain::model::RowFragments;
use crate::domain::ports::{DocumentTree, PricePolicy, PriceStyle, RowRules, SourceProfile};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryProfile {
    pub name: String,
    /// Node set of day containers, from the document root.
    pub days: String,
    /// String query for the day heading, from a day container.
    pub heading: String,
    /// Node set of meal rows, from a day container.
    pub rows: String,
    /// String query for the category label; rows without one are numbered.
    #[serde(default)]
    pub category: Option<String>,
    /// Node set of the name column; the first non-empty node is the name.
    pub meal_name: String,
    /// String query for a single note.
    #[serde(default)]
    pub note: Option<String>,
    /// Node set, one note per non-empty node.
    #[serde(default)]
    pub tags: Option<String>,
    /// Node set of price lines.
    pub prices: String,
    #[serde(default)]
    pub long_note: bool,
    pub price_style: PriceStyle,
    pub price_policy: PricePolicy,
    #[serde(default)]
    pub skip_unpriced: bool,
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,
}

impl QueryProfile {
    fn strings<T: DocumentTree>(&self, tree: &T, from: T::Node, query: &str) -> Result<Vec<String>> {
        Ok(tree
            .select(from, query)?
            .into_iter()
            .map(|node| tree.text(node))
            .collect())
    }
}

impl SourceProfile for QueryProfile {
    fn name(&self) -> &str {
        &self.name
    }

    fn rules(&self) -> RowRules {
        RowRules {
            long_note: self.long_note,
            price_style: self.price_style,
            price_policy: self.price_policy,
            skip_unpriced: self.skip_unpriced,
        }
    }

    fn namespaces(&self) -> Vec<(String, String)> {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
            .collect()
    }

    fn locate_days<T: DocumentTree>(&self, tree: &T) -> Result<Vec<T::Node>> {
        tree.select(tree.root(), &self.days)
    }

    fn day_heading<T: DocumentTree>(&self, tree: &T, day: T::Node) -> Result<String> {
        tree.evaluate(day, &self.heading)
    }

    fn locate_rows<T: DocumentTree>(&self, tree: &T, day: T::Node) -> Result<Vec<T::Node>> {
        tree.select(day, &self.rows)
    }

    fn read_row<T: DocumentTree>(&self, tree: &T, row: T::Node) -> Result<RowFragments> {
        let category = match &self.category {
            Some(query) => Some(tree.evaluate(row, query)?),
            None => None,
        };
        let note = match &self.note {
            Some(query) => Some(tree.evaluate(row, query)?),
            None => None,
        };
        let tags = match &self.tags {
            Some(query) => self.strings(tree, row, query)?,
            None => Vec::new(),
        };

        Ok(RowFragments {
            category,
            name: self.strings(tree, row, &self.meal_name)?,
            note,
            tags,
            prices: self.strings(tree, row, &self.prices)?,
        })
    }
}

impl Validate for QueryProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile.name", &self.name)?;
        validate_non_empty_string("profile.days", &self.days)?;
        validate_non_empty_string("profile.heading", &self.heading)?;
        validate_non_empty_string("profile.rows", &self.rows)?;
        validate_non_empty_string("profile.meal_name", &self.meal_name)?;
        validate_non_empty_string("profile.prices", &self.prices)?;
        for (field, query) in [
            ("profile.category", &self.category),
            ("profile.note", &self.note),
            ("profile.tags", &self.tags),
        ] {
            if let Some(query) = query {
                validate_non_empty_string(field, query)?;
            }
        }
        for (prefix, uri) in &self.namespaces {
            validate_non_empty_string("profile.namespaces", prefix)?;
            validate_non_empty_string("profile.namespaces", uri)?;
        }
        Ok(())
    }
}
