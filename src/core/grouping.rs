use crate::core::text::normalize;
use crate::domain::model::{Category, Meal};

/// A row contributes an offering only if some price fragment has text.
pub fn has_price(price_fragments: &[String]) -> bool {
    price_fragments.iter().any(|f| !normalize(f).is_empty())
}

/// Folds consecutive meals with the same category name into one category.
/// Rows without a category label get `Essen N`, one category each.
#[derive(Debug, Default)]
pub struct CategoryGrouper {
    categories: Vec<Category>,
    unnamed: usize,
}

impl CategoryGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Option<String>, meal: Meal) {
        let name = match category {
            Some(name) => name,
            None => {
                self.unnamed += 1;
                self.categories.push(Category {
                    name: format!("Essen {}", self.unnamed),
                    meals: vec![meal],
                });
                return;
            }
        };

        match self.categories.last_mut() {
            Some(last) if last.name == name => last.meals.push(meal),
            _ => self.categories.push(Category {
                name,
                meals: vec![meal],
            }),
        }
    }

    pub fn finish(self) -> Vec<Category> {
        self.categories
    }
}
