use rust_decimal::Decimal;
use std::fmt;

/// Price audience tier. Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Student,
    Employee,
    Other,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Employee, Role::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Employee => "employee",
            Role::Other => "other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub role: Role,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Meal {
    pub name: String,
    pub notes: Vec<String>,
    /// At most one entry per role, sorted by role.
    pub prices: Vec<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    /// ISO `yyyy-mm-dd`.
    pub date: String,
    pub categories: Vec<Category>,
}

impl Day {
    pub fn is_closed(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn meal_count(&self) -> usize {
        self.categories.iter().map(|c| c.meals.len()).sum()
    }
}

/// Raw text located inside one source row, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFragments {
    pub category: Option<String>,
    pub name: Vec<String>,
    pub note: Option<String>,
    pub tags: Vec<String>,
    pub prices: Vec<String>,
}
