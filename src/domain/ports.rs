use crate::domain::model::RowFragments;
use crate::utils::error::Result;
use serde::Deserialize;

/// A parsed, read-only document that answers structural path queries.
pub trait DocumentTree {
    type Node: Copy;

    fn root(&self) -> Self::Node;

    /// Evaluates `query` from `from` and returns the matched nodes in
    /// document order. A query that yields a non-node value is an error.
    fn select(&self, from: Self::Node, query: &str) -> Result<Vec<Self::Node>>;

    /// Evaluates `query` from `from` and converts the result to a string.
    /// For a node set this is the string value of the first node.
    fn evaluate(&self, from: Self::Node, query: &str) -> Result<String>;

    /// String value of a single node.
    fn text(&self, node: Self::Node) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStyle {
    /// Every price line carries a role label ("Studierende: 2,30 €").
    Labeled,
    /// The first price line is the student price, the rest is derived.
    StudentBase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePolicy {
    /// A missing or malformed price aborts the run.
    Required,
    /// A missing or malformed price leaves the meal without prices.
    Optional,
}

/// How rows of one source are turned into meals once their text is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRules {
    pub long_note: bool,
    pub price_style: PriceStyle,
    pub price_policy: PricePolicy,
    pub skip_unpriced: bool,
}

/// Per-source strategy: where the day containers, headings, rows and row
/// fragments live in one markup layout.
pub trait SourceProfile {
    fn name(&self) -> &str;

    fn rules(&self) -> RowRules;

    /// Extra namespace prefixes the profile's queries rely on.
    fn namespaces(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn locate_days<T: DocumentTree>(&self, tree: &T) -> Result<Vec<T::Node>>;

    fn day_heading<T: DocumentTree>(&self, tree: &T, day: T::Node) -> Result<String>;

    fn locate_rows<T: DocumentTree>(&self, tree: &T, day: T::Node) -> Result<Vec<T::Node>>;

    fn read_row<T: DocumentTree>(&self, tree: &T, row: T::Node) -> Result<RowFragments>;
}
