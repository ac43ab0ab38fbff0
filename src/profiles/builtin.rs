use super::QueryProfile;
use crate::domain::ports::{PricePolicy, PriceStyle};
use clap::ValueEnum;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Bielefeld University (tidy -asxml output)
    Bielefeld,
    /// FH Rüsselsheim and other Studentenwerk Frankfurt pages (xmllint --html --xmlout)
    Ruesselsheim,
    /// Studentenwerk Frankfurt panel layout (XHTML)
    Frankfurt,
}

impl QueryProfile {
    pub fn builtin(source: Source) -> Self {
        match source {
            Source::Bielefeld => Self::bielefeld(),
            Source::Ruesselsheim => Self::ruesselsheim(),
            Source::Frankfurt => Self::frankfurt(),
        }
    }

    /// Grouped categories from the row header, role-labelled price lines.
    pub fn bielefeld() -> Self {
        Self {
            name: "bielefeld".to_string(),
            days: "//xhtml:div[@class='day-block']".to_string(),
            heading: "normalize-space(./xhtml:a[@class='day-information']/text())".to_string(),
            rows: "./xhtml:table/xhtml:tr".to_string(),
            category: Some("normalize-space(./xhtml:th/text())".to_string()),
            meal_name: "./xhtml:td[1]//text()".to_string(),
            note: Some("./xhtml:td[2]//xhtml:div/xhtml:img/@alt".to_string()),
            tags: None,
            prices: "./xhtml:td[3]/xhtml:p/text()".to_string(),
            long_note: true,
            price_style: PriceStyle::Labeled,
            price_policy: PricePolicy::Required,
            skip_unpriced: true,
            namespaces: BTreeMap::new(),
        }
    }

    /// One numbered category per row; prices are often published late.
    pub fn ruesselsheim() -> Self {
        Self {
            name: "ruesselsheim".to_string(),
            days: "//div[@class='panel panel-default']".to_string(),
            heading: "normalize-space(string(.//div[@class='panel-heading']))".to_string(),
            rows: ".//div[@class='panel-body']/*/tr".to_string(),
            category: None,
            meal_name: "./td[1]//strong".to_string(),
            note: Some("normalize-space(string(./td[1]//p))".to_string()),
            tags: Some(".//img[@title]/@title".to_string()),
            prices: "(./td[2]//p)[1]".to_string(),
            long_note: false,
            price_style: PriceStyle::StudentBase,
            price_policy: PricePolicy::Optional,
            skip_unpriced: false,
            namespaces: BTreeMap::new(),
        }
    }

    /// Like ruesselsheim, but XHTML and the price sits in a second `<strong>`.
    pub fn frankfurt() -> Self {
        Self {
            name: "frankfurt".to_string(),
            days: "//xhtml:div[@class='panel-heading']/..".to_string(),
            heading: "normalize-space(string(./xhtml:div[@class='panel-heading']/xhtml:strong))"
                .to_string(),
            rows: ".//xhtml:div[@class='panel-body']/xhtml:table/*/xhtml:tr".to_string(),
            category: None,
            meal_name: "(./xhtml:td//xhtml:strong)[1]".to_string(),
            note: Some("normalize-space(string((./xhtml:td//xhtml:p)[1]))".to_string()),
            tags: Some(".//xhtml:img[@title]/@title".to_string()),
            // the second <strong> holds the price once it is published
            prices: "(./xhtml:td//xhtml:strong)[2][contains(., '€')]".to_string(),
            long_note: false,
            price_style: PriceStyle::StudentBase,
            price_policy: PricePolicy::Optional,
            skip_unpriced: false,
            namespaces: BTreeMap::new(),
        }
    }
}
