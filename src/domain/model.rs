use crate::utils::error::{ResolverError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashSet;
use std::fmt;

/// A trimmed, non-blank item name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ResolverError::invalid_input("item name is missing or blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One message record from the search API. Only `content` is consulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl SearchMessage {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }
}

/// 搜尋 API 以「群組」回傳訊息：命中訊息與其上下文
pub type MessageGroup = Vec<SearchMessage>;

/// Deduplicated lines that passed both the price-shape and fuzzy filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateLines(HashSet<String>);

impl CandidateLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the line was already present.
    pub fn insert(&mut self, line: &str) -> bool {
        self.0.insert(line.trim().to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.0.contains(line)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for CandidateLines {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut lines = CandidateLines::new();
        for line in iter {
            lines.insert(line);
        }
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// Average price of a single unit, in WL.
    Each,
    /// Bulk rate: how many items one WL buys.
    Per,
}

/// Validated price answer. Reads the model's keys (`Item_Name`,
/// `item_price`, `priceindl`) and writes camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(alias = "Item_Name")]
    pub item_name: String,

    /// Kept as a JSON number so integer prices serialise without a fraction.
    #[serde(alias = "item_price")]
    pub item_price: Number,

    #[serde(default, alias = "priceindl")]
    pub price_in_display_units: Option<String>,

    #[serde(rename = "type")]
    pub price_type: PriceType,
}
