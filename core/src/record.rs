use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inferred sweetness category. Every record carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sweetness {
    Dry,
    #[default]
    Medium,
    Sweet,
}

impl Sweetness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sweetness::Dry => "Dry",
            Sweetness::Medium => "Medium",
            Sweetness::Sweet => "Sweet",
        }
    }

    /// Case-insensitive parse; anything unrecognized is None.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dry" => Some(Sweetness::Dry),
            "medium" => Some(Sweetness::Medium),
            "sweet" => Some(Sweetness::Sweet),
            _ => None,
        }
    }
}

/// Inferred style tag; a record may carry zero or more.
/// Variant order is alphabetical so a BTreeSet serializes in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleTag {
    Earthy,
    Floral,
    Fruity,
    Spicy,
}

impl StyleTag {
    pub const ALL: [StyleTag; 4] = [
        StyleTag::Earthy,
        StyleTag::Floral,
        StyleTag::Fruity,
        StyleTag::Spicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::Earthy => "Earthy",
            StyleTag::Floral => "Floral",
            StyleTag::Fruity => "Fruity",
            StyleTag::Spicy => "Spicy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "earthy" => Some(StyleTag::Earthy),
            "floral" => Some(StyleTag::Floral),
            "fruity" => Some(StyleTag::Fruity),
            "spicy" => Some(StyleTag::Spicy),
            _ => None,
        }
    }
}

/// One classified review row. Immutable once built by the loader.
/// price/points stay as trimmed raw text and are parsed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineRecord {
    pub title: String,
    pub description: String,
    pub country: Option<String>,
    pub variety: Option<String>,
    pub province: Option<String>,
    pub winery: Option<String>,
    pub price: String,
    pub points: String,
    pub sweetness: Sweetness,
    pub style_tags: BTreeSet<StyleTag>,
}

impl WineRecord {
    pub fn price_f64(&self) -> Option<f64> {
        parse_lenient(&self.price)
    }

    pub fn points_f64(&self) -> Option<f64> {
        parse_lenient(&self.points)
    }

    /// Tags joined as e.g. "Fruity, Spicy", in fixed alphabetical order.
    pub fn style_tags_joined(&self) -> String {
        let strs: Vec<&str> = self.style_tags.iter().map(|t| t.as_str()).collect();
        strs.join(", ")
    }
}

fn parse_lenient(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

/// The in-memory record set, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct WineCatalog {
    records: Vec<WineRecord>,
}

impl WineCatalog {
    pub fn new(records: Vec<WineRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[WineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweetness_parse_is_case_insensitive() {
        assert_eq!(Sweetness::parse("sweet"), Some(Sweetness::Sweet));
        assert_eq!(Sweetness::parse(" DRY "), Some(Sweetness::Dry));
        assert_eq!(Sweetness::parse("bone-dry"), None);
    }

    #[test]
    fn tags_join_in_alphabetical_order() {
        let rec = WineRecord {
            title: "t".into(),
            description: String::new(),
            country: None,
            variety: None,
            province: None,
            winery: None,
            price: String::new(),
            points: String::new(),
            sweetness: Sweetness::Medium,
            style_tags: [StyleTag::Spicy, StyleTag::Earthy, StyleTag::Fruity]
                .into_iter()
                .collect(),
        };
        assert_eq!(rec.style_tags_joined(), "Earthy, Fruity, Spicy");
    }

    #[test]
    fn lenient_parse_never_errors() {
        assert_eq!(parse_lenient("19.99"), Some(19.99));
        assert_eq!(parse_lenient("  42 "), Some(42.0));
        assert_eq!(parse_lenient(""), None);
        assert_eq!(parse_lenient("n/a"), None);
    }
}
