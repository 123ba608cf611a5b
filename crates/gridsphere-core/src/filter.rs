//! Pure list filters for the blog feed and the directory.
//!
//! Filters never reorder: output keeps the relative order of the input.

use crate::model::{Article, DirectoryItem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the directory price slider, and the default threshold.
pub const DEFAULT_MAX_PRICE: f64 = 200.0;

/// Label of the catch-all category option.
pub const ALL_CATEGORIES: &str = "All";

/// Category selection in the directory filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Named(name) => name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Directory filter state: free-text query, category, and price ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default = "default_max_price")]
    pub max_price: f64,
}

impl Default for DirectoryFilter {
    fn default() -> Self {
        Self::with_max_price(DEFAULT_MAX_PRICE)
    }
}

impl DirectoryFilter {
    /// Empty query, all categories, the given price ceiling.
    #[must_use]
    pub const fn with_max_price(max_price: f64) -> Self {
        Self {
            query: String::new(),
            category: CategoryFilter::All,
            max_price,
        }
    }

    /// The query is lowercased but not trimmed, so surrounding spaces are
    /// part of the needle. Only an empty query matches everything.
    #[must_use]
    pub fn matches(&self, item: &DirectoryItem) -> bool {
        let needle = (!self.query.is_empty()).then(|| self.query.to_lowercase());
        matches_query(&item.search_text(), needle.as_deref())
            && self.category.matches(&item.category)
            && item.price <= self.max_price
    }
}

const fn default_max_price() -> f64 {
    DEFAULT_MAX_PRICE
}

/// Narrow `articles` to those whose title, excerpt or tags contain `query`,
/// ignoring case. A blank query keeps everything.
#[must_use]
pub fn filter_articles<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let Some(needle) = normalize_query(query) else {
        return articles.iter().collect();
    };
    articles
        .iter()
        .filter(|a| matches_query(&a.search_text(), Some(needle.as_str())))
        .collect()
}

/// Narrow `items` to those passing every predicate of `filter`.
#[must_use]
pub fn filter_directory<'a>(
    items: &'a [DirectoryItem],
    filter: &DirectoryFilter,
) -> Vec<&'a DirectoryItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(items: &[DirectoryItem]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for item in items {
        if !out.contains(&item.category.as_str()) {
            out.push(&item.category);
        }
    }
    out
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn matches_query(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;

    fn article(id: &str, title: &str, tags: &[&str]) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
            excerpt: String::new(),
            image: String::new(),
            date: "2025-01-01".into(),
            author: "someone".into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            content: String::new(),
        }
    }

    fn sample() -> ContentStore {
        ContentStore::bundled().expect("bundled catalog")
    }

    fn article_ids<'a>(items: &[&'a Article]) -> Vec<&'a str> {
        items.iter().map(|a| a.id.as_str()).collect()
    }

    fn item_ids<'a>(items: &[&'a DirectoryItem]) -> Vec<&'a str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_input_in_order() {
        let store = sample();
        let all = store.list_articles();
        let out = filter_articles(all, "");
        assert_eq!(out.len(), all.len());
        for (a, b) in out.iter().zip(all) {
            assert!(std::ptr::eq(*a, b));
        }
        assert_eq!(filter_articles(all, "   \t").len(), all.len());
    }

    #[test]
    fn article_match_is_case_insensitive() {
        let list = vec![article("e", "Edge Compute", &[])];
        assert_eq!(filter_articles(&list, "edge").len(), 1);
        assert_eq!(filter_articles(&list, "EDGE").len(), 1);
        assert_eq!(filter_articles(&list, "  eDgE ").len(), 1);
        assert!(filter_articles(&list, "cloud").is_empty());
    }

    #[test]
    fn article_match_covers_tags_and_excerpt() {
        let store = sample();
        let by_tag = filter_articles(store.list_articles(), "devops");
        assert_eq!(article_ids(&by_tag), vec!["edge-compute-patterns"]);

        let by_excerpt = filter_articles(store.list_articles(), "keyboard-first");
        assert_eq!(article_ids(&by_excerpt), vec!["accessible-3d-ux"]);
    }

    #[test]
    fn article_body_is_not_searched() {
        let store = sample();
        // "telemetry" only appears in the neural-interfaces body text.
        assert!(filter_articles(store.list_articles(), "telemetry").is_empty());
    }

    #[test]
    fn directory_default_filter_keeps_everything_under_ceiling() {
        let store = sample();
        let out = filter_directory(store.list_directory_items(), &DirectoryFilter::default());
        assert_eq!(
            item_ids(&out),
            vec!["vision-suite", "aurora-consulting", "lumen-hosting"]
        );
    }

    #[test]
    fn directory_price_ceiling_is_inclusive() {
        let store = sample();
        let filter = DirectoryFilter::with_max_price(29.0);
        let out = filter_directory(store.list_directory_items(), &filter);
        assert_eq!(item_ids(&out), vec!["lumen-hosting"]);

        let below = DirectoryFilter::with_max_price(28.99);
        assert!(filter_directory(store.list_directory_items(), &below).is_empty());
    }

    #[test]
    fn directory_predicates_are_and_combined() {
        let store = sample();
        let filter = DirectoryFilter {
            query: "edge".into(),
            category: CategoryFilter::Named("Platform".into()),
            max_price: 200.0,
        };
        let out = filter_directory(store.list_directory_items(), &filter);
        assert_eq!(item_ids(&out), vec!["lumen-hosting"]);

        let too_cheap = DirectoryFilter {
            max_price: 10.0,
            ..filter
        };
        assert!(filter_directory(store.list_directory_items(), &too_cheap).is_empty());
    }

    #[test]
    fn directory_query_matches_category_text() {
        let store = sample();
        let filter = DirectoryFilter {
            query: "SERVICE".into(),
            ..DirectoryFilter::default()
        };
        let out = filter_directory(store.list_directory_items(), &filter);
        assert_eq!(item_ids(&out), vec!["aurora-consulting"]);
    }

    #[test]
    fn whitespace_directory_query_is_a_literal_needle() {
        let store = sample();
        let blank = DirectoryFilter {
            query: "   ".into(),
            ..DirectoryFilter::default()
        };
        assert!(filter_directory(store.list_directory_items(), &blank).is_empty());

        let empty = DirectoryFilter::default();
        assert_eq!(filter_directory(store.list_directory_items(), &empty).len(), 3);
    }

    #[test]
    fn category_filter_is_exact() {
        assert!(CategoryFilter::All.matches("anything"));
        assert!(CategoryFilter::from("Software").matches("Software"));
        assert!(!CategoryFilter::from("software").matches("Software"));
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.to_string(), "All");
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let store = sample();
        assert_eq!(
            categories(store.list_directory_items()),
            vec!["Software", "Service", "Platform"]
        );
    }

    #[test]
    fn filter_state_serializes_category_as_string() {
        let json = serde_json::to_value(DirectoryFilter::default()).expect("serialize");
        assert_eq!(json["category"], "All");
        assert_eq!(json["max_price"], 200.0);

        let parsed: DirectoryFilter =
            serde_json::from_str(r#"{"category":"Service"}"#).expect("parse");
        assert_eq!(parsed.category, CategoryFilter::Named("Service".into()));
        assert!((parsed.max_price - DEFAULT_MAX_PRICE).abs() < f64::EPSILON);
    }
}
