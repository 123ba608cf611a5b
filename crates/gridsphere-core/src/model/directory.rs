use serde::{Deserialize, Serialize};

/// A product or service listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryItem {
    pub id: String,
    pub name: String,
    /// Open set; the directory derives its category list from the items.
    pub category: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(alias = "ctaLabel")]
    pub cta_label: String,
    pub url: String,
    pub details: String,
}

impl DirectoryItem {
    /// Text the directory search matches against: name, description, category.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.category)
    }
}
