//! Read-only store over the static article and directory catalog.
//!
//! The catalog is injected data: callers load it from a TOML or JSON file (or
//! use the bundled sample) and the store never mutates it afterwards.

use crate::error::{ErrorCode, NotFound};
use crate::model::{Article, DirectoryItem};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.toml");

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} at position {index} has an empty id")]
    EmptyId { kind: &'static str, index: usize },
    #[error("directory item '{id}' has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

impl ContentError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } | Self::Toml(_) | Self::Json(_) => ErrorCode::ContentLoadFailed,
            Self::DuplicateId { .. } => ErrorCode::DuplicateContentId,
            Self::EmptyId { .. } | Self::InvalidPrice { .. } => ErrorCode::InvalidContentField,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Catalog {
    #[serde(default)]
    articles: Vec<Article>,
    #[serde(default)]
    directory: Vec<DirectoryItem>,
}

/// In-memory catalog of articles and directory items.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    articles: Vec<Article>,
    directory: Vec<DirectoryItem>,
}

impl ContentStore {
    /// Build a store from already-loaded records.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] when ids are empty or duplicated, or a price is
    /// negative or not finite.
    pub fn new(
        articles: Vec<Article>,
        directory: Vec<DirectoryItem>,
    ) -> Result<Self, ContentError> {
        validate_ids("article", articles.iter().map(|a| a.id.as_str()))?;
        validate_ids("directory item", directory.iter().map(|i| i.id.as_str()))?;
        for item in &directory {
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(ContentError::InvalidPrice {
                    id: item.id.clone(),
                    price: item.price,
                });
            }
        }
        Ok(Self {
            articles,
            directory,
        })
    }

    /// The sample catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled file itself is broken.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::from_toml_str(BUNDLED_CATALOG)
    }

    /// # Errors
    ///
    /// Returns [`ContentError`] on parse or validation failure.
    pub fn from_toml_str(raw: &str) -> Result<Self, ContentError> {
        let catalog: Catalog = toml::from_str(raw)?;
        Self::new(catalog.articles, catalog.directory)
    }

    /// # Errors
    ///
    /// Returns [`ContentError`] on parse or validation failure.
    pub fn from_json_str(raw: &str) -> Result<Self, ContentError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        Self::new(catalog.articles, catalog.directory)
    }

    /// Load a catalog file. `.json` files are read as JSON, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let store = if is_json {
            Self::from_json_str(&raw)?
        } else {
            Self::from_toml_str(&raw)?
        };
        info!(
            path = %path.display(),
            articles = store.articles.len(),
            directory_items = store.directory.len(),
            "loaded content catalog"
        );
        Ok(store)
    }

    /// Exact-match article lookup.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no article has this id.
    pub fn get_article(&self, id: &str) -> Result<&Article, NotFound> {
        self.articles
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| NotFound::article(id))
    }

    /// Exact-match directory item lookup.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no directory item has this id.
    pub fn get_directory_item(&self, id: &str) -> Result<&DirectoryItem, NotFound> {
        self.directory
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| NotFound::directory_item(id))
    }

    #[must_use]
    pub fn list_articles(&self) -> &[Article] {
        &self.articles
    }

    #[must_use]
    pub fn list_directory_items(&self) -> &[DirectoryItem] {
        &self.directory
    }

    /// Every article except `exclude_id`, in catalog order, at most `limit`.
    #[must_use]
    pub fn related_articles(&self, exclude_id: &str, limit: usize) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.id != exclude_id)
            .take(limit)
            .collect()
    }
}

fn validate_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if id.trim().is_empty() {
            return Err(ContentError::EmptyId { kind, index });
        }
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
