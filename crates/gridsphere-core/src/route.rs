//! Location-fragment routes.
//!
//! Recognized shapes are `#/`, `#/article/<id>`, `#/directory` and
//! `#/product/<id>`. Everything else resolves to [`Route::Home`].

use serde::Serialize;
use std::fmt;

/// Page descriptor derived from a location fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "page", content = "id", rename_all = "snake_case")]
pub enum Route {
    #[default]
    Home,
    Article(String),
    Directory,
    Product(String),
}

impl Route {
    /// Canonical fragment for this route, including the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> String {
        match self {
            Self::Home => "#/".to_string(),
            Self::Article(id) => format!("#/article/{id}"),
            Self::Directory => "#/directory".to_string(),
            Self::Product(id) => format!("#/product/{id}"),
        }
    }

    /// Short page name used in logs and text output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Article(_) => "article",
            Self::Directory => "directory",
            Self::Product(_) => "product",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment())
    }
}

/// Parse a raw location fragment. Never fails: unknown shapes are Home.
#[must_use]
pub fn parse_route(fragment: &str) -> Route {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("article"), Some(id)) => Route::Article(id.to_string()),
        (Some("directory"), _) => Route::Directory,
        (Some("product"), Some(id)) => Route::Product(id.to_string()),
        _ => Route::Home,
    }
}
