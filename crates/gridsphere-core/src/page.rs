//! Composed page values handed to the presentation layer.

use crate::error::NotFound;
use crate::filter::DirectoryFilter;
use crate::model::{Article, Comment, DirectoryItem};
use crate::route::Route;
use serde::Serialize;

/// Blog feed, narrowed by the session's search query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage<'a> {
    pub query: String,
    /// Size of the unfiltered feed.
    pub total: usize,
    pub articles: Vec<&'a Article>,
}

/// One article with its related list and comment thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticlePage<'a> {
    pub article: &'a Article,
    pub related: Vec<&'a Article>,
    pub comments: Vec<Comment>,
}

/// Directory listing under the active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryPage<'a> {
    pub filter: DirectoryFilter,
    pub categories: Vec<&'a str>,
    pub total: usize,
    pub items: Vec<&'a DirectoryItem>,
}

/// A single focused directory item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage<'a> {
    pub item: &'a DirectoryItem,
}

/// Everything the presentation layer needs to draw the active route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page<'a> {
    Home(HomePage<'a>),
    Article(ArticlePage<'a>),
    Directory(DirectoryPage<'a>),
    Product(ProductPage<'a>),
    NotFound(NotFound),
}

impl Page<'_> {
    /// The route this page answers, if it resolved.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Home(_) => Some(Route::Home),
            Self::Article(p) => Some(Route::Article(p.article.id.clone())),
            Self::Directory(_) => Some(Route::Directory),
            Self::Product(p) => Some(Route::Product(p.item.id.clone())),
            Self::NotFound(_) => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;

    #[test]
    fn not_found_page_serializes_kind_and_id() {
        let page = Page::NotFound(NotFound::directory_item("ghost"));
        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"page": "not_found", "kind": "directory_item", "id": "ghost"})
        );
        assert!(page.is_not_found());
        assert_eq!(page.route(), None);
    }

    #[test]
    fn product_page_reports_its_route() {
        let store = ContentStore::bundled().expect("bundled");
        let item = store.get_directory_item("vision-suite").expect("present");
        let page = Page::Product(ProductPage { item });
        assert_eq!(page.route(), Some(Route::Product("vision-suite".into())));

        let json = serde_json::to_value(&page).expect("serialize");
        assert_eq!(json["page"], "product");
        assert_eq!(json["item"]["cta_label"], "Start Free Trial");
    }
}
