//! Site session: router, content, comments and transient view state.

use crate::comments::CommentStore;
use crate::content::ContentStore;
use crate::error::{NotFound, ValidationError};
use crate::filter::{self, DEFAULT_MAX_PRICE, DirectoryFilter};
use crate::model::Comment;
use crate::page::{ArticlePage, DirectoryPage, HomePage, Page, ProductPage};
use crate::route::Route;
use crate::router::{Location, MemoryHistory, RouteChange, Router};
use crate::storage::KeyValueStore;
use tracing::debug;

/// Number of related articles shown under an article by default.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Tunables for page composition.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub related_limit: usize,
    pub default_max_price: f64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            related_limit: DEFAULT_RELATED_LIMIT,
            default_max_price: DEFAULT_MAX_PRICE,
        }
    }
}

/// One browsing session over the site.
#[derive(Debug)]
pub struct Site<L, S> {
    router: Router<L>,
    content: ContentStore,
    comments: CommentStore<S>,
    settings: SiteSettings,
    query: String,
    directory_filter: DirectoryFilter,
}

impl<S: KeyValueStore> Site<MemoryHistory, S> {
    /// A session starting at `fragment` with an in-process history.
    pub fn open(fragment: &str, content: ContentStore, storage: S, settings: SiteSettings) -> Self {
        Self::new(MemoryHistory::new(fragment), content, storage, settings)
    }

    /// Browser back. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        let moved = self.router.location_mut().back();
        self.sync();
        moved
    }

    /// Browser forward. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        let moved = self.router.location_mut().forward();
        self.sync();
        moved
    }

    /// Replace the current history entry, as a hand-edited address bar does.
    pub fn edit_location(&mut self, fragment: &str) {
        self.router.location_mut().replace_fragment(fragment);
        self.sync();
    }
}

impl<L: Location, S: KeyValueStore> Site<L, S> {
    pub fn new(location: L, content: ContentStore, storage: S, settings: SiteSettings) -> Self {
        let directory_filter = DirectoryFilter::with_max_price(settings.default_max_price);
        Self {
            router: Router::new(location),
            content,
            comments: CommentStore::new(storage),
            settings,
            query: String::new(),
            directory_filter,
        }
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        self.router.current()
    }

    #[must_use]
    pub const fn content(&self) -> &ContentStore {
        &self.content
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn directory_filter(&self) -> &DirectoryFilter {
        &self.directory_filter
    }

    /// Register a listener for route changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&Route) + 'static) {
        self.router.subscribe(listener);
    }

    /// Navigate and apply the resulting notification.
    pub fn navigate(&mut self, fragment: &str) -> Vec<RouteChange> {
        self.router.navigate(fragment);
        self.sync()
    }

    /// Apply pending location notifications to the session.
    ///
    /// Leaving the directory discards its filter state.
    pub fn sync(&mut self) -> Vec<RouteChange> {
        let changes = self.router.dispatch_pending();
        for change in &changes {
            if change.from == Route::Directory && change.to != Route::Directory {
                debug!("directory view left; resetting filter");
                self.directory_filter =
                    DirectoryFilter::with_max_price(self.settings.default_max_price);
            }
        }
        changes
    }

    /// Set the blog search query, moving to the feed unless the location
    /// already reads as the feed root.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        let fragment = self.router.location().fragment();
        if !HOME_FRAGMENTS.contains(&fragment.as_str()) {
            self.navigate(&Route::Home.fragment());
        }
    }

    /// Replace the directory filter state.
    pub fn apply_directory_filter(&mut self, filter: DirectoryFilter) {
        self.directory_filter = filter;
    }

    /// Comment thread for an article, newest first.
    pub fn comments(&mut self, article_id: &str) -> &[Comment] {
        self.comments.load_comments(article_id)
    }

    /// Post a comment on an existing article.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRejected::NotFound`] for an unknown article and
    /// [`CommentRejected::Invalid`] for a blank body.
    pub fn add_comment(
        &mut self,
        article_id: &str,
        author: &str,
        body: &str,
    ) -> Result<Comment, CommentRejected> {
        self.content.get_article(article_id)?;
        Ok(self.comments.add_comment(article_id, author, body)?)
    }

    /// Delete a comment; `false` when it was not there.
    pub fn delete_comment(&mut self, article_id: &str, comment_id: &str) -> bool {
        self.comments.delete_comment(article_id, comment_id)
    }

    /// Compose the page for the current route.
    pub fn page(&mut self) -> Page<'_> {
        let route = self.router.current().clone();
        match route {
            Route::Home => {
                let all = self.content.list_articles();
                Page::Home(HomePage {
                    query: self.query.clone(),
                    total: all.len(),
                    articles: filter::filter_articles(all, &self.query),
                })
            }
            Route::Article(id) => match self.content.get_article(&id) {
                Ok(article) => Page::Article(ArticlePage {
                    article,
                    related: self
                        .content
                        .related_articles(&id, self.settings.related_limit),
                    comments: self.comments.load_comments(&id).to_vec(),
                }),
                Err(missing) => Page::NotFound(missing),
            },
            Route::Directory => {
                let all = self.content.list_directory_items();
                Page::Directory(DirectoryPage {
                    filter: self.directory_filter.clone(),
                    categories: filter::categories(all),
                    total: all.len(),
                    items: filter::filter_directory(all, &self.directory_filter),
                })
            }
            Route::Product(id) => match self.content.get_directory_item(&id) {
                Ok(item) => Page::Product(ProductPage { item }),
                Err(missing) => Page::NotFound(missing),
            },
        }
    }
}

/// Raw fragments that already point at the feed root.
const HOME_FRAGMENTS: [&str; 3] = ["", "#", "#/"];

/// Why a comment submission was not recorded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentRejected {
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl CommentRejected {
    #[must_use]
    pub const fn code(&self) -> crate::error::ErrorCode {
        match self {
            Self::NotFound(err) => err.code(),
            Self::Invalid(err) => err.code(),
        }
    }
}
