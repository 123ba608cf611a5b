//! Records the site is built from: articles, directory items, and comments.

pub mod article;
pub mod comment;
pub mod directory;

pub use article::Article;
pub use comment::{ANONYMOUS, Comment};
pub use directory::DirectoryItem;
