pub mod articles;
pub mod comment;
pub mod completions;
pub mod directory;
pub mod navigate;
pub mod open;
pub mod route;
