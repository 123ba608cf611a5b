#![forbid(unsafe_code)]
//! gridsphere-core library.
//!
//! Hash routing, blog and directory filtering, per-article comment storage
//! and the static content catalog behind the GridSphere site.
//!
//! # Conventions
//!
//! - **Errors**: library failures are `thiserror` enums carrying an
//!   [`error::ErrorCode`]; configuration loading returns `anyhow::Result`.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod comments;
pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod model;
pub mod page;
pub mod route;
pub mod router;
pub mod site;
pub mod storage;

pub use comments::CommentStore;
pub use content::ContentStore;
pub use page::Page;
pub use route::{Route, parse_route};
pub use router::{Location, MemoryHistory, Router};
pub use site::{Site, SiteSettings};
