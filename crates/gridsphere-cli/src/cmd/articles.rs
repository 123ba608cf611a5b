//! `gs articles` and `gs article`: the blog feed and single articles.

use crate::context::open_site;
use crate::output::OutputMode;
use crate::view::render_page;
use clap::Args;
use gridsphere_core::route::Route;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ArticlesArgs {
    /// Case-insensitive search over title, excerpt and tags.
    #[arg(short, long)]
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct ArticleArgs {
    /// Article id.
    pub id: String,
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or output fails.
pub fn run_articles(
    args: &ArticlesArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let mut site = open_site(project_root, &Route::Home.fragment(), output)?;
    if let Some(query) = &args.query {
        site.search(query);
    }
    render_page(output, &site.page())
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or the article does not
/// exist.
pub fn run_article(args: &ArticleArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let fragment = Route::Article(args.id.clone()).fragment();
    let mut site = open_site(project_root, &fragment, output)?;
    render_page(output, &site.page())
}
