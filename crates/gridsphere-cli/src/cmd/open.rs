//! `gs open`: compose the page a location fragment leads to.

use crate::context::open_site;
use crate::output::OutputMode;
use crate::view::render_page;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Location fragment to open. Unknown shapes open the blog feed.
    #[arg(default_value = "#/")]
    pub fragment: String,
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or the page is not found.
pub fn run_open(args: &OpenArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let mut site = open_site(project_root, &args.fragment, output)?;
    render_page(output, &site.page())
}
