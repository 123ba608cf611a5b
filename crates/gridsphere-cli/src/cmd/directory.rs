//! `gs directory` and `gs product`: the product directory.

use crate::context::open_site;
use crate::output::{CliError, OutputMode, render_error};
use crate::view::render_page;
use clap::Args;
use gridsphere_core::error::ErrorCode;
use gridsphere_core::filter::{ALL_CATEGORIES, CategoryFilter, DirectoryFilter};
use gridsphere_core::route::Route;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DirectoryArgs {
    /// Case-insensitive search over name, description and category.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Exact category, or "All".
    #[arg(short, long, default_value = ALL_CATEGORIES)]
    pub category: String,

    /// Price ceiling (inclusive). Defaults to directory.default_max_price.
    #[arg(long)]
    pub max_price: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Directory item id.
    pub id: String,
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or `--max-price` is
/// negative or not a number.
pub fn run_directory(
    args: &DirectoryArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    if let Some(price) = args.max_price
        && (!price.is_finite() || price < 0.0)
    {
        let msg = format!("--max-price must be a non-negative number (got {price})");
        render_error(
            output,
            &CliError::with_code(&msg, ErrorCode::InvalidContentField),
        )?;
        anyhow::bail!("{msg}");
    }

    let mut site = open_site(project_root, &Route::Directory.fragment(), output)?;
    let max_price = args
        .max_price
        .unwrap_or(site.directory_filter().max_price);
    site.apply_directory_filter(DirectoryFilter {
        query: args.query.clone(),
        category: CategoryFilter::from(args.category.as_str()),
        max_price,
    });
    render_page(output, &site.page())
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or the item does not
/// exist.
pub fn run_product(args: &ProductArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let fragment = Route::Product(args.id.clone()).fragment();
    let mut site = open_site(project_root, &fragment, output)?;
    render_page(output, &site.page())
}
