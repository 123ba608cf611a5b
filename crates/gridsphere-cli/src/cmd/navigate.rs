//! `gs navigate`: replay a browsing session through the router.
//!
//! Each step is a location fragment, `:back`, `:forward`, `:edit=<fragment>`
//! (address-bar edit replacing the current entry) or `:search=<query>`.

use crate::context::open_site;
use crate::output::OutputMode;
use crate::view::render_page;
use clap::Args;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Fragment the session starts at.
    #[arg(long, default_value = "#/")]
    pub start: String,

    /// Steps to replay, in order.
    #[arg(required = true, num_args = 1..)]
    pub steps: Vec<Step>,
}

/// One user action in a replayed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Go(String),
    Back,
    Forward,
    Edit(String),
    Search(String),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some(action) = raw.strip_prefix(':') else {
            return Ok(Self::Go(raw.to_string()));
        };
        match action.split_once('=') {
            None if action == "back" => Ok(Self::Back),
            None if action == "forward" => Ok(Self::Forward),
            Some(("search", query)) => Ok(Self::Search(query.to_string())),
            Some(("edit", fragment)) => Ok(Self::Edit(fragment.to_string())),
            _ => Err(format!(
                "unknown step ':{action}' (expected :back, :forward, :edit=<fragment> or :search=<query>)"
            )),
        }
    }
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or the final page is not
/// found.
pub fn run_navigate(
    args: &NavigateArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let mut site = open_site(project_root, &args.start, output)?;
    for step in &args.steps {
        match step {
            Step::Go(fragment) => {
                site.navigate(fragment);
            }
            Step::Back => {
                if !site.back() {
                    debug!("already at the start of history");
                }
            }
            Step::Forward => {
                if !site.forward() {
                    debug!("already at the end of history");
                }
            }
            Step::Edit(fragment) => site.edit_location(fragment),
            Step::Search(query) => site.search(query),
        }
        debug!(?step, route = %site.route(), "step applied");
    }
    render_page(output, &site.page())
}
