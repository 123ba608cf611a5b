//! Build a [`Site`] session for the current project directory.

use crate::output::{CliError, OutputMode, render_error};
use gridsphere_core::config::{ProjectConfig, load_project_config};
use gridsphere_core::content::ContentStore;
use gridsphere_core::error::ErrorCode;
use gridsphere_core::router::MemoryHistory;
use gridsphere_core::site::Site;
use gridsphere_core::storage::FileStore;
use std::path::Path;
use tracing::debug;

pub type CliSite = Site<MemoryHistory, FileStore>;

/// Load config, catalog and storage, and open a session at `fragment`.
///
/// # Errors
///
/// Returns an error (after rendering it) when the config file or catalog
/// cannot be loaded.
pub fn open_site(project_root: &Path, fragment: &str, output: OutputMode) -> anyhow::Result<CliSite> {
    let config = match load_project_config(project_root) {
        Ok(config) => config,
        Err(e) => {
            let msg = format!("{e:#}");
            render_error(output, &CliError::with_code(&msg, ErrorCode::ConfigParseError))?;
            anyhow::bail!("{msg}");
        }
    };

    let content = load_content(&config, project_root, output)?;
    let storage_path = config.storage_path(project_root);
    debug!(path = %storage_path.display(), "using local storage file");
    let storage = FileStore::new(storage_path).with_quota(config.storage.quota_bytes);

    Ok(Site::open(fragment, content, storage, config.site_settings()))
}

fn load_content(
    config: &ProjectConfig,
    project_root: &Path,
    output: OutputMode,
) -> anyhow::Result<ContentStore> {
    let loaded = match config.content_path(project_root) {
        Some(path) => ContentStore::load(&path),
        None => ContentStore::bundled(),
    };
    match loaded {
        Ok(store) => Ok(store),
        Err(e) => {
            let msg = e.to_string();
            render_error(output, &CliError::with_code(&msg, e.code()))?;
            anyhow::bail!("{msg}");
        }
    }
}
