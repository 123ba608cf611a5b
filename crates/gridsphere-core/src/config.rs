use crate::filter::DEFAULT_MAX_PRICE;
use crate::site::{DEFAULT_RELATED_LIMIT, SiteSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Project directory holding configuration and local storage.
pub const PROJECT_DIR: &str = ".gridsphere";

/// Env var overriding the storage file location.
pub const STORAGE_ENV: &str = "GRIDSPHERE_STORAGE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub articles: ArticlesConfig,
}

/// Where the catalog comes from. `None` means the bundled sample catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub quota_bytes: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            quota_bytes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_max_price")]
    pub default_max_price: f64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            default_max_price: default_max_price(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesConfig {
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            related_limit: default_related_limit(),
        }
    }
}

impl ProjectConfig {
    #[must_use]
    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings {
            related_limit: self.articles.related_limit,
            default_max_price: self.directory.default_max_price,
        }
    }

    /// Catalog path resolved against `project_root`, if one is configured.
    #[must_use]
    pub fn content_path(&self, project_root: &Path) -> Option<PathBuf> {
        self.content
            .path
            .as_deref()
            .map(|path| resolve_path(project_root, path))
    }

    /// Storage file, honoring the `GRIDSPHERE_STORAGE` override.
    #[must_use]
    pub fn storage_path(&self, project_root: &Path) -> PathBuf {
        let env_override = env::var(STORAGE_ENV).ok();
        self.storage_path_inner(project_root, env_override.as_deref())
    }

    fn storage_path_inner(&self, project_root: &Path, env_override: Option<&str>) -> PathBuf {
        match env_override.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => resolve_path(project_root, Path::new(raw)),
            None => resolve_path(project_root, &self.storage.path),
        }
    }
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_DIR).join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if !config.directory.default_max_price.is_finite() || config.directory.default_max_price < 0.0
    {
        anyhow::bail!(
            "Invalid directory.default_max_price {} in {}",
            config.directory.default_max_price,
            path.display()
        );
    }

    Ok(config)
}

fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(PROJECT_DIR).join("local-storage.json")
}

const fn default_max_price() -> f64 {
    DEFAULT_MAX_PRICE
}

const fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}
