//! Server configuration.
//!
//! Values come from an optional YAML file (path in `STOREFRONT_CONFIG`),
//! then individual environment variables override single fields. Anything
//! left unset falls back to the defaults below.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "STOREFRONT_CONFIG";
pub const DATA_DIR_VAR: &str = "STOREFRONT_DATA_DIR";
pub const BIND_VAR: &str = "STOREFRONT_BIND";
pub const CATALOG_VAR: &str = "STOREFRONT_CATALOG";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_DATA_FOLDER: &str = "Storefront";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the document store
    pub data_directory: PathBuf,
    pub bind_address: String,
    /// Product catalog YAML; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Origin allowed by CORS, usually the web frontend
    pub allowed_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            catalog_path: None,
            log_filter: "info".to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load the configuration using `lookup` to resolve environment variables
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_yaml_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup);
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = non_empty(lookup(DATA_DIR_VAR)) {
            self.data_directory = PathBuf::from(dir);
        }
        if let Some(bind) = non_empty(lookup(BIND_VAR)) {
            self.bind_address = bind;
        }
        if let Some(catalog) = non_empty(lookup(CATALOG_VAR)) {
            self.catalog_path = Some(PathBuf::from(catalog));
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// `~/Documents/Storefront`, or the working directory when no documents
/// folder can be resolved
pub fn default_data_directory() -> PathBuf {
    match dirs::document_dir().or_else(dirs::home_dir) {
        Some(base) => base.join(DEFAULT_DATA_FOLDER),
        None => {
            warn!("Could not determine documents directory, using ./{}", DEFAULT_DATA_FOLDER);
            PathBuf::from(DEFAULT_DATA_FOLDER)
        }
    }
}
