//! Site configuration loaded from `site.yaml`.
//!
//! # Well-known keys
//!
//! | Key           | Required | Exposed as          |
//! |---------------|----------|---------------------|
//! | `title`       | yes      | `site.title`        |
//! | `description` | no       | `site.description`  |
//! | `keywords`    | no       | `site.keywords`     |
//! | `image`       | no       | `site.image`        |
//!
//! Every other top-level key is kept under `data`.
//!
//! # Example
//!
//! ```yaml
//! ---
//! title: My Site
//! description: Notes and experiments.
//! image: cover.png
//! links:
//!   - name: GitHub
//!     url: https://github.com
//! ```

pub mod defaults;
mod error;
mod serve;
mod value;

pub use error::ConfigError;
pub use serve::ServeConfig;
pub use value::{DynamicMap, DynamicValue};

use serde_yaml::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use value::mapping_key;

/// Config file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &["site.yaml", "site.yml"];

/// Top-level keys pulled out of the residual data map.
const WELL_KNOWN_KEYS: &[&str] = &["title", "description", "keywords", "image"];

/// Parsed `site.yaml`. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub image: Option<String>,
    /// Non well-known keys, converted recursively.
    pub data: DynamicMap,
}

impl SiteConfig {
    /// Parse configuration from YAML text.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let root: Value = serde_yaml::from_str(content)?;

        let Some(mapping) = root.as_mapping() else {
            return Err(ConfigError::MissingTitle);
        };

        let string_field = |key: &str| mapping.get(key).and_then(Value::as_str).map(str::to_owned);
        let title = string_field("title").ok_or(ConfigError::MissingTitle)?;

        let mut data = DynamicMap::new();
        for (key, value) in mapping {
            let key = mapping_key(key)?;
            if WELL_KNOWN_KEYS.contains(&key.as_str()) {
                continue;
            }
            data.insert(key, DynamicValue::from_yaml(value)?);
        }

        Ok(Self {
            title,
            description: string_field("description"),
            keywords: string_field("keywords"),
            image: string_field("image"),
            data,
        })
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Locate and load the config file of a site directory.
    pub fn from_root(root: &Path) -> Result<Self, ConfigError> {
        let path = find_config_file(root).ok_or(ConfigError::MissingSiteConfig)?;
        Self::from_path(&path)
    }
}

/// First existing config file in `root`, `site.yaml` before `site.yml`.
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}
