//! Swatch configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swatch_store::DEFAULT_PAGE_SIZE;
use swatch_theme::{ColorFormat, TailwindVersion};

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILE: &str = "swatch.toml";

/// Top-level Swatch configuration (swatch.toml)
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SwatchConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Where saved themes live
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSON file holding saved themes
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("swatch-themes.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Defaults for `export`
#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ColorFormat,
    #[serde(default)]
    pub tailwind: TailwindVersion,
}

/// Defaults for `feed`
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl SwatchConfig {
    /// Load `explicit`, or `swatch.toml` in `dir` when it exists.
    ///
    /// An explicit path must exist; the implicit file may be absent.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = dir.join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: SwatchConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
