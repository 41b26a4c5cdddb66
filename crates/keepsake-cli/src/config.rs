use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use keepsake_core::{CachePolicy, DEFAULT_FAVORITES_FOLDER, DEFAULT_VAULT_FOLDER};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub cache: CacheSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    /// Remote folder holding encrypted payloads
    #[serde(default = "default_vault_folder")]
    pub vault_folder: String,

    /// Remote folder favorites are copied into
    #[serde(default = "default_favorites_folder")]
    pub favorites_folder: String,

    /// JSON token file maintained by the external OAuth helper
    #[serde(default)]
    pub token_file: Option<String>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            vault_folder: default_vault_folder(),
            favorites_folder: default_favorites_folder(),
            token_file: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_cache_entries")]
    pub max_entries: usize,

    #[serde(default = "default_cache_megabytes")]
    pub max_megabytes: usize,

    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            max_entries: default_cache_entries(),
            max_megabytes: default_cache_megabytes(),
            ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl CacheSection {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            max_entries: self.max_entries,
            max_bytes: self.max_megabytes * 1024 * 1024,
            ttl: Duration::from_secs(self.ttl_seconds),
        }
    }
}

fn default_vault_folder() -> String {
    DEFAULT_VAULT_FOLDER.to_string()
}

fn default_favorites_folder() -> String {
    DEFAULT_FAVORITES_FOLDER.to_string()
}

fn default_cache_entries() -> usize {
    64
}

fn default_cache_megabytes() -> usize {
    256
}

fn default_cache_ttl_seconds() -> u64 {
    300
}

/// Load configuration.
///
/// An explicitly requested path must exist; the default path falls back
/// to built-in defaults when no file is present.
pub fn load_config(explicit_path: Option<&str>) -> anyhow::Result<Config> {
    match explicit_path {
        Some(path) => read_config(Path::new(path)),
        None => {
            let path = default_config_path()?;
            if path.exists() {
                read_config(&path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keepsake"));
        }
    }
    Ok(home_dir()?.join(".config").join("keepsake"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
