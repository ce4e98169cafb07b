use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use erp_core::AdapterKind;

use crate::constants::{APP_DIR, SQLITE_FILE};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErpConfig {
    pub storage: StorageSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageSection {
    pub adapter: AdapterKind,
    /// Data directory for `file`, database file for `sqlite`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErpConfig {
    pub fn new(adapter: AdapterKind, path: Option<PathBuf>) -> Self {
        Self {
            storage: StorageSection {
                adapter,
                path: path.map(|path| path.to_string_lossy().to_string()),
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

/// Where a backend keeps its data when nothing else is configured.
pub fn default_location(kind: AdapterKind) -> anyhow::Result<Option<PathBuf>> {
    Ok(match kind {
        AdapterKind::File => Some(xdg_data_dir()?),
        AdapterKind::Sqlite => Some(xdg_data_dir()?.join(SQLITE_FILE)),
        AdapterKind::Memory => None,
    })
}

pub fn read_config(path: &Path) -> anyhow::Result<ErpConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &ErpConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", &[".config"])
}

fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"])
}

fn xdg_dir(var: &str, fallback: &[&str]) -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join(APP_DIR));
        }
    }
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    let mut dir = PathBuf::from(home);
    dir.extend(fallback);
    Ok(dir.join(APP_DIR))
}
