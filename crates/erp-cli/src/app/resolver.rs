//! Config path and storage backend resolution.
//!
//! Precedence, highest first: `--adapter`/`--data` flags (or their
//! `ERP_ADAPTER`/`ERP_DATA` env vars), the config file, built-in defaults.

use std::path::PathBuf;

use erp_core::{AdapterConfig, AdapterKind};

use crate::cli::Cli;
use crate::config::{default_config_path, default_location, read_config, ErpConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking ERP_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Work out which backend to open and where.
pub fn resolve_adapter_config(cli: &Cli) -> anyhow::Result<AdapterConfig> {
    let config_path = resolve_config_path()?;
    let file_config = if config_path.exists() {
        Some(read_config(&config_path)?)
    } else {
        None
    };
    merge(cli.adapter.as_deref(), cli.data.as_deref(), file_config.as_ref())
}

fn merge(
    adapter_flag: Option<&str>,
    data_flag: Option<&str>,
    file_config: Option<&ErpConfig>,
) -> anyhow::Result<AdapterConfig> {
    let kind = match (adapter_flag, file_config) {
        (Some(flag), _) => flag.parse::<AdapterKind>()?,
        (None, Some(config)) => config.storage.adapter,
        (None, None) => AdapterKind::File,
    };
    if !kind.is_durable() {
        return Ok(AdapterConfig::memory());
    }

    // A configured path belongs to the configured backend only.
    let configured_path = file_config
        .filter(|config| config.storage.adapter == kind)
        .and_then(|config| config.storage.path.as_deref());

    let location = match data_flag.or(configured_path) {
        Some(path) => Some(PathBuf::from(path)),
        None => default_location(kind)?,
    };
    Ok(AdapterConfig::new(kind, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(adapter: AdapterKind, path: Option<&str>) -> ErpConfig {
        ErpConfig::new(adapter, path.map(PathBuf::from))
    }

    #[test]
    fn test_flags_override_config() {
        let file = config(AdapterKind::File, Some("/var/erp"));
        let resolved = merge(Some("sqlite"), Some("/tmp/x.sqlite"), Some(&file)).unwrap();
        assert_eq!(resolved.kind, AdapterKind::Sqlite);
        assert_eq!(resolved.location, Some(PathBuf::from("/tmp/x.sqlite")));
    }

    #[test]
    fn test_config_used_without_flags() {
        let file = config(AdapterKind::Sqlite, Some("/var/erp.sqlite"));
        let resolved = merge(None, None, Some(&file)).unwrap();
        assert_eq!(resolved, AdapterConfig::new(AdapterKind::Sqlite, Some("/var/erp.sqlite".into())));
    }

    #[test]
    fn test_config_path_ignored_for_other_backend() {
        let file = config(AdapterKind::Sqlite, Some("/var/erp.sqlite"));
        let resolved = merge(Some("file"), Some("/data"), Some(&file)).unwrap();
        assert_eq!(resolved.location, Some(PathBuf::from("/data")));
    }

    #[test]
    fn test_memory_has_no_location() {
        let resolved = merge(Some("memory"), Some("/ignored"), None).unwrap();
        assert_eq!(resolved, AdapterConfig::memory());
    }

    #[test]
    fn test_unknown_adapter_flag_fails() {
        assert!(merge(Some("redis"), None, None).is_err());
    }
}
