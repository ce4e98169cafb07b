use std::path::PathBuf;

use erp_core::{open_adapter, AdapterConfig, AdapterKind};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_location, write_config, ErpConfig};
use crate::errors::CliError;
use crate::ui::{badge, hint, kv, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = match args.config_path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let cli = ctx.cli();
    let kind = match cli.adapter.as_deref() {
        Some(value) => value.parse::<AdapterKind>()?,
        None => AdapterKind::File,
    };
    let location = match (kind.is_durable(), cli.data.as_deref()) {
        (false, _) => None,
        (true, Some(path)) => Some(PathBuf::from(path)),
        (true, None) => default_location(kind)?,
    };

    // Open once so the data location exists and is usable before it is saved.
    open_adapter(&AdapterConfig::new(kind, location.clone()))?;
    write_config(&config_path, &ErpConfig::new(kind, location.clone()))?;
    tracing::debug!(path = %config_path.display(), adapter = %kind, "config written");

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!("{}", badge(&ui, Badge::Ok, "Configuration written"));
        println!("{}", kv(&ui, "Config", &config_path.display().to_string()));
        println!("{}", kv(&ui, "Adapter", kind.as_str()));
        if let Some(location) = &location {
            println!("{}", kv(&ui, "Data", &location.display().to_string()));
        } else {
            println!("{}", hint(&ui, "The memory adapter keeps nothing between runs."));
        }
    }
    Ok(())
}
