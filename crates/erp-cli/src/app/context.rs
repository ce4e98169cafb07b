//! Application context for the ERP CLI.
//!
//! Bundles the parsed arguments with the lazily opened storage backend so
//! handlers do not re-resolve configuration or reopen the adapter.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use once_cell::unsync::OnceCell;

use erp_core::{open_adapter, AdapterConfig, CollectionStore, PersistenceAdapter, Record};

use crate::cli::Cli;
use crate::helpers::parse_date;
use crate::ui::UiContext;

use super::resolver::resolve_adapter_config;

pub struct AppContext<'a> {
    cli: &'a Cli,
    adapter_config: OnceCell<AdapterConfig>,
    adapter: OnceCell<Arc<dyn PersistenceAdapter>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            adapter_config: OnceCell::new(),
            adapter: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Backend selection after applying flags, env vars and config.
    pub fn adapter_config(&self) -> anyhow::Result<&AdapterConfig> {
        self.adapter_config
            .get_or_try_init(|| resolve_adapter_config(self.cli))
    }

    /// The storage backend, opened on first use.
    pub fn adapter(&self) -> anyhow::Result<Arc<dyn PersistenceAdapter>> {
        let adapter = self.adapter.get_or_try_init(|| {
            let config = self.adapter_config()?;
            tracing::debug!(adapter = %config.kind, location = ?config.location, "opening storage");
            open_adapter(config).map_err(anyhow::Error::from)
        })?;
        Ok(Arc::clone(adapter))
    }

    /// Reference date: `--today` when given, else the local calendar date.
    pub fn today(&self) -> anyhow::Result<NaiveDate> {
        match self.cli.today.as_deref() {
            Some(value) => parse_date(value),
            None => Ok(Local::now().date_naive()),
        }
    }

    /// Open the collection of `T`, seeded relative to [`today`](Self::today).
    pub fn open_store<T: Record>(&self) -> anyhow::Result<CollectionStore<T>> {
        let seed = T::seed(self.today()?);
        Ok(CollectionStore::open(self.adapter()?, seed))
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }
}
