//! Application-level utilities for the ERP CLI.
//!
//! This module provides:
//! - Config path and storage backend resolution
//! - The per-invocation context handed to every command

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{resolve_adapter_config, resolve_config_path};
