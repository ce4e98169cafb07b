//! `erp doctor`: configuration and stored-data diagnostics.

use serde::Serialize;
use serde_json::Value;

use erp_core::entities::FAVORITES_KEY;
use erp_core::storage::envelope::{decode, Decoded, CURRENT_SCHEMA_VERSION};
use erp_core::{EntityKind, PersistenceAdapter};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::DoctorArgs;
use crate::ui::{badge, header, kv, print_json, table, Badge, Column};

/// State of one storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum KeyState {
    /// Nothing stored; defaults load on next use.
    Missing,
    Current { records: usize },
    Outdated { version: u32, records: usize },
    /// Some records do not decode and are dropped on the next write.
    Partial { records: usize, skipped: usize },
    Newer { version: u32 },
    Malformed { reason: String },
}

impl KeyState {
    fn is_healthy(&self) -> bool {
        !matches!(
            self,
            KeyState::Partial { .. } | KeyState::Newer { .. } | KeyState::Malformed { .. }
        )
    }

    fn describe(&self) -> String {
        match self {
            KeyState::Missing => "not stored".to_string(),
            KeyState::Current { records } => format!("{} records", records),
            KeyState::Outdated { version, records } => {
                format!("{} records (v{}, migrates on next use)", records, version)
            }
            KeyState::Partial { records, skipped } => {
                format!("{} records, {} unreadable", records, skipped)
            }
            KeyState::Newer { version } => {
                format!("written by a newer build (v{}, this build reads v{})", version, CURRENT_SCHEMA_VERSION)
            }
            KeyState::Malformed { reason } => format!("unreadable: {}", reason),
        }
    }
}

#[derive(Serialize)]
struct KeyReport {
    key: String,
    #[serde(flatten)]
    state: KeyState,
}

#[derive(Serialize)]
struct DoctorReport {
    ok: bool,
    config_path: String,
    config_present: bool,
    adapter: String,
    location: Option<String>,
    keys: Vec<KeyReport>,
}

pub fn handle_doctor(ctx: &AppContext, args: &DoctorArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    let adapter_config = ctx.adapter_config()?.clone();
    let adapter = ctx.adapter()?;

    let mut keys: Vec<KeyReport> = EntityKind::ALL
        .iter()
        .map(|&kind| KeyReport {
            key: kind.storage_key().to_string(),
            state: collection_state(adapter.as_ref(), kind),
        })
        .collect();
    keys.push(KeyReport {
        key: FAVORITES_KEY.to_string(),
        state: favorites_state(adapter.as_ref()),
    });
    for extra in adapter.keys()? {
        if !keys.iter().any(|report| report.key == extra) {
            keys.push(KeyReport {
                key: extra,
                state: KeyState::Malformed {
                    reason: "unknown key".to_string(),
                },
            });
        }
    }

    let report = DoctorReport {
        ok: keys.iter().all(|report| report.state.is_healthy()),
        config_present: config_path.exists(),
        config_path: config_path.display().to_string(),
        adapter: adapter_config.kind.to_string(),
        location: adapter_config
            .location
            .as_ref()
            .map(|path| path.display().to_string()),
        keys,
    };

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&report);
    }

    if !ctx.quiet() {
        println!("{}", header(&ui, "doctor", None));
    }
    let config_note = if report.config_present { "" } else { " (missing, using defaults)" };
    println!("{}", kv(&ui, "Config", &format!("{}{}", report.config_path, config_note)));
    println!("{}", kv(&ui, "Adapter", &report.adapter));
    println!(
        "{}",
        kv(&ui, "Data", report.location.as_deref().unwrap_or("in memory"))
    );

    let rows: Vec<Vec<String>> = report
        .keys
        .iter()
        .map(|r| vec![r.key.clone(), r.state.describe()])
        .collect();
    println!("{}", table(&ui, &[Column::text("Key"), Column::text("State")], &rows));

    if report.ok {
        println!("{}", badge(&ui, Badge::Ok, "Storage looks healthy"));
    } else {
        println!("{}", badge(&ui, Badge::Warn, "Some keys need attention"));
    }
    Ok(())
}

fn collection_state(adapter: &dyn PersistenceAdapter, kind: EntityKind) -> KeyState {
    let raw = match read_json(adapter, kind.storage_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return KeyState::Missing,
        Err(reason) => return KeyState::Malformed { reason },
    };
    with_record_type!(kind, R => match decode::<R>(raw) {
        Decoded::Current { records, skipped } | Decoded::Migrated { records, skipped, .. }
            if !skipped.is_empty() =>
        {
            KeyState::Partial {
                records: records.len(),
                skipped: skipped.len(),
            }
        }
        Decoded::Current { records, .. } => KeyState::Current { records: records.len() },
        Decoded::Migrated { from, records, .. } => KeyState::Outdated {
            version: from,
            records: records.len(),
        },
        Decoded::Newer(version) => KeyState::Newer { version },
        Decoded::Malformed(reason) => KeyState::Malformed { reason },
    })
}

fn favorites_state(adapter: &dyn PersistenceAdapter) -> KeyState {
    match read_json(adapter, FAVORITES_KEY) {
        Ok(None) => KeyState::Missing,
        Ok(Some(Value::Array(ids))) => KeyState::Current { records: ids.len() },
        Ok(Some(_)) => KeyState::Malformed {
            reason: "expected a list of report ids".to_string(),
        },
        Err(reason) => KeyState::Malformed { reason },
    }
}

fn read_json(adapter: &dyn PersistenceAdapter, key: &str) -> Result<Option<Value>, String> {
    match adapter.read_raw(key) {
        Ok(None) => Ok(None),
        Ok(Some(raw)) => serde_json::from_str(&raw).map(Some).map_err(|e| e.to_string()),
        Err(err) => Err(err.to_string()),
    }
}
