//! Generic record commands: list, show, add, update, remove, reset.

use serde_json::Value;

use erp_core::aggregate::{sum_amounts, RecordFilter, StatusFilter};
use erp_core::entities::FinanceEntry;
use erp_core::{EntityKind, PersistenceAdapter};

use crate::app::AppContext;
use crate::cli::{AddArgs, ListArgs, RemoveArgs, ResetArgs, ShowArgs, UpdateArgs};
use crate::errors::CliError;
use crate::helpers::{parse_kind, parse_month, parse_status, record_input};
use crate::output::Tabular;
use crate::ui::{
    badge, brl, header, hint, kv, print_json, table, validate_format, Badge, UiContext,
};

use super::ensure_saved;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    validate_format(args.format.as_deref())?;
    let filter = build_filter(kind, args)?;
    let status = args.status.as_deref().map(parse_status).transpose()?;
    if status.is_some() && kind != EntityKind::Finance {
        return Err(CliError::invalid_input("--status only applies to finance").into());
    }

    let ui = ctx.ui_context(args.json, args.format.as_deref());
    match kind {
        EntityKind::Finance => list_finance(ctx, &ui, &filter, status.unwrap_or_default()),
        _ => with_record_type!(kind, R => list_records::<R>(ctx, &ui, kind, &filter)),
    }
}

fn build_filter(kind: EntityKind, args: &ListArgs) -> anyhow::Result<RecordFilter> {
    let month = match args.month.as_deref() {
        Some(_) if !kind.is_dated() => {
            return Err(CliError::invalid_input(format!("{} records have no date", kind)).into())
        }
        Some(value) => Some(parse_month(value)?),
        None => None,
    };

    let tab = match args.tab.as_deref().map(str::trim) {
        Some(tab) if !kind.tabs().contains(&tab) => {
            let accepted = if kind.tabs().is_empty() {
                "none".to_string()
            } else {
                kind.tabs().join(", ")
            };
            return Err(CliError::invalid_input(format!(
                "Unknown tab \"{}\" for {} (accepted: {})",
                tab, kind, accepted
            ))
            .into());
        }
        other => other.map(str::to_string),
    };

    let text = args
        .search
        .as_deref()
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_string);

    Ok(RecordFilter { month, tab, text })
}

fn list_records<R: Tabular>(
    ctx: &AppContext,
    ui: &UiContext,
    kind: EntityKind,
    filter: &RecordFilter,
) -> anyhow::Result<()> {
    let store = ctx.open_store::<R>()?;
    let matches = filter.apply(store.items());
    render_list(ctx, ui, kind, &matches, None)
}

fn list_finance(
    ctx: &AppContext,
    ui: &UiContext,
    filter: &RecordFilter,
    status: StatusFilter,
) -> anyhow::Result<()> {
    let store = ctx.open_store::<FinanceEntry>()?;
    let matches: Vec<&FinanceEntry> = filter
        .apply(store.items())
        .into_iter()
        .filter(|entry| status.matches(entry))
        .collect();
    let total = sum_amounts(matches.iter().copied());
    render_list(ctx, ui, EntityKind::Finance, &matches, Some(brl(total)))
}

fn render_list<R: Tabular>(
    ctx: &AppContext,
    ui: &UiContext,
    kind: EntityKind,
    records: &[&R],
    total: Option<String>,
) -> anyhow::Result<()> {
    if ui.mode.is_json() {
        return print_json(records);
    }
    if !ctx.quiet() {
        println!("{}", header(ui, "list", Some(kind.as_str())));
    }
    if records.is_empty() {
        if !ctx.quiet() {
            println!("{}", hint(ui, &format!("No {} records match.", kind)));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records.iter().map(|record| record.row()).collect();
    println!("{}", table(ui, R::COLUMNS, &rows));
    if !ctx.quiet() {
        println!("{}", kv(ui, "Count", &records.len().to_string()));
        if let Some(total) = total {
            println!("{}", kv(ui, "Total", &total));
        }
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    let record = with_record_type!(kind, R => {
        let store = ctx.open_store::<R>()?;
        match store.get(&args.id) {
            Some(record) => serde_json::to_value(record)?,
            None => return Err(not_found(kind, &args.id)),
        }
    });

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&record);
    }
    println!("{}", header(&ui, "show", Some(kind.as_str())));
    if let Value::Object(fields) = &record {
        for (field, value) in fields {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            println!("{}", kv(&ui, field, &text));
        }
    }
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    let draft = record_input(&args.input)?;
    let id = with_record_type!(kind, R => {
        let mut store = ctx.open_store::<R>()?;
        let id = store.add_json(draft)?;
        ensure_saved(&store)?;
        id
    });

    let ui = ctx.ui_context(false, None);
    if ui.mode.is_pretty() && !ctx.quiet() {
        println!("{}", badge(&ui, Badge::Ok, &format!("Added {} {}", kind, id)));
    } else {
        println!("{}", id);
    }
    Ok(())
}

pub fn handle_update(ctx: &AppContext, args: &UpdateArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    let patch = record_input(&args.input)?;
    with_record_type!(kind, R => {
        let mut store = ctx.open_store::<R>()?;
        if !store.update(&args.id, &patch)? {
            return Err(not_found(kind, &args.id));
        }
        ensure_saved(&store)?;
    });

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!("{}", badge(&ui, Badge::Ok, &format!("Updated {} {}", kind, args.id)));
    }
    Ok(())
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    let removed = with_record_type!(kind, R => {
        let mut store = ctx.open_store::<R>()?;
        let removed = store.remove(&args.ids);
        ensure_saved(&store)?;
        removed
    });

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!("{}", kv(&ui, "Removed", &removed.to_string()));
    }
    Ok(())
}

pub fn handle_reset(ctx: &AppContext, args: &ResetArgs) -> anyhow::Result<()> {
    let kind = parse_kind(&args.kind)?;
    ctx.adapter()?.remove(kind.storage_key())?;
    tracing::debug!(key = kind.storage_key(), "collection reset");

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None);
        println!(
            "{}",
            badge(&ui, Badge::Ok, &format!("Reset {}; defaults load on next use", kind))
        );
    }
    Ok(())
}

fn not_found(kind: EntityKind, id: &str) -> anyhow::Error {
    CliError::not_found(
        format!("No {} record with id \"{}\"", kind, id),
        format!("Hint: Run `erp list {}` to see record IDs.", kind),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args(kind: &str) -> ListArgs {
        ListArgs {
            kind: kind.to_string(),
            month: None,
            tab: None,
            search: None,
            status: None,
            json: false,
            format: None,
        }
    }

    #[test]
    fn test_filter_from_args() {
        let mut args = list_args("finance");
        args.month = Some("2025-11".to_string());
        args.tab = Some("pagamentos".to_string());
        args.search = Some("  aluguel ".to_string());

        let filter = build_filter(EntityKind::Finance, &args).unwrap();
        assert_eq!(filter.month.map(|m| m.to_string()).as_deref(), Some("2025-11"));
        assert_eq!(filter.tab.as_deref(), Some("pagamentos"));
        assert_eq!(filter.text.as_deref(), Some("aluguel"));
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        let mut args = list_args("contacts");
        args.search = Some("   ".to_string());
        assert!(build_filter(EntityKind::Contacts, &args).unwrap().text.is_none());
    }

    #[test]
    fn test_filter_rejects_unknown_tab_and_undated_month() {
        let mut args = list_args("sales");
        args.tab = Some("servicos".to_string());
        assert!(build_filter(EntityKind::Sales, &args).is_err());

        let mut args = list_args("users");
        args.month = Some("2025-11".to_string());
        assert!(build_filter(EntityKind::Users, &args).is_err());
    }
}
