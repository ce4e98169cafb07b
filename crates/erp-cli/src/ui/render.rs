//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{bold, dim, Badge};

/// Column definition for table rendering.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Right-align (amounts, counts).
    pub numeric: bool,
}

impl Column {
    pub const fn text(header: &'static str) -> Self {
        Self {
            header,
            numeric: false,
        }
    }

    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            numeric: true,
        }
    }
}

/// Pretty: "ERP · command (context)". Plain: "erp command". JSON: nothing.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = bold("ERP", ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("erp {}", command),
        OutputMode::Json => String::new(),
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = kind.paint(kind.display(ctx.unicode), ctx.color);
    if message.is_empty() {
        marker
    } else {
        format!("{} {}", marker, message)
    }
}

/// Pretty: "Key: value" with a dim key. Plain: "key=value".
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", dim(&format!("{}:", key), ctx.color), value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", dim("Hint:", ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Bordered table in pretty mode; tab-free, header-less rows in plain mode.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(u16::try_from(ctx.width).unwrap_or(u16::MAX));
    table.set_header(columns.iter().map(|c| Cell::new(c.header)));

    for row in rows {
        table.add_row(row.iter().zip(columns).map(|(value, column)| {
            let cell = Cell::new(value);
            if column.numeric {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            }
        }));
    }
    table.to_string()
}

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Pretty: badge plus hint line. Plain/JSON: `error=` and `hint=` lines.
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(dim(h, ctx.color));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h.trim_start_matches("Hint: ")));
        }
    }
    lines.join("\n")
}

pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            width: 100,
            mode,
        }
    }

    #[test]
    fn test_header_modes() {
        assert_eq!(header(&ctx(OutputMode::Plain), "list", Some("sales")), "erp list");
        assert_eq!(
            header(&ctx(OutputMode::Pretty), "list", Some("sales")),
            "ERP \u{00B7} list (sales)"
        );
        assert!(header(&ctx(OutputMode::Json), "list", None).is_empty());
    }

    #[test]
    fn test_kv_plain_normalizes_key() {
        assert_eq!(kv(&ctx(OutputMode::Plain), "Week flow", "10"), "week_flow=10");
        assert_eq!(kv(&ctx(OutputMode::Pretty), "Week flow", "10"), "Week flow: 10");
    }

    #[test]
    fn test_plain_table_has_no_header() {
        let columns = [Column::text("ID"), Column::numeric("Total")];
        let rows = vec![vec!["V001".to_string(), "10,00".to_string()]];
        assert_eq!(table(&ctx(OutputMode::Plain), &columns, &rows), "V001 10,00");
    }

    #[test]
    fn test_pretty_table_has_header() {
        let columns = [Column::text("ID"), Column::numeric("Total")];
        let rows = vec![vec!["V001".to_string(), "10,00".to_string()]];
        let out = table(&ctx(OutputMode::Pretty), &columns, &rows);
        assert!(out.contains("ID"));
        assert!(out.contains("V001"));
    }

    #[test]
    fn test_error_message_plain() {
        let out = error_message(
            &ctx(OutputMode::Plain),
            "Sale V9 not found",
            Some("Hint: Run `erp list sales`."),
        );
        assert_eq!(out, "error=Sale V9 not found\nhint=Run `erp list sales`.");
    }
}
