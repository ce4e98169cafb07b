//! ERP CLI - records, finance ledger and dashboards kept in local storage
//!
//! This is the command-line interface for ERP. Storage, records and
//! aggregations live in `erp-core`; this crate parses arguments, resolves
//! configuration and renders results.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;
use erp_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{favorites, finance, init, maintenance, misc, records};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let rendered = format!("{:#}", e);
        let (message, hint) = split_hint(&rendered);
        let hint = hint.map(str::to_string).or_else(|| contextual_hint(message));
        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Split "message\nHint: ..." into its two parts.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(&error[idx + 1..])),
        None => (error, None),
    }
}

/// Hints for core errors that carry none of their own.
fn contextual_hint(message: &str) -> Option<String> {
    let lower = message.to_lowercase();

    if lower.contains("unknown entity kind") {
        return Some("Hint: Kinds are sales, purchases, contacts, products, users and finance.".to_string());
    }
    if lower.contains("unknown adapter") || lower.contains("needs a data location") {
        return Some(
            "Hint: Pass --adapter file|sqlite|memory and --data <path>, or run `erp init`.".to_string(),
        );
    }
    if lower.contains("validation error") {
        return Some(
            "Hint: Run `erp show <kind> <id> --json` to see the stored field names.".to_string(),
        );
    }
    if lower.contains("failed to parse config") {
        return Some("Hint: Fix the file or rewrite it with `erp init --force`.".to_string());
    }
    if lower.contains("storage error") {
        return Some("Hint: Run `erp doctor` to check the data location.".to_string());
    }
    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::List(args)) => records::handle_list(ctx, args)?,
        Some(Commands::Show(args)) => records::handle_show(ctx, args)?,
        Some(Commands::Add(args)) => records::handle_add(ctx, args)?,
        Some(Commands::Update(args)) => records::handle_update(ctx, args)?,
        Some(Commands::Remove(args)) => records::handle_remove(ctx, args)?,
        Some(Commands::Reset(args)) => records::handle_reset(ctx, args)?,
        Some(Commands::Summary(args)) => finance::handle_summary(ctx, args)?,
        Some(Commands::Dashboard(args)) => finance::handle_dashboard(ctx, args)?,
        Some(Commands::Favorites(args)) => favorites::handle_favorites(ctx, args)?,
        Some(Commands::Doctor(args)) => maintenance::handle_doctor(ctx, args)?,
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            println!("ERP v{}", VERSION);
            println!("\nQuickstart:");
            println!("  erp init");
            println!("  erp list finance --month 2025-11");
            println!("  erp add finance --field tipo=pagamento --field data=2025-11-10 --field situacao=Pendente --field valor:=120");
            println!("  erp summary");
            println!("  erp dashboard");
            println!("\nRun `erp --help` for full usage.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hint() {
        assert_eq!(
            split_hint("No sales record\nHint: Run `erp list sales`."),
            ("No sales record", Some("Hint: Run `erp list sales`."))
        );
        assert_eq!(split_hint("plain failure"), ("plain failure", None));
    }

    #[test]
    fn test_contextual_hint() {
        assert!(contextual_hint("Invalid input: Unknown entity kind \"x\"").is_some());
        assert!(contextual_hint("something else").is_none());
    }
}
