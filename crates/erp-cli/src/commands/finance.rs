//! Finance summary and dashboard commands.

use serde::Serialize;

use erp_core::aggregate::{Dashboard, FinanceSummary, MonthWindow};
use erp_core::entities::{FinanceEntry, Product};

use crate::app::AppContext;
use crate::cli::{DashboardArgs, SummaryArgs};
use crate::errors::CliError;
use crate::helpers::parse_month;
use crate::ui::theme::{signed, toned};
use crate::ui::{badge, brl, header, kv, print_json, signed_brl, table, Badge, Column, UiContext};

/// Longest daily series the dashboard accepts.
const MAX_DAYS: u32 = 366;

#[derive(Serialize)]
struct SummaryReport {
    today: chrono::NaiveDate,
    #[serde(flatten)]
    summary: FinanceSummary,
    week_flow: erp_core::Money,
}

pub fn handle_summary(ctx: &AppContext, args: &SummaryArgs) -> anyhow::Result<()> {
    let today = ctx.today()?;
    let store = ctx.open_store::<FinanceEntry>()?;
    let summary = FinanceSummary::compute(store.items(), today);

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&SummaryReport {
            today,
            summary,
            week_flow: summary.week_flow(),
        });
    }

    if !ctx.quiet() {
        println!("{}", header(&ui, "summary", Some(&today.to_string())));
    }
    println!("{}", kv(&ui, "Receivable today", &brl(summary.receivable_today)));
    println!("{}", kv(&ui, "Payable today", &brl(summary.payable_today)));
    println!("{}", kv(&ui, "Receivable week", &brl(summary.receivable_week)));
    println!("{}", kv(&ui, "Payable week", &brl(summary.payable_week)));
    let flow = summary.week_flow();
    println!(
        "{}",
        kv(&ui, "Week flow", &signed(&signed_brl(flow), flow, ui.color))
    );
    Ok(())
}

pub fn handle_dashboard(ctx: &AppContext, args: &DashboardArgs) -> anyhow::Result<()> {
    if args.days == 0 || args.days > MAX_DAYS {
        return Err(CliError::invalid_input(format!(
            "--days must be between 1 and {}",
            MAX_DAYS
        ))
        .into());
    }
    let today = ctx.today()?;
    let window = match args.month.as_deref() {
        Some(value) => parse_month(value)?,
        None => MonthWindow::containing(today),
    };

    let entries = ctx.open_store::<FinanceEntry>()?;
    let products = ctx.open_store::<Product>()?;
    let dashboard = Dashboard::build(entries.items(), products.items(), window, today, args.days);

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&dashboard);
    }
    render_dashboard(ctx, &ui, &dashboard);
    Ok(())
}

fn render_dashboard(ctx: &AppContext, ui: &UiContext, dashboard: &Dashboard) {
    if !ctx.quiet() {
        println!("{}", header(ui, "dashboard", Some(&dashboard.month_label)));
    }

    for kpi in &dashboard.kpis {
        println!("{}", kv(ui, kpi.title, &toned(&brl(kpi.value), kpi.tone, ui.color)));
    }
    println!(
        "{}",
        kv(ui, "A receber (mes)", &brl(dashboard.month.pending_receivable))
    );
    println!("{}", kv(ui, "A pagar (mes)", &brl(dashboard.month.pending_payable)));

    if ui.mode.is_pretty() {
        println!();
    }
    let pie_rows: Vec<Vec<String>> = dashboard
        .pie
        .iter()
        .map(|slice| vec![slice.name.clone(), brl(slice.value)])
        .collect();
    println!(
        "{}",
        table(ui, &[Column::text("Tipo"), Column::numeric("Valor")], &pie_rows)
    );

    if ui.mode.is_pretty() {
        println!();
    }
    let daily_rows: Vec<Vec<String>> = dashboard
        .daily_net
        .iter()
        .map(|day| vec![day.date.to_string(), signed(&signed_brl(day.net), day.net, ui.color)])
        .collect();
    println!(
        "{}",
        table(ui, &[Column::text("Dia"), Column::numeric("Saldo")], &daily_rows)
    );

    for alert in &dashboard.alerts {
        println!("{}", badge(ui, Badge::from(alert.tone), &alert.text));
    }
}
