use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::aggregate::finance::{kpis, FinanceSummary, Kpi, MonthResult};
use crate::aggregate::month::MonthWindow;
use crate::entities::{FinanceEntry, FinanceKind, Product};
use crate::money::Money;

/// Label of the slice shown when there is nothing to chart.
pub const EMPTY_SLICE_LABEL: &str = "Sem dados";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: Money,
}

/// Entry amounts grouped by finance kind, in order of first appearance.
pub fn pie_data(entries: &[FinanceEntry]) -> Vec<PieSlice> {
    if entries.is_empty() {
        return vec![PieSlice {
            name: EMPTY_SLICE_LABEL.to_string(),
            value: Money::from_cents(100),
        }];
    }
    let mut groups: Vec<(FinanceKind, Money)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(kind, _)| *kind == entry.kind) {
            Some((_, total)) => *total += entry.amount,
            None => groups.push((entry.kind, entry.amount)),
        }
    }
    groups
        .into_iter()
        .map(|(kind, value)| PieSlice {
            name: kind.as_str().to_string(),
            value,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyNet {
    pub date: NaiveDate,
    pub net: Money,
}

/// Receipts minus payments per day for the `days` days ending at `end`,
/// oldest first.
pub fn daily_net(entries: &[FinanceEntry], end: NaiveDate, days: u32) -> Vec<DailyNet> {
    (0..i64::from(days))
        .rev()
        .map(|back| {
            let date = end - Duration::days(back);
            let net = entries
                .iter()
                .filter(|entry| entry.date == date)
                .fold(Money::ZERO, |net, entry| match entry.kind {
                    FinanceKind::Recebimento => net + entry.amount,
                    FinanceKind::Pagamento => net - entry.amount,
                    FinanceKind::Recibo => net,
                });
            DailyNet { date, net }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTone {
    Warn,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: String,
    pub text: String,
    pub tone: AlertTone,
}

pub fn alerts(entries: &[FinanceEntry], products: &[Product]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if entries.is_empty() {
        alerts.push(Alert {
            id: "empty".to_string(),
            text: "Nenhum registro cadastrado".to_string(),
            tone: AlertTone::Info,
        });
    }
    for product in products.iter().filter(|p| p.is_below_minimum()) {
        alerts.push(Alert {
            id: format!("low-stock-{}", product.id),
            text: format!(
                "Estoque baixo: {} ({} de {})",
                product.name,
                product.stock,
                product.min_stock.unwrap_or_default()
            ),
            tone: AlertTone::Warn,
        });
    }
    alerts
}

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub month: MonthResult,
    pub month_label: String,
    pub summary: FinanceSummary,
    pub kpis: Vec<Kpi>,
    pub pie: Vec<PieSlice>,
    pub daily_net: Vec<DailyNet>,
    pub alerts: Vec<Alert>,
}

impl Dashboard {
    pub fn build(
        entries: &[FinanceEntry],
        products: &[Product],
        window: MonthWindow,
        today: NaiveDate,
        days: u32,
    ) -> Self {
        let month = MonthResult::compute(entries, window);
        let summary = FinanceSummary::compute(entries, today);
        Dashboard {
            today,
            month_label: window.label(),
            kpis: kpis(&month, &summary),
            month,
            summary,
            pie: pie_data(entries),
            daily_net: daily_net(entries, today, days),
            alerts: alerts(entries, products),
        }
    }
}
