//! Finance totals: due-date summary, monthly result and KPIs.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::aggregate::month::MonthWindow;
use crate::entities::{FinanceEntry, FinanceKind, FinanceStatus, Record};
use crate::money::Money;

/// Days after today covered by the "this week" totals.
pub const WEEK_SPAN_DAYS: i64 = 7;

/// Sum of record amounts. Records without an amount count as zero.
pub fn sum_amounts<'a, T, I>(items: I) -> Money
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().filter_map(T::amount).sum()
}

fn sum_where<'a>(
    entries: impl IntoIterator<Item = &'a FinanceEntry>,
    predicate: impl Fn(&FinanceEntry) -> bool,
) -> Money {
    entries
        .into_iter()
        .filter(|&entry| predicate(entry))
        .map(|entry| entry.amount)
        .sum()
}

/// Receivables and payables due today and over the coming week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FinanceSummary {
    pub receivable_today: Money,
    pub payable_today: Money,
    pub receivable_week: Money,
    pub payable_week: Money,
}

impl FinanceSummary {
    /// "Today" is `date == today`; "week" is `today..=today + 7 days`.
    pub fn compute(entries: &[FinanceEntry], today: NaiveDate) -> Self {
        let week_end = today + Duration::days(WEEK_SPAN_DAYS);
        let due_today = |kind: FinanceKind| {
            sum_where(entries, |e| e.kind == kind && e.date == today)
        };
        let due_week = |kind: FinanceKind| {
            sum_where(entries, |e| e.kind == kind && e.date >= today && e.date <= week_end)
        };

        FinanceSummary {
            receivable_today: due_today(FinanceKind::Recebimento),
            payable_today: due_today(FinanceKind::Pagamento),
            receivable_week: due_week(FinanceKind::Recebimento),
            payable_week: due_week(FinanceKind::Pagamento),
        }
    }

    /// Expected net cash over the week; may be negative.
    pub fn week_flow(&self) -> Money {
        self.receivable_week - self.payable_week
    }
}

/// Revenue and costs booked in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthResult {
    pub window: MonthWindow,
    pub revenue: Money,
    pub costs: Money,
    pub pending_receivable: Money,
    pub pending_payable: Money,
}

impl MonthResult {
    pub fn compute(entries: &[FinanceEntry], window: MonthWindow) -> Self {
        let in_month = |kind: FinanceKind, pending_only: bool| {
            sum_where(entries, |e| {
                e.kind == kind
                    && window.contains(e.date)
                    && (!pending_only || e.status == FinanceStatus::Pendente)
            })
        };

        MonthResult {
            window,
            revenue: in_month(FinanceKind::Recebimento, false),
            costs: in_month(FinanceKind::Pagamento, false),
            pending_receivable: in_month(FinanceKind::Recebimento, true),
            pending_payable: in_month(FinanceKind::Pagamento, true),
        }
    }

    /// Revenue minus costs; may be negative.
    pub fn balance(&self) -> Money {
        self.revenue - self.costs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiId {
    Receita,
    Custos,
    Saldo,
    Fluxo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Danger,
    Neutral,
}

/// One dashboard headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub id: KpiId,
    pub title: &'static str,
    pub value: Money,
    pub tone: Tone,
}

/// Headline figures: month revenue, month costs, month balance and the
/// next-seven-days flow.
pub fn kpis(month: &MonthResult, summary: &FinanceSummary) -> Vec<Kpi> {
    vec![
        Kpi {
            id: KpiId::Receita,
            title: "Faturamento do mes",
            value: month.revenue,
            tone: Tone::Success,
        },
        Kpi {
            id: KpiId::Custos,
            title: "Custos do mes",
            value: month.costs,
            tone: Tone::Danger,
        },
        Kpi {
            id: KpiId::Saldo,
            title: "Saldo do mes",
            value: month.balance(),
            tone: Tone::Neutral,
        },
        Kpi {
            id: KpiId::Fluxo,
            title: "Fluxo prox. 7 dias",
            value: summary.week_flow(),
            tone: Tone::Neutral,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, d).unwrap()
    }

    fn entry(kind: FinanceKind, date: NaiveDate, cents: i64) -> FinanceEntry {
        FinanceEntry::new(kind, "x", date, Money::from_cents(cents))
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let empty: Vec<FinanceEntry> = Vec::new();
        assert_eq!(sum_amounts(&empty), Money::ZERO);
        assert_eq!(FinanceSummary::compute(&empty, day(1)), FinanceSummary::default());
    }

    #[test]
    fn test_week_window_is_inclusive() {
        let today = day(10);
        let entries = vec![
            entry(FinanceKind::Recebimento, day(9), 1),
            entry(FinanceKind::Recebimento, day(10), 10),
            entry(FinanceKind::Recebimento, day(17), 100),
            entry(FinanceKind::Recebimento, day(18), 1_000),
            entry(FinanceKind::Pagamento, day(10), 20),
            entry(FinanceKind::Pagamento, day(12), 200),
            entry(FinanceKind::Recibo, day(10), 5_000),
        ];
        let summary = FinanceSummary::compute(&entries, today);
        assert_eq!(summary.receivable_today.cents(), 10);
        assert_eq!(summary.payable_today.cents(), 20);
        assert_eq!(summary.receivable_week.cents(), 110);
        assert_eq!(summary.payable_week.cents(), 220);
        assert_eq!(summary.week_flow().cents(), -110);
    }

    #[test]
    fn test_month_result_and_kpis() {
        let mut pending = entry(FinanceKind::Recebimento, day(20), 80_000);
        pending.status = FinanceStatus::Pendente;
        let mut received = entry(FinanceKind::Recebimento, day(2), 120_000);
        received.status = FinanceStatus::Recebido;
        let mut paid = entry(FinanceKind::Pagamento, day(2), 250_000);
        paid.status = FinanceStatus::Pago;
        let december = entry(
            FinanceKind::Pagamento,
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            9_999,
        );
        let entries = vec![pending, received, paid, december];

        let month = MonthResult::compute(&entries, MonthWindow::containing(day(1)));
        assert_eq!(month.revenue.cents(), 200_000);
        assert_eq!(month.costs.cents(), 250_000);
        assert_eq!(month.pending_receivable.cents(), 80_000);
        assert_eq!(month.pending_payable, Money::ZERO);
        assert_eq!(month.balance().to_string(), "-500.00");

        let summary = FinanceSummary::compute(&entries, day(15));
        let kpis = kpis(&month, &summary);
        let ids: Vec<_> = kpis.iter().map(|k| k.id).collect();
        assert_eq!(ids, vec![KpiId::Receita, KpiId::Custos, KpiId::Saldo, KpiId::Fluxo]);
        assert_eq!(kpis[3].value.cents(), 80_000);
    }
}
