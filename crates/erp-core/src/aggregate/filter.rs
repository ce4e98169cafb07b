//! Record filters used by list screens.

use std::fmt;
use std::str::FromStr;

use crate::aggregate::month::MonthWindow;
use crate::entities::{FinanceEntry, FinanceStatus, Record};
use crate::error::{ErpError, Result};

/// Records dated inside `window`. Undated records never match.
pub fn filter_month<T: Record>(items: &[T], window: MonthWindow) -> Vec<&T> {
    items
        .iter()
        .filter(|item| item.date().is_some_and(|date| window.contains(date)))
        .collect()
}

/// Case-insensitive substring match over the record's searchable fields.
/// An empty or blank query matches everything.
pub fn matches_text<T: Record>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

pub fn filter_text<'a, T: Record>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches_text(*item, query)).collect()
}

/// Records whose tab tag equals `tab`.
pub fn filter_tab<'a, T: Record>(items: &'a [T], tab: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.tab() == Some(tab)).collect()
}

/// Settlement filter of the finance screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Anything not yet paid.
    Pending,
    /// Paid or received.
    Settled,
}

impl StatusFilter {
    pub fn matches(self, entry: &FinanceEntry) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => entry.status != FinanceStatus::Pago,
            StatusFilter::Settled => entry.status.is_settled(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "todos",
            StatusFilter::Pending => "pendente",
            StatusFilter::Settled => "quitado",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ErpError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todos" | "all" => Ok(StatusFilter::All),
            "pendente" | "pending" => Ok(StatusFilter::Pending),
            "quitado" | "settled" => Ok(StatusFilter::Settled),
            other => Err(ErpError::InvalidInput(format!(
                "Unknown status filter \"{}\" (use todos, pendente or quitado)",
                other
            ))),
        }
    }
}

/// Composed list filter. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub month: Option<MonthWindow>,
    pub tab: Option<String>,
    pub text: Option<String>,
}

impl RecordFilter {
    pub fn matches<T: Record>(&self, item: &T) -> bool {
        if let Some(window) = self.month {
            if !item.date().is_some_and(|date| window.contains(date)) {
                return false;
            }
        }
        if let Some(tab) = &self.tab {
            if item.tab() != Some(tab.as_str()) {
                return false;
            }
        }
        match &self.text {
            Some(query) => matches_text(item, query),
            None => true,
        }
    }

    pub fn apply<'a, T: Record>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{FinanceKind, Product};
    use crate::money::Money;
    use chrono::NaiveDate;

    fn entry(kind: FinanceKind, description: &str, day: u32, status: FinanceStatus) -> FinanceEntry {
        FinanceEntry {
            status,
            ..FinanceEntry::new(
                kind,
                description,
                NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
                Money::from_cents(100),
            )
        }
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let products = Product::seed(NaiveDate::default());
        let hits = filter_text(&products, "NOTE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "P001");
        assert_eq!(filter_text(&products, "  ").len(), products.len());
        assert_eq!(filter_text(&products, "periferico")[0].id, "P002");
    }

    #[test]
    fn test_tab_and_month() {
        let products = Product::seed(NaiveDate::default());
        assert_eq!(filter_tab(&products, "servicos").len(), 2);
        let november = MonthWindow::new(2025, 11).unwrap();
        let dated = filter_month(&products, november);
        assert_eq!(dated.len(), 1);
        assert_eq!(dated[0].id, "A001");
    }

    #[test]
    fn test_status_filter() {
        let paid = entry(FinanceKind::Pagamento, "luz", 3, FinanceStatus::Pago);
        let received = entry(FinanceKind::Recebimento, "venda", 3, FinanceStatus::Recebido);
        let pending = entry(FinanceKind::Recebimento, "consultoria", 3, FinanceStatus::Pendente);

        assert!(!StatusFilter::Pending.matches(&paid));
        assert!(StatusFilter::Pending.matches(&received));
        assert!(StatusFilter::Pending.matches(&pending));
        assert!(StatusFilter::Settled.matches(&received));
        assert!(!StatusFilter::Settled.matches(&pending));
        assert_eq!("quitado".parse::<StatusFilter>().unwrap(), StatusFilter::Settled);
    }

    #[test]
    fn test_composed_filter() {
        let entries = vec![
            entry(FinanceKind::Pagamento, "Aluguel", 5, FinanceStatus::Pendente),
            entry(FinanceKind::Recebimento, "Aluguel sala", 5, FinanceStatus::Pendente),
            entry(FinanceKind::Recebimento, "Venda", 6, FinanceStatus::Pendente),
        ];
        let filter = RecordFilter {
            month: Some(MonthWindow::new(2025, 11).unwrap()),
            tab: Some("recebimentos".to_string()),
            text: Some("aluguel".to_string()),
        };
        let hits = filter.apply(&entries);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Aluguel sala");
    }
}
