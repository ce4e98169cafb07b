//! Pure aggregations over collections.
//!
//! Nothing here touches storage; every function takes a slice of records
//! and, where relevant, a reference date.

pub mod dashboard;
pub mod filter;
pub mod finance;
pub mod month;

pub use dashboard::{alerts, daily_net, pie_data, Alert, AlertTone, Dashboard, DailyNet, PieSlice};
pub use filter::{filter_month, filter_tab, filter_text, matches_text, RecordFilter, StatusFilter};
pub use finance::{kpis, sum_amounts, FinanceSummary, Kpi, KpiId, MonthResult, Tone};
pub use month::MonthWindow;
