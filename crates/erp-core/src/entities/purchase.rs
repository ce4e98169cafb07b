use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::sale::{DocumentStatus, LineItem};
use crate::entities::Record;
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseTab {
    Compras,
}

impl PurchaseTab {
    pub const NAMES: &'static [&'static str] = &["compras"];

    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseTab::Compras => "compras",
        }
    }
}

/// A supplier invoice that moves stock in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "fornecedor")]
    pub supplier: String,
    #[serde(rename = "nota", default)]
    pub invoice_number: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "situacao", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
    #[serde(rename = "itens", default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total: Money,
    #[serde(rename = "registro", default, skip_serializing_if = "Option::is_none")]
    pub register: Option<PurchaseTab>,
}

impl Record for Purchase {
    const STORAGE_KEY: &'static str = "erp.compras";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        vec![Purchase {
            id: "C001".to_string(),
            supplier: "Fornec Uno".to_string(),
            invoice_number: "NF123".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap_or_default(),
            status: Some(DocumentStatus::Concluida),
            items: vec![LineItem {
                product_id: "P001".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(15_000),
            }],
            total: Money::from_cents(35_050),
            register: Some(PurchaseTab::Compras),
        }]
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.supplier.as_str(), self.invoice_number.as_str()]
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    // Purchases written without a register still belong to the only tab.
    fn tab(&self) -> Option<&'static str> {
        Some(self.register.unwrap_or(PurchaseTab::Compras).as_str())
    }

    fn amount(&self) -> Option<Money> {
        Some(self.total)
    }

    fn normalize(&mut self) {
        self.total = self.total.non_negative();
        for item in &mut self.items {
            item.unit_price = item.unit_price.non_negative();
        }
    }
}
