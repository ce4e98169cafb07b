use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Record;
use crate::money::Money;

/// Register a sale belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesTab {
    Vendas,
    Devolucoes,
}

impl SalesTab {
    pub const NAMES: &'static [&'static str] = &["vendas", "devolucoes"];

    pub fn as_str(self) -> &'static str {
        match self {
            SalesTab::Vendas => "vendas",
            SalesTab::Devolucoes => "devolucoes",
        }
    }
}

/// Completion state of a sale or purchase document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Concluida,
    Rascunho,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Concluida => "Concluida",
            DocumentStatus::Rascunho => "Rascunho",
        }
    }
}

/// One line of a sale or purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "produtoId")]
    pub product_id: String,
    #[serde(
        rename = "quantidade",
        deserialize_with = "crate::money::deserialize_quantity"
    )]
    pub quantity: u32,
    #[serde(rename = "valor")]
    pub unit_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "cliente")]
    pub customer: String,
    #[serde(rename = "vendedor", default)]
    pub seller: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "tipo", default)]
    pub document_type: String,
    #[serde(rename = "registro", default, skip_serializing_if = "Option::is_none")]
    pub register: Option<SalesTab>,
    #[serde(rename = "itens", default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total: Money,
    #[serde(rename = "situacao", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
}

impl Record for Sale {
    const STORAGE_KEY: &'static str = "erp.sales";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        vec![Sale {
            id: "V001".to_string(),
            customer: "Loja Centro".to_string(),
            seller: "Carlos".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap_or_default(),
            document_type: "Venda".to_string(),
            register: Some(SalesTab::Vendas),
            items: vec![LineItem {
                product_id: "P001".to_string(),
                quantity: 1,
                unit_price: Money::from_cents(152_050),
            }],
            total: Money::from_cents(152_050),
            status: Some(DocumentStatus::Concluida),
        }]
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.customer.as_str(),
            self.seller.as_str(),
            self.document_type.as_str(),
        ]
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn tab(&self) -> Option<&'static str> {
        self.register.map(SalesTab::as_str)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_browser_shape() {
        let raw = r#"{"id":"V9","cliente":"Ana","vendedor":"Bia","data":"2025-11-07",
            "tipo":"Venda","registro":"devolucoes","itens":[{"produtoId":"P002","quantidade":"2","valor":80}],
            "total":160,"situacao":"Rascunho"}"#;
        let sale: Sale = serde_json::from_str(raw).unwrap();
        assert_eq!(sale.customer, "Ana");
        assert_eq!(sale.tab(), Some("devolucoes"));
        assert_eq!(sale.items[0].quantity, 2);
        assert_eq!(sale.total.cents(), 16_000);
        assert_eq!(sale.status, Some(DocumentStatus::Rascunho));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut sale = Sale::seed(NaiveDate::default()).remove(0);
        sale.register = None;
        sale.status = None;
        let value = serde_json::to_value(&sale).unwrap();
        assert!(value.get("registro").is_none());
        assert!(value.get("situacao").is_none());
        assert_eq!(value["cliente"], "Loja Centro");
    }
}
