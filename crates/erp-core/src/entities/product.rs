use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Record;
use crate::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductTab {
    Produtos,
    Servicos,
    Ajuste,
}

impl ProductTab {
    pub const NAMES: &'static [&'static str] = &["produtos", "servicos", "ajuste"];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductTab::Produtos => "produtos",
            ProductTab::Servicos => "servicos",
            ProductTab::Ajuste => "ajuste",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockMovementKind {
    Ajuste,
    Venda,
    Compra,
}

/// One entry of a product's stock history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "tipo")]
    pub kind: StockMovementKind,
    #[serde(
        rename = "quantidade",
        deserialize_with = "crate::money::deserialize_quantity"
    )]
    pub quantity: u32,
}

/// A catalog item: stocked product, service, or inventory adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "preco", default)]
    pub price: Money,
    #[serde(
        rename = "estoque",
        default,
        deserialize_with = "crate::money::deserialize_quantity"
    )]
    pub stock: u32,
    #[serde(
        rename = "estoqueMinimo",
        default,
        deserialize_with = "crate::money::deserialize_optional_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_stock: Option<u32>,
    #[serde(rename = "palavras", default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: ProductTab,
    #[serde(rename = "contato", default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "documentos", default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(rename = "camposExtras", default, skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<String>,
    #[serde(rename = "movimento", default, skip_serializing_if = "Option::is_none")]
    pub movements: Option<Vec<StockMovement>>,
    #[serde(rename = "produtoId", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl Product {
    /// Whether stock has fallen under the configured minimum.
    pub fn is_below_minimum(&self) -> bool {
        self.kind == ProductTab::Produtos
            && self.min_stock.is_some_and(|minimum| self.stock < minimum)
    }

    fn blank(id: &str, name: &str, kind: ProductTab) -> Self {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: String::new(),
            price: Money::ZERO,
            stock: 0,
            min_stock: None,
            keywords: None,
            kind,
            contact: None,
            notes: None,
            date: None,
            documents: None,
            extra_fields: None,
            movements: None,
            product_id: None,
        }
    }
}

impl Record for Product {
    const STORAGE_KEY: &'static str = "erp.produtos";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        let stocked = |id, name: &str, category: &str, price, stock, minimum, keywords: &str| Product {
            category: category.to_string(),
            price: Money::from_cents(price),
            stock,
            min_stock: Some(minimum),
            keywords: Some(keywords.to_string()),
            documents: Some(Vec::new()),
            extra_fields: Some(String::new()),
            ..Product::blank(id, name, ProductTab::Produtos)
        };
        let service = |id, name: &str, price, keywords: &str| Product {
            price: Money::from_cents(price),
            keywords: Some(keywords.to_string()),
            ..Product::blank(id, name, ProductTab::Servicos)
        };

        vec![
            stocked("P001", "Notebook Pro", "Eletronicos", 520_000, 8, 2, "notebook"),
            stocked("P002", "Mouse", "Acessorios", 8_000, 120, 20, "periferico"),
            service("S001", "Instalacao", 15_000, "setup"),
            service("S002", "Manutencao", 20_000, "suporte"),
            Product {
                keywords: Some("inventario".to_string()),
                contact: Some("Equipe estoque".to_string()),
                notes: Some("Ajuste trimestral".to_string()),
                date: NaiveDate::from_ymd_opt(2025, 11, 10),
                ..Product::blank("A001", "Ajuste inventario", ProductTab::Ajuste)
            },
        ]
    }

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            Some(self.category.as_str()),
            self.keywords.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn tab(&self) -> Option<&'static str> {
        Some(self.kind.as_str())
    }

    fn amount(&self) -> Option<Money> {
        Some(self.price)
    }

    fn normalize(&mut self) {
        self.price = self.price.non_negative();
    }
}
