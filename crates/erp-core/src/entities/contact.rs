use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactTab {
    Clientes,
    Fornecedores,
    Transportadoras,
}

impl ContactTab {
    pub const NAMES: &'static [&'static str] = &["clientes", "fornecedores", "transportadoras"];

    pub fn as_str(self) -> &'static str {
        match self {
            ContactTab::Clientes => "clientes",
            ContactTab::Fornecedores => "fornecedores",
            ContactTab::Transportadoras => "transportadoras",
        }
    }
}

/// A customer, supplier or carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "fones", default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<String>,
    #[serde(rename = "palavras", default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(rename = "cidade", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: ContactTab,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "documentos", default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    #[serde(rename = "camposExtras", default, skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<String>,
}

impl Record for Contact {
    const STORAGE_KEY: &'static str = "erp.contatos";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        vec![Contact {
            id: "C001".to_string(),
            name: "Cliente Alfa".to_string(),
            phones: None,
            keywords: None,
            city: None,
            kind: ContactTab::Clientes,
            notes: None,
            documents: None,
            extra_fields: None,
        }]
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), self.city.as_deref(), self.keywords.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn tab(&self) -> Option<&'static str> {
        Some(self.kind.as_str())
    }
}
