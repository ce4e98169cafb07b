//! Finance ledger entries: receipts, payments and issued vouchers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Record;
use crate::error::{ErpError, Result};
use crate::money::Money;

/// What an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceKind {
    /// Money coming in (a receivable).
    Recebimento,
    /// Money going out (a payable).
    Pagamento,
    /// A receipt voucher issued to a third party.
    Recibo,
}

impl FinanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FinanceKind::Recebimento => "recebimento",
            FinanceKind::Pagamento => "pagamento",
            FinanceKind::Recibo => "recibo",
        }
    }

    /// Tab the finance screen lists this kind under.
    pub fn tab(self) -> FinanceTab {
        match self {
            FinanceKind::Recebimento => FinanceTab::Recebimentos,
            FinanceKind::Pagamento => FinanceTab::Pagamentos,
            FinanceKind::Recibo => FinanceTab::Recibos,
        }
    }
}

impl fmt::Display for FinanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceTab {
    Recebimentos,
    Pagamentos,
    Recibos,
}

impl FinanceTab {
    pub const NAMES: &'static [&'static str] = &["recebimentos", "pagamentos", "recibos"];

    pub fn as_str(self) -> &'static str {
        match self {
            FinanceTab::Recebimentos => "recebimentos",
            FinanceTab::Pagamentos => "pagamentos",
            FinanceTab::Recibos => "recibos",
        }
    }
}

/// Settlement state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinanceStatus {
    Pendente,
    Pago,
    Recebido,
}

impl FinanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FinanceStatus::Pendente => "Pendente",
            FinanceStatus::Pago => "Pago",
            FinanceStatus::Recebido => "Recebido",
        }
    }

    pub fn is_settled(self) -> bool {
        matches!(self, FinanceStatus::Pago | FinanceStatus::Recebido)
    }
}

impl fmt::Display for FinanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinanceStatus {
    type Err = ErpError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pendente" => Ok(FinanceStatus::Pendente),
            "pago" => Ok(FinanceStatus::Pago),
            "recebido" => Ok(FinanceStatus::Recebido),
            other => Err(ErpError::InvalidInput(format!(
                "Unknown finance status \"{}\"",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceEntry {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "tipo")]
    pub kind: FinanceKind,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "contato", default)]
    pub contact: String,
    #[serde(rename = "conta", default)]
    pub account: String,
    /// Due date.
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "situacao")]
    pub status: FinanceStatus,
    #[serde(rename = "valor")]
    pub amount: Money,
    #[serde(rename = "referente", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "comprovante", default, skip_serializing_if = "Option::is_none")]
    pub receipt_file: Option<String>,
    #[serde(rename = "conciliado", default, skip_serializing_if = "Option::is_none")]
    pub reconciled: Option<bool>,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "palavras", default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(rename = "observacao", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "emitente", default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(rename = "vias", default, skip_serializing_if = "Option::is_none")]
    pub copies: Option<String>,
    #[serde(rename = "cpfCnpj", default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(rename = "reciboDate", default, skip_serializing_if = "Option::is_none")]
    pub receipt_date: Option<String>,
}

impl FinanceEntry {
    /// A pending entry with only the required fields set.
    pub fn new(kind: FinanceKind, description: &str, date: NaiveDate, amount: Money) -> Self {
        FinanceEntry {
            id: String::new(),
            kind,
            description: description.to_string(),
            contact: String::new(),
            account: String::new(),
            date,
            status: FinanceStatus::Pendente,
            amount,
            reference: None,
            receipt_file: None,
            reconciled: None,
            category: None,
            keywords: None,
            notes: None,
            issuer: None,
            copies: None,
            tax_id: None,
            receipt_date: None,
        }
    }
}

impl Record for FinanceEntry {
    const STORAGE_KEY: &'static str = "erp.finance.entries";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// Three sample entries, all due `today`.
    fn seed(today: NaiveDate) -> Vec<Self> {
        let entry = |id: &str,
                     kind,
                     description: &str,
                     contact: &str,
                     account: &str,
                     status,
                     cents,
                     reference: &str,
                     reconciled: Option<bool>| FinanceEntry {
            id: id.to_string(),
            contact: contact.to_string(),
            account: account.to_string(),
            status,
            reference: Some(reference.to_string()),
            reconciled,
            ..FinanceEntry::new(kind, description, today, Money::from_cents(cents))
        };

        vec![
            entry(
                "1",
                FinanceKind::Recebimento,
                "Venda #1001",
                "Cliente ACME",
                "Caixa interno",
                FinanceStatus::Recebido,
                120_000,
                "Pedido 1001",
                Some(true),
            ),
            entry(
                "2",
                FinanceKind::Pagamento,
                "Compra fornecedor",
                "Fornecedor XPTO",
                "Banco",
                FinanceStatus::Pago,
                55_000,
                "NF 2002",
                Some(true),
            ),
            entry(
                "3",
                FinanceKind::Recebimento,
                "Servico consultoria",
                "Cliente Beta",
                "Banco",
                FinanceStatus::Pendente,
                80_000,
                "Consultoria novembro",
                None,
            ),
        ]
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str(), self.contact.as_str()];
        fields.extend(self.reference.as_deref());
        fields
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn tab(&self) -> Option<&'static str> {
        Some(self.kind.tab().as_str())
    }

    fn amount(&self) -> Option<Money> {
        Some(self.amount)
    }

    fn normalize(&mut self) {
        self.amount = self.amount.non_negative();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_dated_today() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let seed = FinanceEntry::seed(today);
        assert_eq!(seed.len(), 3);
        assert!(seed.iter().all(|e| e.date == today));
        assert_eq!(seed[1].kind, FinanceKind::Pagamento);
        assert_eq!(seed[2].reconciled, None);
    }

    #[test]
    fn test_wire_names() {
        let entry = FinanceEntry::new(
            FinanceKind::Recibo,
            "Recibo aluguel",
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            Money::from_cents(1_000),
        );
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["tipo"], "recibo");
        assert_eq!(value["situacao"], "Pendente");
        assert_eq!(value["data"], "2025-11-01");
        assert_eq!(value["valor"], 10.0);
        assert_eq!(entry.tab(), Some("recibos"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("pago".parse::<FinanceStatus>().unwrap(), FinanceStatus::Pago);
        assert!(FinanceStatus::Recebido.is_settled());
        assert!(!FinanceStatus::Pendente.is_settled());
        assert!("quitado".parse::<FinanceStatus>().is_err());
    }
}
