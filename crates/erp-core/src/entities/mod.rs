//! Typed records for every entity kind.
//!
//! Stored field names are Portuguese (`cliente`, `valor`, `data`, ...) so
//! blobs written by the browser build load unchanged. Rust-side names are
//! English.

pub mod contact;
pub mod finance;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod user;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ErpError, Result};
use crate::money::Money;

pub use contact::{Contact, ContactTab};
pub use finance::{FinanceEntry, FinanceKind, FinanceStatus, FinanceTab};
pub use product::{Product, ProductTab, StockMovement, StockMovementKind};
pub use purchase::{Purchase, PurchaseTab};
pub use sale::{DocumentStatus, LineItem, Sale, SalesTab};
pub use user::User;

/// Storage key of the report favorites list.
pub const FAVORITES_KEY: &str = "erp.reports.favorites";

/// A record that lives in a collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key of the collection holding this kind.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Default collection used when nothing is stored yet.
    fn seed(today: NaiveDate) -> Vec<Self>;

    /// Fields matched by the free-text filter.
    fn search_fields(&self) -> Vec<&str>;

    /// Date used by month windows, if the kind is dated.
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Tab (category) tag, if the kind is split into tabs.
    fn tab(&self) -> Option<&'static str> {
        None
    }

    /// Monetary amount summed by aggregations.
    fn amount(&self) -> Option<Money> {
        None
    }

    /// Bring a record built in code into the stored invariants.
    fn normalize(&mut self) {}
}

/// Every record collection the application keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sales,
    Purchases,
    Contacts,
    Products,
    Users,
    Finance,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Sales,
        EntityKind::Purchases,
        EntityKind::Contacts,
        EntityKind::Products,
        EntityKind::Users,
        EntityKind::Finance,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            EntityKind::Sales => Sale::STORAGE_KEY,
            EntityKind::Purchases => Purchase::STORAGE_KEY,
            EntityKind::Contacts => Contact::STORAGE_KEY,
            EntityKind::Products => Product::STORAGE_KEY,
            EntityKind::Users => User::STORAGE_KEY,
            EntityKind::Finance => FinanceEntry::STORAGE_KEY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Sales => "sales",
            EntityKind::Purchases => "purchases",
            EntityKind::Contacts => "contacts",
            EntityKind::Products => "products",
            EntityKind::Users => "users",
            EntityKind::Finance => "finance",
        }
    }

    /// Tab tags accepted by the tab filter for this kind.
    pub fn tabs(self) -> &'static [&'static str] {
        match self {
            EntityKind::Sales => SalesTab::NAMES,
            EntityKind::Purchases => PurchaseTab::NAMES,
            EntityKind::Contacts => ContactTab::NAMES,
            EntityKind::Products => ProductTab::NAMES,
            EntityKind::Users => &[],
            EntityKind::Finance => FinanceTab::NAMES,
        }
    }

    /// Whether records of this kind carry a date for month windows.
    pub fn is_dated(self) -> bool {
        matches!(
            self,
            EntityKind::Sales | EntityKind::Purchases | EntityKind::Products | EntityKind::Finance
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ErpError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sales" | "sale" | "vendas" => Ok(EntityKind::Sales),
            "purchases" | "purchase" | "compras" => Ok(EntityKind::Purchases),
            "contacts" | "contact" | "contatos" | "clientes" => Ok(EntityKind::Contacts),
            "products" | "product" | "produtos" => Ok(EntityKind::Products),
            "users" | "user" | "usuarios" => Ok(EntityKind::Users),
            "finance" | "financeiro" => Ok(EntityKind::Finance),
            other => Err(ErpError::InvalidInput(format!(
                "Unknown entity kind \"{}\" (use sales, purchases, contacts, products, users or finance)",
                other
            ))),
        }
    }
}
