//! Command handlers, one module per command family.

/// Run `$body` with `$ty` bound to the record type of an [`EntityKind`].
///
/// [`EntityKind`]: erp_core::EntityKind
macro_rules! with_record_type {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            erp_core::EntityKind::Sales => {
                type $ty = erp_core::entities::Sale;
                $body
            }
            erp_core::EntityKind::Purchases => {
                type $ty = erp_core::entities::Purchase;
                $body
            }
            erp_core::EntityKind::Contacts => {
                type $ty = erp_core::entities::Contact;
                $body
            }
            erp_core::EntityKind::Products => {
                type $ty = erp_core::entities::Product;
                $body
            }
            erp_core::EntityKind::Users => {
                type $ty = erp_core::entities::User;
                $body
            }
            erp_core::EntityKind::Finance => {
                type $ty = erp_core::entities::FinanceEntry;
                $body
            }
        }
    };
}

pub mod favorites;
pub mod finance;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod records;

use erp_core::{CollectionStore, Record};

use crate::errors::CliError;

/// Turn a swallowed write failure into a command error.
fn ensure_saved<T: Record>(store: &CollectionStore<T>) -> anyhow::Result<()> {
    match store.last_write_error() {
        Some(reason) => Err(CliError::write_failed(store.key(), reason).into()),
        None => Ok(()),
    }
}
