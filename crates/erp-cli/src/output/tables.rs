use erp_core::entities::{Contact, FinanceEntry, Product, Purchase, Sale, User};
use erp_core::Record;

use crate::ui::{brl, truncate, Column};

const NAME_WIDTH: usize = 32;

/// A record that can be listed as a table row.
pub trait Tabular: Record {
    const COLUMNS: &'static [Column];

    /// One cell per entry of [`COLUMNS`](Self::COLUMNS).
    fn row(&self) -> Vec<String>;
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl Tabular for Sale {
    const COLUMNS: &'static [Column] = &[
        Column::text("ID"),
        Column::text("Data"),
        Column::text("Cliente"),
        Column::text("Vendedor"),
        Column::text("Tipo"),
        Column::text("Registro"),
        Column::numeric("Itens"),
        Column::numeric("Total"),
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.to_string(),
            truncate(&self.customer, NAME_WIDTH),
            self.seller.clone(),
            self.document_type.clone(),
            opt(self.tab()),
            self.items.len().to_string(),
            brl(self.total),
        ]
    }
}

impl Tabular for Purchase {
    const COLUMNS: &'static [Column] = &[
        Column::text("ID"),
        Column::text("Data"),
        Column::text("Fornecedor"),
        Column::text("Nota"),
        Column::text("Situacao"),
        Column::numeric("Itens"),
        Column::numeric("Total"),
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.to_string(),
            truncate(&self.supplier, NAME_WIDTH),
            self.invoice_number.clone(),
            opt(self.status.map(|s| s.as_str())),
            self.items.len().to_string(),
            brl(self.total),
        ]
    }
}

impl Tabular for Contact {
    const COLUMNS: &'static [Column] = &[
        Column::text("ID"),
        Column::text("Nome"),
        Column::text("Tipo"),
        Column::text("Cidade"),
        Column::text("Fones"),
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate(&self.name, NAME_WIDTH),
            self.kind.as_str().to_string(),
            opt(self.city.as_deref()),
            opt(self.phones.as_deref()),
        ]
    }
}

impl Tabular for Product {
    const COLUMNS: &'static [Column] = &[
        Column::text("ID"),
        Column::text("Nome"),
        Column::text("Tipo"),
        Column::text("Categoria"),
        Column::numeric("Preco"),
        Column::numeric("Estoque"),
        Column::numeric("Minimo"),
    ];

    fn row(&self) -> Vec<String> {
        let stock = if self.is_below_minimum() {
            format!("{} !", self.stock)
        } else {
            self.stock.to_string()
        };
        vec![
            self.id.clone(),
            truncate(&self.name, NAME_WIDTH),
            self.kind.as_str().to_string(),
            self.category.clone(),
            brl(self.price),
            stock,
            self.min_stock
                .map_or_else(|| "-".to_string(), |min| min.to_string()),
        ]
    }
}

impl Tabular for User {
    const COLUMNS: &'static [Column] = &[
        Column::text("ID"),
        Column::text("Nome"),
        Column::text("Email"),
        Column::text("Login"),
        Column::text("Permissao"),
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            opt(self.login.as_deref()),
            self.permission.clone(),
        ]
    }
}

impl Tabular for FinanceEntry {
    const COLUMNS: &'static [Column] = &[
        Column::text("ID"),
        Column::text("Vencimento"),
        Column::text("Tipo"),
        Column::text("Descricao"),
        Column::text("Contato"),
        Column::text("Situacao"),
        Column::numeric("Valor"),
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.date.to_string(),
            self.kind.as_str().to_string(),
            truncate(&self.description, NAME_WIDTH),
            if self.contact.is_empty() {
                "-".to_string()
            } else {
                self.contact.clone()
            },
            self.status.as_str().to_string(),
            brl(self.amount),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn assert_rows_fit<T: Tabular>() {
        for record in T::seed(today()) {
            assert_eq!(record.row().len(), T::COLUMNS.len(), "{}", T::STORAGE_KEY);
        }
    }

    #[test]
    fn test_every_row_matches_its_columns() {
        assert_rows_fit::<Sale>();
        assert_rows_fit::<Purchase>();
        assert_rows_fit::<Contact>();
        assert_rows_fit::<Product>();
        assert_rows_fit::<User>();
        assert_rows_fit::<FinanceEntry>();
    }

    #[test]
    fn test_sale_row_formats_total() {
        let sale = Sale::seed(today()).remove(0);
        let row = sale.row();
        assert_eq!(row[0], "V001");
        assert_eq!(row[7], brl(sale.total));
    }
}
