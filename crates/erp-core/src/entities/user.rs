use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Record;

/// An operator account shown in the settings screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(rename = "permissao", default)]
    pub permission: String,
    #[serde(rename = "acesso", default, skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

impl Record for User {
    const STORAGE_KEY: &'static str = "erp.usuarios";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed(_today: NaiveDate) -> Vec<Self> {
        vec![User {
            id: "U001".to_string(),
            name: "Erick".to_string(),
            email: "teste".to_string(),
            login: Some("erick".to_string()),
            permission: "Acesso completo".to_string(),
            access: Some("Sim".to_string()),
        }]
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.login.as_deref());
        fields
    }
}
