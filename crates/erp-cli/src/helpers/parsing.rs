//! Parsing helpers for dates, months, entity kinds and record input.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use erp_core::aggregate::{MonthWindow, StatusFilter};
use erp_core::EntityKind;

use crate::cli::RecordInput;
use crate::errors::CliError;

/// Parse a calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!("Invalid date (expected YYYY-MM-DD): {}", value)).into()
    })
}

/// Parse a month (YYYY-MM).
pub fn parse_month(value: &str) -> anyhow::Result<MonthWindow> {
    value
        .parse::<MonthWindow>()
        .map_err(|e| CliError::invalid_input(e.to_string()).into())
}

pub fn parse_kind(value: &str) -> anyhow::Result<EntityKind> {
    value
        .parse::<EntityKind>()
        .map_err(|e| CliError::invalid_input(e.to_string()).into())
}

pub fn parse_status(value: &str) -> anyhow::Result<StatusFilter> {
    value
        .parse::<StatusFilter>()
        .map_err(|e| CliError::invalid_input(e.to_string()).into())
}

/// Build the JSON object described by `--json` or the `--field` list.
///
/// `name=text` sets a string; `name:=json` sets a raw JSON value, so
/// `valor:=120.5` stores a number and `itens:=[]` an empty list.
pub fn record_input(input: &RecordInput) -> anyhow::Result<Value> {
    if let Some(raw) = input.json.as_deref() {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| CliError::invalid_input(format!("Invalid --json value: {}", e)))?;
        if !value.is_object() {
            return Err(CliError::invalid_input("--json must be a JSON object").into());
        }
        return Ok(value);
    }

    let mut fields = Map::new();
    for raw in &input.field {
        let (name, value) = parse_field(raw)?;
        fields.insert(name, value);
    }
    Ok(Value::Object(fields))
}

fn parse_field(raw: &str) -> anyhow::Result<(String, Value)> {
    let eq = raw.find('=').ok_or_else(|| {
        CliError::invalid_input(format!(
            "Invalid field \"{}\" (expected name=value or name:=json)",
            raw
        ))
    })?;
    let (name, is_json) = match raw[..eq].strip_suffix(':') {
        Some(name) => (name, true),
        None => (&raw[..eq], false),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::invalid_input(format!("Field \"{}\" has no name", raw)).into());
    }

    let text = &raw[eq + 1..];
    let value = if is_json {
        serde_json::from_str(text).map_err(|e| {
            CliError::invalid_input(format!("Field {} is not valid JSON: {}", name, e))
        })?
    } else {
        Value::String(text.to_string())
    };
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(raw: &[&str]) -> RecordInput {
        RecordInput {
            json: None,
            field: raw.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-11-20").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
        );
        assert!(parse_date("20/11/2025").is_err());
    }

    #[test]
    fn test_parse_month() {
        let window = parse_month("2025-11").unwrap();
        assert_eq!((window.year(), window.month()), (2025, 11));
        assert!(parse_month("2025-13").is_err());
    }

    #[test]
    fn test_string_and_json_fields() {
        let value = record_input(&fields(&[
            "descricao=Aluguel = sala",
            "valor:=1800.5",
            "conciliado:=true",
        ]))
        .unwrap();
        assert_eq!(
            value,
            json!({"descricao": "Aluguel = sala", "valor": 1800.5, "conciliado": true})
        );
    }

    #[test]
    fn test_field_errors() {
        assert!(record_input(&fields(&["descricao"])).is_err());
        assert!(record_input(&fields(&["=x"])).is_err());
        assert!(record_input(&fields(&["valor:=abc"])).is_err());
    }

    #[test]
    fn test_json_input_must_be_object() {
        let input = RecordInput {
            json: Some("[1,2]".to_string()),
            field: Vec::new(),
        };
        assert!(record_input(&input).is_err());

        let input = RecordInput {
            json: Some(r#"{"nome":"Ana"}"#.to_string()),
            field: Vec::new(),
        };
        assert_eq!(record_input(&input).unwrap(), json!({"nome": "Ana"}));
    }
}
