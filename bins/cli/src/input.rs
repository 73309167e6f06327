//! JSON input from files or standard input.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use reckon_shared::{AppError, AppResult};
use serde::de::DeserializeOwned;

/// Path that selects standard input.
pub const STDIN: &str = "-";

/// Reads a JSON document from `path`, or from standard input when `path` is `-`.
pub fn read_json<T: DeserializeOwned>(path: &str) -> AppResult<T> {
    let contents = if path == STDIN {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| AppError::Input(format!("Failed to read standard input: {e}")))?;
        buffer
    } else {
        let file = Path::new(path);
        if !file.is_file() {
            return Err(AppError::Input(format!("Not a file: {}", file.display())));
        }
        fs::read_to_string(file)
            .map_err(|e| AppError::Input(format!("Failed to read '{}': {e}", file.display())))?
    };
    parse(&contents)
}

/// Parses a JSON document, rejecting empty input.
pub fn parse<T: DeserializeOwned>(contents: &str) -> AppResult<T> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Err(AppError::Input("Empty input".to_string()));
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_core::invoice::Invoice;
    use reckon_core::ledger::GlEntry;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_invoice() {
        let invoice: Invoice = parse(
            r#"{"name": "SINV-1", "items": [{"rate": "10.005", "qty": 3}], "net_total": "30.01"}"#,
        )
        .unwrap();
        assert_eq!(invoice.name.as_deref(), Some("SINV-1"));
        assert_eq!(invoice.net_total, dec!(30.01));
    }

    #[test]
    fn test_parse_ledger_entries() {
        let entries: Vec<GlEntry> = parse(
            r#"[{"account": "Debtors", "debit": "115.00"}, {"account": "Sales", "credit": "100"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].debit, dec!(115.00));
        assert_eq!(entries[1].credit, dec!(100));
    }

    #[test]
    fn test_empty_input_is_an_input_error() {
        let err = parse::<Invoice>("  \n").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_ERROR");
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let err = parse::<Invoice>("{").unwrap_err();
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_missing_file() {
        let err = read_json::<Invoice>("does/not/exist.json").unwrap_err();
        assert_eq!(err.error_code(), "INPUT_ERROR");
    }
}
