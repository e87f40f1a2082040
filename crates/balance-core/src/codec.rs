//! Structured-text encoding used for clipboard transfer and file export.

use balance_domain::{Category, Ledger};

use crate::CoreError;

/// Encodes a ledger as indented JSON, the export file format.
pub fn ledger_to_text(ledger: &Ledger) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(ledger)?)
}

/// Decodes a ledger; every one of the twelve periods must be present.
pub fn ledger_from_text(text: &str) -> Result<Ledger, CoreError> {
    Ok(serde_json::from_str(text)?)
}

/// Encodes categories as compact JSON for the clipboard.
pub fn categories_to_text(categories: &[Category]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(categories)?)
}

pub fn categories_from_text(text: &str) -> Result<Vec<Category>, CoreError> {
    Ok(serde_json::from_str(text)?)
}
