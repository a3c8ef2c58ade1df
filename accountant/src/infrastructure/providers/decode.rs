use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::ports::ProviderError;

/// Look `code` up in an exchange decode table
///
/// Lookups are exact and case-sensitive. A code missing from the table is a
/// validation failure, never a default.
pub(crate) fn decode<T: Copy>(
    table: &[(&'static str, T)],
    kind: &str,
    code: &str,
) -> Result<T, ProviderError> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, value)| *value)
        .ok_or_else(|| ProviderError::DataValidation(format!("unknown {} `{}`", kind, code)))
}

/// Validate one raw record against its schema
pub(crate) fn parse_record<T: DeserializeOwned>(record: Value, what: &str) -> Result<T, ProviderError> {
    serde_json::from_value(record).map_err(|e| {
        ProviderError::DataValidation(format!("{} response data is not valid: {}", what, e))
    })
}

/// Validate a whole listing; one bad record rejects the listing
pub(crate) fn parse_records<T: DeserializeOwned>(
    records: Vec<Value>,
    what: &str,
) -> Result<Vec<T>, ProviderError> {
    records
        .into_iter()
        .map(|record| parse_record(record, what))
        .collect()
}
