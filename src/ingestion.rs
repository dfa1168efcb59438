use crate::contributions::PizzaContribution;
use crate::error::Result;
use crate::schema::FinancialRecord;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses the body of `GET /transactions`.
///
/// A body that is valid JSON but not an array yields no records. Elements
/// that do not look like a transaction are skipped with a warning.
pub fn parse_transactions(body: &str) -> Result<Vec<FinancialRecord>> {
    parse_array(body, "transaction")
}

/// Parses the body of `GET /pizza-contributions`, with the same tolerance
/// as [`parse_transactions`].
pub fn parse_contributions(body: &str) -> Result<Vec<PizzaContribution>> {
    parse_array(body, "contribution")
}

fn parse_array<T: DeserializeOwned>(body: &str, what: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Array(items) = value else {
        warn!("Expected a JSON array of {}s; treating payload as empty", what);
        return Ok(Vec::new());
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping {} #{}: {}", what, idx, e);
                None
            }
        })
        .collect();

    if parsed.len() < total {
        warn!("Kept {} of {} {}s", parsed.len(), total, what);
    }

    Ok(parsed)
}
