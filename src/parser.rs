//! Decoder for the data source's JSON payload.

use anyhow::Result;
use serde_json::Value;

use crate::survey::{Dataset, SurveyRow};

/// Decodes the collaborator payload `{ raw: { checkin, checkout, avaliacao } }`
/// into a [`Dataset`].
///
/// Absence of `raw` or of any sub-array yields an empty collection, not an
/// error; only malformed JSON fails. Row values may arrive as strings or
/// numbers and are stringified on ingest.
pub fn parse_payload(bytes: &[u8]) -> Result<Dataset> {
    let value: Value = serde_json::from_slice(bytes)?;
    let raw = value.get("raw");

    Ok(Dataset {
        checkin: rows_from(raw.and_then(|r| r.get("checkin"))),
        checkout: rows_from(raw.and_then(|r| r.get("checkout"))),
        avaliacao: rows_from(raw.and_then(|r| r.get("avaliacao"))),
    })
}

fn rows_from(value: Option<&Value>) -> Vec<SurveyRow> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect()
        })
        .collect()
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
