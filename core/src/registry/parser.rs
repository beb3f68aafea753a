use super::model::{BilingualText, CheckRecord};
use crate::error::{CoreError, CoreResult};
use serde_json::Value;

/// Parse the check catalog from its JSON form: a top-level array of flat
/// objects keyed `id`, `slug`, `script`, `level`, `title_fr`, `title_en`,
/// `description_fr`, `description_en`, `resolution_fr`, `resolution_en`.
///
/// Only the shape is enforced here. `id` and `slug` must be present so a
/// record can be addressed at all; every other string field defaults to
/// empty and is left for the validator to report under the matching
/// invariant.
pub fn parse_registry(json_str: &str) -> CoreResult<Vec<CheckRecord>> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::InvalidInput(format!("failed to parse registry: {}", e)))?;

    let entries = raw
        .as_array()
        .ok_or_else(|| CoreError::InvalidInput("registry must be a JSON array".to_string()))?;

    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        records.push(parse_record(idx, entry)?);
    }
    Ok(records)
}

fn parse_record(idx: usize, entry: &Value) -> CoreResult<CheckRecord> {
    if !entry.is_object() {
        return Err(CoreError::InvalidInput(format!(
            "registry entry at index {} is not an object",
            idx
        )));
    }

    let id = required_str(entry, "id", idx)?;
    let slug = required_str(entry, "slug", idx)?;

    Ok(CheckRecord {
        id,
        slug,
        script_ref: optional_str(entry, "script"),
        level: optional_str(entry, "level"),
        title: BilingualText::new(optional_str(entry, "title_fr"), optional_str(entry, "title_en")),
        description: BilingualText::new(
            optional_str(entry, "description_fr"),
            optional_str(entry, "description_en"),
        ),
        resolution: BilingualText::new(
            optional_str(entry, "resolution_fr"),
            optional_str(entry, "resolution_en"),
        ),
    })
}

fn required_str(entry: &Value, key: &str, idx: usize) -> CoreResult<String> {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| CoreError::InvalidInput(format!("missing {} at index {}", key, idx)))
}

fn optional_str(entry: &Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}
