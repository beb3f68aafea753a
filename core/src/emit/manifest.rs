use crate::error::CoreResult;
use crate::registry::model::Level;
use crate::registry::validate::ValidatedRegistry;
use serde::Serialize;

use super::{DETAILS_DIR, DOC_EXTENSION};

/// One manifest row consumed by the listing/filter UI. Field names are a
/// stable wire contract and must not change.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub id: String,
    pub script: String,
    pub level: Level,
    pub title_fr: String,
    pub title_en: String,
    pub file: String,
}

/// Root-relative path of the detail page derived from a slug.
pub fn detail_file(slug: &str) -> String {
    format!("{}/{}.{}", DETAILS_DIR, slug, DOC_EXTENSION)
}

/// Project the validated registry into manifest rows, preserving registry
/// order. Consumers number entries positionally, so this is never re-sorted.
pub fn manifest_entries(registry: &ValidatedRegistry) -> Vec<ManifestEntry> {
    registry
        .checks()
        .iter()
        .map(|check| ManifestEntry {
            id: check.id.clone(),
            script: check.script_ref.clone(),
            level: check.level,
            title_fr: check.title.fr.clone(),
            title_en: check.title.en.clone(),
            file: detail_file(&check.slug),
        })
        .collect()
}

/// Serialize the manifest as pretty UTF-8 JSON (2-space indent, accented
/// text left unescaped, no trailing newline). The admin editor reads and
/// rewrites this file, so the byte shape is part of the contract.
pub fn render_manifest_json(entries: &[ManifestEntry]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}
