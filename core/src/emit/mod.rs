pub mod manifest;
pub mod template;

use crate::error::CoreResult;
use crate::registry::validate::ValidatedRegistry;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory of the output root holding the detail pages.
pub const DETAILS_DIR: &str = "checks";
/// Manifest file name at the top of the output root.
pub const MANIFEST_FILE: &str = "manifest.json";
/// Extension of every emitted detail document.
pub const DOC_EXTENSION: &str = "html";

/// One artifact written by a generation run, with its digest so callers can
/// verify idempotence across runs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub path: String,
    pub sha256: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EmissionReport {
    pub manifest: ArtifactRecord,
    pub pages: Vec<ArtifactRecord>,
}

/// Emit the manifest and one detail page per record under `output_root`.
///
/// Everything is rendered in memory before the first write, so a template
/// failure produces no files at all. The manifest is written last via a
/// temp-then-rename so a concurrent reader never observes it half written,
/// and every file written by a run that fails mid-way is removed again:
/// either the whole snapshot lands or none of it does.
pub fn emit(registry: &ValidatedRegistry, output_root: &Path) -> CoreResult<EmissionReport> {
    let entries = manifest::manifest_entries(registry);
    let manifest_text = manifest::render_manifest_json(&entries)?;

    let mut pages: Vec<(String, String)> = Vec::with_capacity(registry.len());
    for check in registry.checks() {
        pages.push((
            manifest::detail_file(&check.slug),
            template::render_detail_page(check)?,
        ));
    }

    fs::create_dir_all(output_root.join(DETAILS_DIR))?;

    let mut written: Vec<PathBuf> = Vec::new();
    match write_run(output_root, &manifest_text, &pages, &mut written) {
        Ok(report) => Ok(report),
        Err(err) => {
            // Best-effort removal of this run's partial output; the error
            // that aborted the run is the one worth surfacing. The details
            // directory only goes away if this run left it empty.
            for path in written.iter().rev() {
                let _ = fs::remove_file(path);
            }
            let _ = fs::remove_dir(output_root.join(DETAILS_DIR));
            Err(err)
        }
    }
}

fn write_run(
    output_root: &Path,
    manifest_text: &str,
    pages: &[(String, String)],
    written: &mut Vec<PathBuf>,
) -> CoreResult<EmissionReport> {
    let mut page_records = Vec::with_capacity(pages.len());
    for (rel, content) in pages {
        let path = output_root.join(rel);
        fs::write(&path, content)?;
        written.push(path);
        page_records.push(ArtifactRecord {
            path: rel.clone(),
            sha256: sha256_hex(content.as_bytes()),
            bytes: content.len() as u64,
        });
    }

    let manifest_tmp = output_root.join(format!("{}.tmp", MANIFEST_FILE));
    fs::write(&manifest_tmp, manifest_text)?;
    written.push(manifest_tmp.clone());
    let manifest_path = output_root.join(MANIFEST_FILE);
    fs::rename(&manifest_tmp, &manifest_path)?;
    written.pop();
    written.push(manifest_path);

    Ok(EmissionReport {
        manifest: ArtifactRecord {
            path: MANIFEST_FILE.to_string(),
            sha256: sha256_hex(manifest_text.as_bytes()),
            bytes: manifest_text.len() as u64,
        },
        pages: page_records,
    })
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
