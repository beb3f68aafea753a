use super::model::{BilingualText, CheckRecord, Level};
use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Which registry invariant a record broke. At most one is reported per
/// record, in this order of precedence.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum IssueKind {
    DuplicateId,
    DuplicateSlug { first_id: String },
    InvalidLevel { value: String },
    IncompleteBilingual { field: &'static str },
    EmptyScriptRef,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::DuplicateId => write!(f, "duplicate id"),
            IssueKind::DuplicateSlug { first_id } => {
                write!(f, "duplicate slug (already used by {})", first_id)
            }
            IssueKind::InvalidLevel { value } => write!(f, "invalid level {:?}", value),
            IssueKind::IncompleteBilingual { field } => {
                write!(f, "incomplete bilingual field {}", field)
            }
            IssueKind::EmptyScriptRef => write!(f, "empty script reference"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub index: usize,
    pub id: String,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {} ({}): {}", self.index, self.id, self.kind)
    }
}

/// Aggregate of every invalid record found in one validation pass.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationFailure {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid record(s): ", self.issues.len())?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// A check record with every invariant established, `level` typed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidatedCheck {
    pub id: String,
    pub slug: String,
    pub script_ref: String,
    pub level: Level,
    pub title: BilingualText,
    pub description: BilingualText,
    pub resolution: BilingualText,
}

/// Order-preserving, immutable snapshot of the catalog after validation.
/// The emitter only ever runs against one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistry {
    checks: Vec<ValidatedCheck>,
}

impl ValidatedRegistry {
    pub fn checks(&self) -> &[ValidatedCheck] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Walk the candidate records once and either promote all of them or report
/// every invalid one. For a single record only the first broken invariant is
/// surfaced (id collision before slug collision before level before
/// bilingual completeness before script reference), but scanning continues
/// so one pass names all bad records.
pub fn validate(records: Vec<CheckRecord>) -> CoreResult<ValidatedRegistry> {
    let mut seen_ids: BTreeSet<String> = BTreeSet::new();
    let mut seen_slugs: BTreeMap<String, String> = BTreeMap::new();
    let mut checks: Vec<ValidatedCheck> = Vec::with_capacity(records.len());
    let mut issues: Vec<ValidationIssue> = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let outcome = check_record(&record, &seen_ids, &seen_slugs);

        // Record identity even for invalid records so later collisions with
        // them are still surfaced.
        seen_ids.insert(record.id.clone());
        seen_slugs
            .entry(record.slug.clone())
            .or_insert_with(|| record.id.clone());

        match outcome {
            Err(kind) => issues.push(ValidationIssue {
                index,
                id: record.id,
                kind,
            }),
            Ok(level) => checks.push(ValidatedCheck {
                id: record.id,
                slug: record.slug,
                script_ref: record.script_ref,
                level,
                title: record.title,
                description: record.description,
                resolution: record.resolution,
            }),
        }
    }

    if issues.is_empty() {
        Ok(ValidatedRegistry { checks })
    } else {
        Err(CoreError::Validation(ValidationFailure { issues }))
    }
}

fn check_record(
    record: &CheckRecord,
    seen_ids: &BTreeSet<String>,
    seen_slugs: &BTreeMap<String, String>,
) -> Result<Level, IssueKind> {
    if seen_ids.contains(&record.id) {
        return Err(IssueKind::DuplicateId);
    }
    if let Some(first_id) = seen_slugs.get(&record.slug) {
        return Err(IssueKind::DuplicateSlug {
            first_id: first_id.clone(),
        });
    }
    let level = Level::parse(&record.level).ok_or_else(|| IssueKind::InvalidLevel {
        value: record.level.clone(),
    })?;
    for (field, text) in [
        ("title", &record.title),
        ("description", &record.description),
        ("resolution", &record.resolution),
    ] {
        if !text.is_complete() {
            return Err(IssueKind::IncompleteBilingual { field });
        }
    }
    if record.script_ref.trim().is_empty() {
        return Err(IssueKind::EmptyScriptRef);
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::model::BilingualText;

    fn record(id: &str, slug: &str) -> CheckRecord {
        CheckRecord {
            id: id.to_string(),
            slug: slug.to_string(),
            script_ref: format!("Check-{}.ps1", id),
            level: "ERROR".to_string(),
            title: BilingualText::new("Titre", "Title"),
            description: BilingualText::new("d-fr", "d-en"),
            resolution: BilingualText::new("r-fr", "r-en"),
        }
    }

    fn unwrap_failure(err: CoreError) -> ValidationFailure {
        match err {
            CoreError::Validation(failure) => failure,
            other => panic!("expected validation failure, got {}", other),
        }
    }

    #[test]
    fn accepts_a_valid_registry_in_order() {
        let registry = validate(vec![record("CHK001", "a"), record("CHK002", "b")]).unwrap();
        let ids: Vec<&str> = registry.checks().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["CHK001", "CHK002"]);
        assert_eq!(registry.checks()[0].level, Level::ERROR);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let failure =
            unwrap_failure(validate(vec![record("CHK001", "a"), record("CHK001", "b")]).unwrap_err());
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].index, 1);
        assert_eq!(failure.issues[0].kind, IssueKind::DuplicateId);
    }

    #[test]
    fn duplicate_slug_names_the_first_holder() {
        let failure =
            unwrap_failure(validate(vec![record("CHK001", "dup"), record("CHK002", "dup")]).unwrap_err());
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].id, "CHK002");
        assert_eq!(
            failure.issues[0].kind,
            IssueKind::DuplicateSlug {
                first_id: "CHK001".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_level() {
        let mut bad = record("CHK001", "a");
        bad.level = "CRITICAL".to_string();
        let failure = unwrap_failure(validate(vec![bad]).unwrap_err());
        assert_eq!(
            failure.issues[0].kind,
            IssueKind::InvalidLevel {
                value: "CRITICAL".to_string()
            }
        );
    }

    #[test]
    fn rejects_half_populated_bilingual_field() {
        let mut bad = record("CHK001", "a");
        bad.description.en = String::new();
        let failure = unwrap_failure(validate(vec![bad]).unwrap_err());
        assert_eq!(
            failure.issues[0].kind,
            IssueKind::IncompleteBilingual {
                field: "description"
            }
        );
    }

    #[test]
    fn rejects_empty_script_ref() {
        let mut bad = record("CHK001", "a");
        bad.script_ref = "  ".to_string();
        let failure = unwrap_failure(validate(vec![bad]).unwrap_err());
        assert_eq!(failure.issues[0].kind, IssueKind::EmptyScriptRef);
    }

    #[test]
    fn reports_only_the_first_violation_per_record() {
        // Duplicate id wins over the invalid level on the same record.
        let mut bad = record("CHK001", "b");
        bad.level = "CRITICAL".to_string();
        let failure =
            unwrap_failure(validate(vec![record("CHK001", "a"), bad]).unwrap_err());
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].kind, IssueKind::DuplicateId);
    }

    #[test]
    fn surfaces_every_invalid_record_in_one_pass() {
        let mut bad_level = record("CHK002", "b");
        bad_level.level = "NOTICE".to_string();
        let mut bad_script = record("CHK004", "d");
        bad_script.script_ref = String::new();
        let failure = unwrap_failure(
            validate(vec![
                record("CHK001", "a"),
                bad_level,
                record("CHK003", "c"),
                bad_script,
            ])
            .unwrap_err(),
        );
        let indices: Vec<usize> = failure.issues.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn collisions_with_invalid_records_are_still_reported() {
        let mut bad = record("CHK001", "a");
        bad.level = "NOTICE".to_string();
        let failure =
            unwrap_failure(validate(vec![bad, record("CHK002", "a")]).unwrap_err());
        assert_eq!(failure.issues.len(), 2);
        assert_eq!(
            failure.issues[1].kind,
            IssueKind::DuplicateSlug {
                first_id: "CHK001".to_string()
            }
        );
    }
}
