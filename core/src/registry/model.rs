use serde::{Deserialize, Serialize};

/// Severity classification of a readiness check.
///
/// Declaration order is descending severity: sorting levels ascending puts
/// the most blocking checks first, and consumers rely on that ordering for
/// sorting and color-coding.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    FATAL,
    ERROR,
    WARNING,
    INFO,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::FATAL, Level::ERROR, Level::WARNING, Level::INFO];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::FATAL => "FATAL",
            Level::ERROR => "ERROR",
            Level::WARNING => "WARNING",
            Level::INFO => "INFO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FATAL" => Some(Level::FATAL),
            "ERROR" => Some(Level::ERROR),
            "WARNING" => Some(Level::WARNING),
            "INFO" => Some(Level::INFO),
            _ => None,
        }
    }
}

/// One logical field in both catalog languages. French is the primary
/// locale, English the secondary; a record is invalid unless both are
/// populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BilingualText {
    pub fr: String,
    pub en: String,
}

impl BilingualText {
    pub fn new(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            fr: fr.into(),
            en: en.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.fr.trim().is_empty() && !self.en.trim().is_empty()
    }
}

/// Raw candidate record as loaded from the catalog file, before any
/// invariant has been checked. `level` stays a plain string here; the
/// validator turns it into [`Level`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckRecord {
    pub id: String,
    pub slug: String,
    pub script_ref: String,
    pub level: String,
    pub title: BilingualText,
    pub description: BilingualText,
    pub resolution: BilingualText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_descending_severity() {
        let mut levels = vec![Level::INFO, Level::FATAL, Level::WARNING, Level::ERROR];
        levels.sort();
        assert_eq!(levels, Level::ALL.to_vec());
    }

    #[test]
    fn level_tokens_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::parse(level.as_str()), Some(level));
        }
        assert_eq!(Level::parse("CRITICAL"), None);
        assert_eq!(Level::parse("fatal"), None);
    }

    #[test]
    fn bilingual_completeness_requires_both_locales() {
        assert!(BilingualText::new("Titre", "Title").is_complete());
        assert!(!BilingualText::new("Titre", "").is_complete());
        assert!(!BilingualText::new("  ", "Title").is_complete());
    }
}
