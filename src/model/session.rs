use serde::{Deserialize, Serialize};

use super::chat::Transcript;
use super::outline::Outline;
use crate::parse::parse_outline;

/// Learner expertise level for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExpertiseLevel {
    /// The name used in config.toml
    pub fn as_str(self) -> &'static str {
        match self {
            ExpertiseLevel::Beginner => "beginner",
            ExpertiseLevel::Intermediate => "intermediate",
            ExpertiseLevel::Advanced => "advanced",
        }
    }

    /// Parse a level name, case-insensitive
    pub fn parse(s: &str) -> Option<ExpertiseLevel> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(ExpertiseLevel::Beginner),
            "intermediate" => Some(ExpertiseLevel::Intermediate),
            "advanced" => Some(ExpertiseLevel::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExpertiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpertiseLevel::Beginner => "Beginner",
            ExpertiseLevel::Intermediate => "Intermediate",
            ExpertiseLevel::Advanced => "Advanced",
        };
        write!(f, "{}", name)
    }
}

/// One study session: a curriculum blob, its parsed outline, and the tutor
/// transcript. The curriculum text is opaque; the outline is rebuilt from it
/// on every load and completion state is re-applied from the overlay.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub topic: String,
    pub level: ExpertiseLevel,
    /// Raw curriculum text as produced by the tutor or imported
    pub curriculum: String,
    pub outline: Outline,
    pub transcript: Transcript,
}

impl Session {
    /// Build a session from curriculum text, parsing the outline fresh.
    /// All nodes start not-completed.
    pub fn from_curriculum(
        id: impl Into<String>,
        topic: impl Into<String>,
        level: ExpertiseLevel,
        curriculum: String,
    ) -> Self {
        let outline = parse_outline(&curriculum);
        Session {
            id: id.into(),
            topic: topic.into(),
            level,
            curriculum,
            outline,
            transcript: Transcript::default(),
        }
    }
}

/// Derive a filesystem-friendly session id from a topic
pub fn slugify(topic: &str) -> String {
    let mut slug = String::new();
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if matches!(c, ' ' | '-' | '_' | '/') && !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "session".to_string()
    } else {
        slug.to_string()
    }
}

/// Make `base` unique among `existing` by appending `-2`, `-3`, …
pub fn unique_id(base: &str, existing: &[String]) -> String {
    if !existing.iter().any(|e| e == base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !existing.iter().any(|e| *e == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parse_is_case_insensitive() {
        assert_eq!(
            ExpertiseLevel::parse("Beginner"),
            Some(ExpertiseLevel::Beginner)
        );
        assert_eq!(
            ExpertiseLevel::parse("ADVANCED"),
            Some(ExpertiseLevel::Advanced)
        );
        assert_eq!(ExpertiseLevel::parse("expert"), None);
    }

    #[test]
    fn level_names_round_trip() {
        for level in [
            ExpertiseLevel::Beginner,
            ExpertiseLevel::Intermediate,
            ExpertiseLevel::Advanced,
        ] {
            assert_eq!(ExpertiseLevel::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn from_curriculum_parses_outline() {
        let session = Session::from_curriculum(
            "rust",
            "Rust",
            ExpertiseLevel::Beginner,
            "# Topic\n- Sub1\n- Sub2".to_string(),
        );
        assert_eq!(session.outline.node_count(), 3);
        assert!(session.transcript.is_empty());
    }

    #[test]
    fn slugify_cleans_topics() {
        assert_eq!(slugify("Rust Programming"), "rust-programming");
        assert_eq!(slugify("  C++ / Systems  "), "c-systems");
        assert_eq!(slugify("!!!"), "session");
    }

    #[test]
    fn unique_id_appends_counter() {
        let existing = vec!["rust".to_string(), "rust-2".to_string()];
        assert_eq!(unique_id("rust", &existing), "rust-3");
        assert_eq!(unique_id("go", &existing), "go");
    }
}
