use std::fmt::Display;

use crate::models::AggregatedIssue;

const BEGINNER_LABELS: &[&str] = &["good first issue", "beginner", "easy", "first-timers-only", "easy-fix"];
const INTERMEDIATE_LABELS: &[&str] = &["bug", "refactor", "enhancement", "feature", "improvement"];
const ADVANCED_LABELS: &[&str] = &["performance", "architecture", "core", "security", "breaking"];

/// Requested experience tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelTier {
    Beginner,
    Intermediate,
    Advanced,
    /// Any other text; disables label filtering
    Other(String),
}

impl LevelTier {
    /// Tiers offered to clients
    pub const KNOWN: [LevelTier; 3] = [LevelTier::Beginner, LevelTier::Intermediate, LevelTier::Advanced];

    pub fn parse(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "beginner" => LevelTier::Beginner,
            "intermediate" => LevelTier::Intermediate,
            "advanced" => LevelTier::Advanced,
            _ => LevelTier::Other(level.to_string()),
        }
    }

    /// Matching labels, or `None` when the tier does not filter
    pub fn labels(&self) -> Option<&'static [&'static str]> {
        match self {
            LevelTier::Beginner => Some(BEGINNER_LABELS),
            LevelTier::Intermediate => Some(INTERMEDIATE_LABELS),
            LevelTier::Advanced => Some(ADVANCED_LABELS),
            LevelTier::Other(_) => None,
        }
    }

    pub fn matches(&self, labels: &[String]) -> bool {
        match self.labels() {
            Some(wanted) => labels
                .iter()
                .any(|label| wanted.iter().any(|w| label.eq_ignore_ascii_case(w))),
            None => true,
        }
    }
}

impl Display for LevelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelTier::Beginner => write!(f, "Beginner"),
            LevelTier::Intermediate => write!(f, "Intermediate"),
            LevelTier::Advanced => write!(f, "Advanced"),
            LevelTier::Other(level) => write!(f, "{}", level),
        }
    }
}

/// Keeps issues carrying at least one label of the tier, in input order
pub fn filter_by_level(issues: Vec<AggregatedIssue>, tier: &LevelTier) -> Vec<AggregatedIssue> {
    issues
        .into_iter()
        .filter(|issue| tier.matches(&issue.labels))
        .collect()
}
