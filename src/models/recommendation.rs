use serde::{Deserialize, Serialize};

use super::IssueSummary;

/// Inbound recommendation request; every field is optional on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub skills: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub interest: String,
}

fn default_level() -> String {
    "Beginner".to_string()
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            skills: String::new(),
            level: default_level(),
            interest: String::new(),
        }
    }
}

/// Body returned for every outcome, including failures
///
/// `message` is only present when `issues` is empty for a known reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub issues: Vec<IssueSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationResponse {
    pub fn ranked(issues: Vec<IssueSummary>) -> Self {
        Self {
            issues,
            message: None,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            issues: Vec::new(),
            message: Some(message.into()),
        }
    }
}
