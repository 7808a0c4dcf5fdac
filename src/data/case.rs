//! The case file: aggregate root of victims, suspects and evidence

use super::{Contradiction, Evidence, Kill, Suspect};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// How hard a case is meant to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Case stats and authoring info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_kills: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,  // "kira_mode" or "hand_crafted"
}

/// A complete authored mystery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kills: Vec<Kill>,
    pub suspects: Vec<Suspect>,
    pub evidence: Vec<Evidence>,
    pub contradictions: Vec<Contradiction>,
    #[serde(default)]
    pub metadata: CaseMetadata,
}

impl Case {
    /// A blank template for case authors.
    ///
    /// The template does not pass load validation until kills and suspects
    /// have been filled in.
    pub fn empty(title: &str) -> Self {
        Self {
            id: format!("case_{}", Utc::now().timestamp_millis()),
            title: title.to_string(),
            description: String::new(),
            kills: Vec::new(),
            suspects: Vec::new(),
            evidence: Vec::new(),
            contradictions: Vec::new(),
            metadata: CaseMetadata {
                total_kills: Some(0),
                difficulty: Some(Difficulty::Medium),
                created_by: Some("kira_mode".to_string()),
            },
        }
    }

    /// Number of suspects flagged as the culprit
    pub fn kira_count(&self) -> usize {
        self.suspects.iter().filter(|s| s.is_kira).count()
    }
}
