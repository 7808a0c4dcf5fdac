//! Contradictions authored into a case file

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Kinds of logical inconsistency between an alibi and the evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContradictionType {
    AlibiTime,           // Alibi does not cover, or places them at, the murder
    EvidenceConflict,    // Evidence shows them somewhere else
    WitnessMismatch,     // Witness story does not line up
    TimelineImpossible,  // Travel between alibi locations cannot be done in time
}

impl std::fmt::Display for ContradictionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContradictionType::AlibiTime => write!(f, "alibi_time"),
            ContradictionType::EvidenceConflict => write!(f, "evidence_conflict"),
            ContradictionType::WitnessMismatch => write!(f, "witness_mismatch"),
            ContradictionType::TimelineImpossible => write!(f, "timeline_impossible"),
        }
    }
}

/// A contradiction the case author planted.
///
/// The meaning of `evidence_ids` depends on the type: `alibi_time` entries
/// store a kill index in the first slot, `evidence_conflict` entries an
/// evidence id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contradiction {
    pub id: String,
    #[serde(rename = "type")]
    pub contradiction_type: ContradictionType,
    pub suspect_id: String,
    #[serde(default, deserialize_with = "ids_from_strings_or_numbers")]
    pub evidence_ids: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_key_contradiction: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hours: Vec<u8>,            // Hours of the timeline this concerns
}

impl Contradiction {
    /// First referenced id, read as a kill index
    pub fn kill_index(&self) -> Option<usize> {
        self.evidence_ids.first()?.trim().parse().ok()
    }

    /// First referenced id, read as an evidence id
    pub fn primary_evidence_id(&self) -> Option<&str> {
        self.evidence_ids.first().map(String::as_str)
    }

    pub fn mentions_hour(&self, hour: u8) -> bool {
        self.hours.contains(&hour)
    }
}

fn ids_from_strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "evidence id must be a string or number, got {other}"
            ))),
        })
        .collect()
}
