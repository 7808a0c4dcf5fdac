//! Suspects and their alibis

use super::{TimeSlot, Timeline};
use serde::{Deserialize, Serialize};

/// A suspect's claimed timeline plus their official story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alibi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspect_id: Option<String>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub statement: String,
}

impl Alibi {
    /// Where the suspect claims to have been at an hour
    pub fn slot_at(&self, hour: u8) -> Option<&TimeSlot> {
        self.timeline.at(hour)
    }
}

/// A person of interest in the case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suspect {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "occupation")]
    pub role: String,
    #[serde(default)]
    pub motive: String,
    #[serde(default)]
    pub is_kira: bool,             // Ground-truth culprit flag
    #[serde(default)]
    pub alibi: Alibi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_evidence: Vec<String>,
}

impl Suspect {
    /// Short line for lists: "Light Yagami (Student)"
    pub fn brief(&self) -> String {
        if self.role.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.role)
        }
    }
}
