//! Evidence items found over the course of a case

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Categories of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    /// Objects recovered at a scene
    Physical,
    /// Phone records, emails, logs
    Digital,
    /// Camera footage placing a person somewhere at an hour
    Cctv,
    /// Medical examiner findings
    Autopsy,
    /// Background profile of a person
    Profile,
    /// Something noticed in the crime scene room
    RoomClue,
}

impl EvidenceType {
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceType::Physical => "Physical",
            EvidenceType::Digital => "Digital",
            EvidenceType::Cctv => "CCTV",
            EvidenceType::Autopsy => "Autopsy",
            EvidenceType::Profile => "Profile",
            EvidenceType::RoomClue => "Room Clue",
        }
    }
}

impl std::fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A piece of evidence in the case file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,          // Where it was found
    #[serde(default)]
    pub kill_index: Option<usize>, // Which murder it belongs to
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Typed view over the metadata of a cctv item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CctvSighting<'a> {
    pub hour: u8,
    pub location: &'a str,
    pub captured_person: &'a str,  // Suspect id
}

impl Evidence {
    /// The sighting recorded by a cctv item.
    ///
    /// `None` for other evidence types, or when the metadata lacks a usable
    /// `hour`, `location` or `capturedPerson`.
    pub fn cctv_sighting(&self) -> Option<CctvSighting<'_>> {
        if self.evidence_type != EvidenceType::Cctv {
            return None;
        }
        let hour = self.metadata.get("hour")?.as_u64()?;
        let location = self.metadata.get("location")?.as_str()?;
        let captured_person = self.metadata.get("capturedPerson")?.as_str()?;
        Some(CctvSighting {
            hour: u8::try_from(hour).ok()?,
            location,
            captured_person,
        })
    }

    pub fn belongs_to_kill(&self, kill_index: usize) -> bool {
        self.kill_index == Some(kill_index)
    }

    /// Get a brief description of the evidence
    pub fn brief(&self) -> String {
        match self.cctv_sighting() {
            Some(sighting) => format!(
                "{}: {} ({} at {}:00)",
                self.evidence_type, self.name, sighting.location, sighting.hour
            ),
            None => format!("{}: {}", self.evidence_type, self.name),
        }
    }
}
