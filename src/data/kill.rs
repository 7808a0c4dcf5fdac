//! Victims and the murders committed against them

use serde::{Deserialize, Serialize};

/// Who died, when and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Victim {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub cause_of_death: String,
    pub time_of_death: u8,         // Hour, 0-23
    pub location: String,
}

/// How a victim was killed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KillMethod {
    HeartAttack,
    Poison,
    Accident,
    Physical,
}

impl std::fmt::Display for KillMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KillMethod::HeartAttack => write!(f, "Heart attack"),
            KillMethod::Poison => write!(f, "Poison"),
            KillMethod::Accident => write!(f, "Accident"),
            KillMethod::Physical => write!(f, "Physical"),
        }
    }
}

/// One murder in the case, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kill {
    pub index: usize,
    pub victim: Victim,
    pub method: KillMethod,
    #[serde(default)]
    pub room: String,              // Crime scene room key
    #[serde(default)]
    pub evidence_ids: Vec<String>,
}

impl Kill {
    pub fn hour(&self) -> u8 {
        self.victim.time_of_death
    }

    pub fn location(&self) -> &str {
        &self.victim.location
    }
}
