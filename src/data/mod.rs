//! Data structures for a case file
//!
//! Defines victims, kills, suspects, alibis, evidence and the authored
//! contradictions. Every record keeps the exact JSON field names used by
//! existing case files.

pub mod case;
pub mod contradiction;
pub mod evidence;
pub mod kill;
pub mod suspect;
pub mod timeline;

pub use case::*;
pub use contradiction::*;
pub use evidence::*;
pub use kill::*;
pub use suspect::*;
pub use timeline::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a detected contradiction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A unique identifier wrapper for runtime objects (sessions).
/// Case records use the string ids authored in the case file instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
