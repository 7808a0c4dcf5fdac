//! Shadow Ledger: case model and contradiction engine
//!
//! A murder-mystery deduction game where you cross-reference suspects'
//! alibis against kill times, CCTV sightings and travel times to work out
//! who is lying, then accuse the killer.
//!
//! # Game Mechanics
//!
//! - **Case files**: Victims, suspects, alibis and evidence authored as JSON
//! - **Contradictions**: Alibis that cannot be true given the evidence
//! - **Accusation**: One suspect is the killer; the evidence decides who
//!
//! # Architecture
//!
//! - `data` - Case records: kills, suspects, alibis, evidence, contradictions
//! - `game` - Loading, lookups, contradiction detection, accusation, session state
//! - `config` - Layered configuration
//! - `telemetry` - Tracing subscriber setup
//!
//! Presentation (scenes, hotspots, the timeline grid) lives outside this
//! crate and only calls into [`CaseEngine`] and [`ContradictionEngine`].

pub mod config;
pub mod data;
pub mod game;
pub mod telemetry;

pub use config::{ConfigError, EngineConfig};
pub use data::*;
pub use game::{
    AccusationOutcome, Adjacency, CaseEngine, ContradictionAudit, ContradictionEngine, Finding,
    InvestigationSession, Rating, TravelTable, Verdict,
};

use std::path::PathBuf;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for application glue such as telemetry setup
pub type Result<T> = anyhow::Result<T>;

/// The case bytes could not be obtained
#[derive(thiserror::Error, Debug)]
pub enum CaseSourceError {
    #[error("Failed to read case file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch case from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch case from {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// The case was obtained but breaks a structural invariant
#[derive(thiserror::Error, Debug)]
pub enum MalformedCaseError {
    #[error("Invalid case data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Case must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Case must have at least one kill")]
    NoKills,

    #[error("Case must have at least 2 suspects, found {0}")]
    TooFewSuspects(usize),

    #[error("Case must have exactly 1 Kira, found {0}")]
    KiraCount(usize),
}

/// Any failure of a load attempt
#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error(transparent)]
    Source(#[from] CaseSourceError),

    #[error(transparent)]
    Malformed(#[from] MalformedCaseError),
}

impl CaseError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, CaseError::Malformed(_))
    }
}
