//! Core case logic: loading, lookups, deduction

pub mod accusation;
pub mod contradictions;
pub mod investigation;
pub mod loader;
pub mod travel;

pub use accusation::Verdict;
pub use contradictions::{ContradictionAudit, ContradictionEngine, Finding};
pub use investigation::{flag_hour, AccusationOutcome, InvestigationSession, Rating};
pub use travel::{Adjacency, Route, TravelTable};

use crate::data::*;
use crate::{CaseError, MalformedCaseError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// A validated case with id-keyed indexes.
///
/// Built once, never mutated. Every lookup is total: unknown ids and
/// out-of-range indexes give `None` or an empty list.
#[derive(Debug, Clone)]
pub struct CaseEngine {
    /// The loaded case
    case: Case,

    /// The document the case was loaded from, exported as-is
    source: Value,

    /// Evidence id -> position in `case.evidence`
    evidence_index: HashMap<String, usize>,

    /// Suspect id -> position in `case.suspects`
    suspect_index: HashMap<String, usize>,

    /// Position of the culprit in `case.suspects`
    kira: usize,
}

impl CaseEngine {
    /// Wrap a case built in memory, checking the load invariants
    pub fn new(case: Case) -> Result<Self, MalformedCaseError> {
        let source = serde_json::to_value(&case)?;
        Self::from_parts(case, source)
    }

    fn from_parts(case: Case, source: Value) -> Result<Self, MalformedCaseError> {
        loader::validate_case(&case)?;
        let kira = case
            .suspects
            .iter()
            .position(|s| s.is_kira)
            .ok_or(MalformedCaseError::KiraCount(0))?;

        // First record wins when an id is repeated
        let mut evidence_index = HashMap::with_capacity(case.evidence.len());
        for (pos, evidence) in case.evidence.iter().enumerate() {
            evidence_index.entry(evidence.id.clone()).or_insert(pos);
        }
        let mut suspect_index = HashMap::with_capacity(case.suspects.len());
        for (pos, suspect) in case.suspects.iter().enumerate() {
            suspect_index.entry(suspect.id.clone()).or_insert(pos);
        }

        Ok(Self {
            case,
            source,
            evidence_index,
            suspect_index,
            kira,
        })
    }

    /// Load from JSON text
    pub fn load(raw: &str) -> Result<Self, MalformedCaseError> {
        Self::load_value(loader::parse(raw)?)
    }

    /// Load from a parsed JSON document
    pub fn load_value(value: Value) -> Result<Self, MalformedCaseError> {
        let case = loader::load_value(value.clone())?;
        Self::from_parts(case, value)
    }

    /// Load from a case file on disk
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, CaseError> {
        Ok(Self::load(&loader::read_path(path)?)?)
    }

    /// Fetch from an http(s) URL or a file path
    pub async fn fetch(source: &str) -> Result<Self, CaseError> {
        Ok(Self::load(&loader::fetch_raw(source).await?)?)
    }

    pub fn case(&self) -> &Case {
        &self.case
    }

    pub fn into_case(self) -> Case {
        self.case
    }

    /// The document as it was loaded, unknown fields included
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn kills(&self) -> &[Kill] {
        &self.case.kills
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.case.suspects
    }

    pub fn all_evidence(&self) -> &[Evidence] {
        &self.case.evidence
    }

    pub fn contradictions(&self) -> &[Contradiction] {
        &self.case.contradictions
    }

    /// Evidence by id
    pub fn evidence(&self, evidence_id: &str) -> Option<&Evidence> {
        self.evidence_index
            .get(evidence_id)
            .map(|&pos| &self.case.evidence[pos])
    }

    /// Suspect by id
    pub fn suspect(&self, suspect_id: &str) -> Option<&Suspect> {
        self.suspect_index
            .get(suspect_id)
            .map(|&pos| &self.case.suspects[pos])
    }

    /// Kill by its position in the case
    pub fn kill(&self, kill_index: usize) -> Option<&Kill> {
        self.case.kills.get(kill_index)
    }

    /// The culprit. A loaded case always has exactly one.
    pub fn kira(&self) -> &Suspect {
        &self.case.suspects[self.kira]
    }

    pub fn is_kira(&self, suspect_id: &str) -> bool {
        self.kira().id == suspect_id
    }

    /// All evidence tagged with a kill, in case order
    pub fn evidence_for_kill(&self, kill_index: usize) -> Vec<&Evidence> {
        self.case
            .evidence
            .iter()
            .filter(|e| e.belongs_to_kill(kill_index))
            .collect()
    }

    /// Authored contradictions against a suspect, in case order
    pub fn contradictions_for_suspect(&self, suspect_id: &str) -> Vec<&Contradiction> {
        self.case
            .contradictions
            .iter()
            .filter(|c| c.suspect_id == suspect_id)
            .collect()
    }

    /// Evidence tied to a suspect: their related evidence that resolves,
    /// then cctv footage capturing them
    pub fn evidence_for_suspect(&self, suspect_id: &str) -> Vec<&Evidence> {
        let Some(suspect) = self.suspect(suspect_id) else {
            return Vec::new();
        };

        let mut found: Vec<&Evidence> = suspect
            .related_evidence
            .iter()
            .filter_map(|id| self.evidence(id))
            .collect();
        for evidence in &self.case.evidence {
            let captured = evidence
                .cctv_sighting()
                .is_some_and(|s| s.captured_person == suspect_id);
            if captured && !found.iter().any(|e| e.id == evidence.id) {
                found.push(evidence);
            }
        }
        found
    }

    /// Pretty-printed JSON of the loaded case, for debugging and authoring.
    ///
    /// Field names and fields the engine does not model come out exactly as
    /// they were loaded.
    pub fn export_case(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.source)
    }
}
