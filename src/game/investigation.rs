//! Investigation progress and timeline highlighting
//!
//! The session is owned by whoever drives the game (a scene, a test, a
//! server handler) and passed where it is needed. The case engine never
//! holds or mutates it.

use super::{CaseEngine, Verdict};
use crate::data::Id;
use serde::{Deserialize, Serialize};

/// Wrong accusations allowed before the killer escapes
pub const DEFAULT_MAX_ACCUSATIONS: u32 = 3;

/// How cleanly the case was solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Perfect,       // No wrong accusations
    Good,          // One wrong accusation
    Acceptable,    // More than one
}

impl Rating {
    pub fn from_wrong_accusations(wrong: u32) -> Self {
        match wrong {
            0 => Rating::Perfect,
            1 => Rating::Good,
            _ => Rating::Acceptable,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Perfect => write!(f, "Perfect!"),
            Rating::Good => write!(f, "Good"),
            Rating::Acceptable => write!(f, "Acceptable"),
        }
    }
}

/// What an accusation did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccusationOutcome {
    Solved { wrong_accusations: u32, rating: Rating },
    Incorrect { attempts_left: u32 },
    KillerEscaped { wrong_accusations: u32 },
}

/// A player's progress through one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationSession {
    pub id: Id,

    /// Evidence ids found so far, in discovery order
    discovered_evidence: Vec<String>,

    /// Contradiction ids the player has pointed out
    discovered_contradictions: Vec<String>,

    /// Kill currently under investigation
    current_kill: usize,

    /// Number of kills in the case, bounds navigation
    kill_count: usize,

    pub wrong_accusations: u32,
    pub max_accusations: u32,

    /// Set once the case is solved or lost
    pub outcome: Option<AccusationOutcome>,
}

impl InvestigationSession {
    pub fn new(case: &CaseEngine) -> Self {
        Self::with_max_accusations(case, DEFAULT_MAX_ACCUSATIONS)
    }

    pub fn with_max_accusations(case: &CaseEngine, max_accusations: u32) -> Self {
        Self {
            id: Id::new(),
            discovered_evidence: Vec::new(),
            discovered_contradictions: Vec::new(),
            current_kill: 0,
            kill_count: case.kills().len(),
            wrong_accusations: 0,
            max_accusations,
            outcome: None,
        }
    }

    /// Record a found evidence item. Returns false if it was already known.
    pub fn discover_evidence(&mut self, evidence_id: &str) -> bool {
        if self.has_discovered(evidence_id) {
            return false;
        }
        self.discovered_evidence.push(evidence_id.to_string());
        true
    }

    pub fn has_discovered(&self, evidence_id: &str) -> bool {
        self.discovered_evidence.iter().any(|id| id == evidence_id)
    }

    pub fn discovered_evidence(&self) -> &[String] {
        &self.discovered_evidence
    }

    /// Record a contradiction the player spotted. Returns false if already known.
    pub fn discover_contradiction(&mut self, contradiction_id: &str) -> bool {
        if self.discovered_contradictions.iter().any(|id| id == contradiction_id) {
            return false;
        }
        self.discovered_contradictions.push(contradiction_id.to_string());
        true
    }

    pub fn discovered_contradictions(&self) -> &[String] {
        &self.discovered_contradictions
    }

    /// (found, total) evidence counts
    pub fn evidence_progress(&self, case: &CaseEngine) -> (usize, usize) {
        (self.discovered_evidence.len(), case.all_evidence().len())
    }

    pub fn current_kill(&self) -> usize {
        self.current_kill
    }

    /// Move to the next kill; stays put on the last one
    pub fn next_kill(&mut self) -> usize {
        if self.current_kill + 1 < self.kill_count {
            self.current_kill += 1;
        }
        self.current_kill
    }

    /// Move to the previous kill; stays put on the first one
    pub fn previous_kill(&mut self) -> usize {
        self.current_kill = self.current_kill.saturating_sub(1);
        self.current_kill
    }

    pub fn attempts_left(&self) -> u32 {
        self.max_accusations.saturating_sub(self.wrong_accusations)
    }

    /// Whether enough has been found to allow an accusation
    pub fn can_accuse(&self, case: &CaseEngine) -> bool {
        self.outcome.is_none() && case.can_solve_case(&self.discovered_contradictions)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Apply a verdict to the session
    pub fn record_verdict(&mut self, verdict: &Verdict) -> AccusationOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        let outcome = if verdict.success {
            AccusationOutcome::Solved {
                wrong_accusations: self.wrong_accusations,
                rating: Rating::from_wrong_accusations(self.wrong_accusations),
            }
        } else {
            self.wrong_accusations += 1;
            match self.attempts_left() {
                0 => AccusationOutcome::KillerEscaped {
                    wrong_accusations: self.wrong_accusations,
                },
                attempts_left => AccusationOutcome::Incorrect { attempts_left },
            }
        };

        if !matches!(outcome, AccusationOutcome::Incorrect { .. }) {
            self.outcome = Some(outcome);
        }
        tracing::info!(session = %self.id, suspect = %verdict.suspect_id, ?outcome, "accusation recorded");
        outcome
    }
}

/// Should a cell of the timeline grid be highlighted?
///
/// True when the suspect's claimed hour is suspicious with respect to the
/// kill under investigation. Hours the suspect claims nothing for are only
/// flagged by an authored contradiction naming that hour.
pub fn flag_hour(case: &CaseEngine, suspect_id: &str, hour: u8, kill_index: usize) -> bool {
    let authored = case.contradictions_for_suspect(suspect_id);
    if authored.iter().any(|c| c.mentions_hour(hour)) {
        return true;
    }

    let (Some(suspect), Some(kill)) = (case.suspect(suspect_id), case.kill(kill_index)) else {
        return false;
    };
    let Some(slot) = suspect.alibi.slot_at(hour) else {
        return false;
    };

    if hour == kill.hour() {
        if !slot.has_witnesses() || slot.location == kill.location() {
            return true;
        }
        let key_for_this_kill = authored.iter().filter(|c| c.is_key_contradiction).any(|c| {
            c.evidence_ids
                .iter()
                .filter_map(|id| case.evidence(id))
                .any(|e| e.belongs_to_kill(kill.index))
        });
        if key_for_this_kill {
            return true;
        }
    }

    case.all_evidence()
        .iter()
        .filter_map(|e| e.cctv_sighting())
        .any(|s| s.hour == hour && s.captured_person == suspect_id && s.location != slot.location)
}
