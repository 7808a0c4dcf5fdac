//! Contradiction detection
//!
//! Cross-references each suspect's alibi against the kills, the cctv
//! footage and the travel table. Every check is a pure read of the case,
//! independent of the contradictions the author planted.

use super::travel::{Adjacency, TravelTable};
use super::CaseEngine;
use crate::data::*;
use serde::Serialize;

/// A contradiction derived from the case data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: ContradictionType,
    pub description: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kill_index: Option<usize>,     // Set by the kill-time check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_id: Option<String>,   // Set by the cctv check
}

impl Finding {
    fn new(kind: ContradictionType, severity: Severity, description: String) -> Self {
        Self {
            kind,
            description,
            severity,
            kill_index: None,
            evidence_id: None,
        }
    }
}

/// Authored contradictions split by whether the detectors back them up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContradictionAudit<'a> {
    pub valid: Vec<&'a Contradiction>,
    pub invalid: Vec<&'a Contradiction>,
}

/// Runs the detectors over a loaded case
#[derive(Debug, Clone)]
pub struct ContradictionEngine<'a> {
    case: &'a CaseEngine,
    travel: TravelTable,
}

impl<'a> ContradictionEngine<'a> {
    /// Engine using the built-in travel table
    pub fn new(case: &'a CaseEngine) -> Self {
        Self::with_travel_table(case, TravelTable::default())
    }

    pub fn with_travel_table(case: &'a CaseEngine, travel: TravelTable) -> Self {
        Self { case, travel }
    }

    pub fn case(&self) -> &'a CaseEngine {
        self.case
    }

    pub fn travel_table(&self) -> &TravelTable {
        &self.travel
    }

    /// Does the suspect's alibi cover the kill's time of death?
    ///
    /// No slot at that hour is a high finding; a slot at the kill location
    /// is a critical one.
    pub fn check_alibi_vs_kill_time(&self, suspect_id: &str, kill_index: usize) -> Option<Finding> {
        let suspect = self.case.suspect(suspect_id)?;
        let kill = self.case.kill(kill_index)?;
        let hour = kill.hour();

        let finding = match suspect.alibi.slot_at(hour) {
            None => Finding::new(
                ContradictionType::AlibiTime,
                Severity::High,
                format!("{} has no alibi for hour {}", suspect.name, hour),
            ),
            Some(slot) if slot.location == kill.location() => Finding::new(
                ContradictionType::AlibiTime,
                Severity::Critical,
                format!("{} was at {} during time of death", suspect.name, kill.location()),
            ),
            Some(_) => return None,
        };

        tracing::debug!(suspect = suspect_id, kill_index, severity = %finding.severity, "alibi does not cover kill");
        Some(finding)
    }

    /// Does cctv footage of the suspect put them somewhere other than
    /// their alibi claims?
    ///
    /// Silent when the item is not cctv, captures someone else, or the
    /// suspect claims nothing for that hour.
    pub fn check_cctv_conflict(&self, suspect_id: &str, evidence_id: &str) -> Option<Finding> {
        let suspect = self.case.suspect(suspect_id)?;
        let sighting = self.case.evidence(evidence_id)?.cctv_sighting()?;
        if sighting.captured_person != suspect_id {
            return None;
        }

        let slot = suspect.alibi.slot_at(sighting.hour)?;
        if slot.location == sighting.location {
            return None;
        }

        tracing::debug!(suspect = suspect_id, evidence = evidence_id, "cctv contradicts alibi");
        Some(Finding::new(
            ContradictionType::EvidenceConflict,
            Severity::Critical,
            format!(
                "{} claimed to be at {} at {}:00, but CCTV shows them at {}",
                suspect.name, slot.location, sighting.hour, sighting.location
            ),
        ))
    }

    /// Can the suspect have moved between consecutive alibi locations in
    /// the hour between them?
    ///
    /// Only the first impossible move, in chronological order, is reported.
    pub fn check_impossible_travel(&self, suspect_id: &str) -> Option<Finding> {
        let suspect = self.case.suspect(suspect_id)?;
        let slots: Vec<&TimeSlot> = suspect.alibi.timeline.iter().collect();

        slots.windows(2).find_map(|pair| {
            let (current, next) = (pair[0], pair[1]);
            let gap = next.hour - current.hour;
            if gap != 1 || current.location == next.location {
                return None;
            }

            match self.travel.adjacency(&current.location, &next.location) {
                Adjacency::Unconstrained => None,
                Adjacency::Requires(required) if required > gap => {
                    tracing::debug!(
                        suspect = suspect_id,
                        from = %current.location,
                        to = %next.location,
                        required,
                        "impossible travel"
                    );
                    Some(Finding::new(
                        ContradictionType::TimelineImpossible,
                        Severity::High,
                        format!(
                            "{} couldn't travel from {} to {} in {} hour(s)",
                            suspect.name, current.location, next.location, gap
                        ),
                    ))
                }
                Adjacency::Requires(_) => None,
            }
        })
    }

    /// Everything the detectors find against one suspect.
    ///
    /// Order is stable: kill-time checks by kill index, then cctv checks in
    /// evidence order, then at most one travel finding.
    pub fn find_contradictions_for_suspect(&self, suspect_id: &str) -> Vec<Finding> {
        let mut found = Vec::new();

        for kill_index in 0..self.case.kills().len() {
            if let Some(mut finding) = self.check_alibi_vs_kill_time(suspect_id, kill_index) {
                finding.kill_index = Some(kill_index);
                found.push(finding);
            }
        }

        let cctv = self
            .case
            .all_evidence()
            .iter()
            .filter(|e| e.evidence_type == EvidenceType::Cctv);
        for evidence in cctv {
            if let Some(mut finding) = self.check_cctv_conflict(suspect_id, &evidence.id) {
                finding.evidence_id = Some(evidence.id.clone());
                found.push(finding);
            }
        }

        if let Some(finding) = self.check_impossible_travel(suspect_id) {
            found.push(finding);
        }

        found
    }

    /// Findings for every suspect, in case order
    pub fn findings_by_suspect(&self) -> Vec<(&'a Suspect, Vec<Finding>)> {
        self.case
            .suspects()
            .iter()
            .map(|s| (s, self.find_contradictions_for_suspect(&s.id)))
            .collect()
    }

    /// Re-check the author's contradictions against the detectors.
    ///
    /// `alibi_time` entries are re-run through the kill-time check (first
    /// reference read as a kill index), `evidence_conflict` entries through
    /// the cctv check. Other types appear in neither list.
    pub fn validate_all_contradictions(&self) -> ContradictionAudit<'a> {
        let mut audit = ContradictionAudit::default();

        for contradiction in self.case.contradictions() {
            let suspect_id = contradiction.suspect_id.as_str();
            let confirmed = match contradiction.contradiction_type {
                ContradictionType::AlibiTime => contradiction
                    .kill_index()
                    .and_then(|kill_index| self.check_alibi_vs_kill_time(suspect_id, kill_index))
                    .is_some(),
                ContradictionType::EvidenceConflict => contradiction
                    .primary_evidence_id()
                    .and_then(|evidence_id| self.check_cctv_conflict(suspect_id, evidence_id))
                    .is_some(),
                ContradictionType::WitnessMismatch | ContradictionType::TimelineImpossible => continue,
            };

            if confirmed {
                audit.valid.push(contradiction);
            } else {
                audit.invalid.push(contradiction);
            }
        }

        tracing::debug!(valid = audit.valid.len(), invalid = audit.invalid.len(), "audited authored contradictions");
        audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Two suspects, one kill at 19:00 on the bridge
    fn case_with_timeline(timeline: serde_json::Value) -> CaseEngine {
        CaseEngine::load_value(json!({
            "id": "case_unit",
            "title": "Unit",
            "kills": [{
                "index": 0,
                "victim": {"id": "v", "name": "Lind", "timeOfDeath": 19, "location": "bridge"},
                "method": "heart_attack",
                "room": "bridge",
                "evidenceIds": []
            }],
            "suspects": [
                {"id": "a", "name": "Ada", "isKira": true, "alibi": {"timeline": timeline, "statement": ""}},
                {"id": "b", "name": "Ben", "isKira": false, "alibi": {"timeline": [
                    {"hour": 19, "location": "home"}
                ], "statement": ""}}
            ],
            "evidence": [],
            "contradictions": []
        }))
        .unwrap()
    }

    #[test]
    fn missing_slot_at_time_of_death_is_high() {
        let case = case_with_timeline(json!([{"hour": 18, "location": "office"}]));
        let engine = ContradictionEngine::new(&case);

        let finding = engine.check_alibi_vs_kill_time("a", 0).unwrap();
        assert_eq!(finding.kind, ContradictionType::AlibiTime);
        assert_eq!(finding.severity, Severity::High);
        assert_eq!(finding.description, "Ada has no alibi for hour 19");
    }

    #[test]
    fn slot_at_murder_scene_is_critical() {
        let case = case_with_timeline(json!([{"hour": 19, "location": "bridge"}]));
        let engine = ContradictionEngine::new(&case);

        let finding = engine.check_alibi_vs_kill_time("a", 0).unwrap();
        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.description, "Ada was at bridge during time of death");
    }

    #[test]
    fn alibi_elsewhere_is_clean() {
        let case = case_with_timeline(json!([]));
        let engine = ContradictionEngine::new(&case);
        assert!(engine.check_alibi_vs_kill_time("b", 0).is_none());
        assert!(engine.check_alibi_vs_kill_time("nobody", 0).is_none());
        assert!(engine.check_alibi_vs_kill_time("b", 3).is_none());
    }

    #[test]
    fn cctv_at_an_unclaimed_hour_is_silent() {
        let case = CaseEngine::load_value(json!({
            "id": "case_cctv",
            "title": "Cctv",
            "kills": [{
                "index": 0,
                "victim": {"id": "v", "name": "Lind", "timeOfDeath": 20, "location": "bridge"},
                "method": "heart_attack",
                "room": "bridge",
                "evidenceIds": ["cam"]
            }],
            "suspects": [
                {"id": "a", "name": "Ada", "isKira": true, "alibi": {"timeline": [
                    {"hour": 20, "location": "library", "witnesses": ["Librarian"]}
                ], "statement": ""}},
                {"id": "b", "name": "Ben", "isKira": false}
            ],
            "evidence": [
                {"id": "cam", "type": "cctv", "name": "Pier cam", "killIndex": 0,
                 "metadata": {"hour": 21, "location": "pier", "capturedPerson": "a"}}
            ],
            "contradictions": []
        }))
        .unwrap();
        let engine = ContradictionEngine::new(&case);

        assert!(engine.check_cctv_conflict("a", "cam").is_none());
        assert!(engine
            .find_contradictions_for_suspect("a")
            .iter()
            .all(|f| f.kind != ContradictionType::EvidenceConflict));
    }

    #[test]
    fn office_to_bridge_in_one_hour_is_impossible() {
        let case = case_with_timeline(json!([
            {"hour": 18, "location": "office"},
            {"hour": 19, "location": "bridge"}
        ]));
        let table = TravelTable::builtin().with_route("office", "bridge", 2);
        let engine = ContradictionEngine::with_travel_table(&case, table);

        let finding = engine.check_impossible_travel("a").unwrap();
        assert_eq!(finding.kind, ContradictionType::TimelineImpossible);
        assert_eq!(finding.severity, Severity::High);
        assert_eq!(finding.description, "Ada couldn't travel from office to bridge in 1 hour(s)");
    }

    #[test]
    fn travel_uses_reverse_route() {
        let case = case_with_timeline(json!([
            {"hour": 18, "location": "bridge"},
            {"hour": 19, "location": "office"}
        ]));
        let table = TravelTable::empty().with_route("office", "bridge", 2);
        let engine = ContradictionEngine::with_travel_table(&case, table);
        assert!(engine.check_impossible_travel("a").is_some());
    }

    #[test]
    fn travel_within_the_required_time_is_clean() {
        let case = case_with_timeline(json!([
            {"hour": 18, "location": "office"},
            {"hour": 19, "location": "home"}
        ]));
        let engine = ContradictionEngine::new(&case);
        assert!(engine.check_impossible_travel("a").is_none());
    }

    #[test]
    fn travel_ignores_gaps_and_unknown_routes() {
        let case = case_with_timeline(json!([
            {"hour": 16, "location": "office"},
            {"hour": 18, "location": "bridge"},
            {"hour": 19, "location": "library"}
        ]));
        let table = TravelTable::empty().with_route("office", "bridge", 2);
        let engine = ContradictionEngine::with_travel_table(&case, table);
        assert!(engine.check_impossible_travel("a").is_none());
    }

    #[test]
    fn travel_reports_only_the_first_violation() {
        let case = case_with_timeline(json!([
            {"hour": 20, "location": "suburbs"},
            {"hour": 21, "location": "downtown"},
            {"hour": 17, "location": "downtown"},
            {"hour": 18, "location": "suburbs"}
        ]));
        let engine = ContradictionEngine::new(&case);

        let findings = engine.find_contradictions_for_suspect("a");
        let travel: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.kind == ContradictionType::TimelineImpossible)
            .collect();
        assert_eq!(travel.len(), 1);
        assert_eq!(
            travel[0].description,
            "Ada couldn't travel from downtown to suburbs in 1 hour(s)"
        );
    }

    #[test]
    fn finding_serializes_like_case_records() {
        let case = case_with_timeline(json!([]));
        let engine = ContradictionEngine::new(&case);
        let findings = engine.find_contradictions_for_suspect("a");

        assert_eq!(
            serde_json::to_value(&findings).unwrap(),
            json!([{
                "type": "alibi_time",
                "description": "Ada has no alibi for hour 19",
                "severity": "high",
                "killIndex": 0
            }])
        );
    }
}
