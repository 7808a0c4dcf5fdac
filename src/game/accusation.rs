//! Judging the player's accusation

use super::{CaseEngine, ContradictionEngine};
use crate::data::Contradiction;
use serde::Serialize;

/// Outcome of accusing a suspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub suspect_id: String,
    pub success: bool,
    /// Why the accusation failed; absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// On success the accused's key contradictions, otherwise their
    /// authored contradictions for the player to review
    pub contradictions: Vec<Contradiction>,
}

impl ContradictionEngine<'_> {
    /// Accuse a suspect of being the killer
    pub fn check_accusation(&self, suspect_id: &str) -> Verdict {
        let case = self.case();
        let Some(suspect) = case.suspect(suspect_id) else {
            return Verdict {
                suspect_id: suspect_id.to_string(),
                success: false,
                reason: Some(format!("No suspect with id '{suspect_id}' is part of this case.")),
                contradictions: Vec::new(),
            };
        };

        let authored = case.contradictions_for_suspect(suspect_id);
        let verdict = if case.is_kira(suspect_id) {
            Verdict {
                suspect_id: suspect_id.to_string(),
                success: true,
                reason: None,
                contradictions: authored
                    .into_iter()
                    .filter(|c| c.is_key_contradiction)
                    .cloned()
                    .collect(),
            }
        } else {
            let findings = self.find_contradictions_for_suspect(suspect_id);
            let reason = if findings.is_empty() {
                format!(
                    "{}'s alibi holds up: nothing in the evidence contradicts their account.",
                    suspect.name
                )
            } else {
                format!(
                    "{} has {} inconsistencies in their story, but none of them prove they are the killer.",
                    suspect.name,
                    findings.len()
                )
            };
            Verdict {
                suspect_id: suspect_id.to_string(),
                success: false,
                reason: Some(reason),
                contradictions: authored.into_iter().cloned().collect(),
            }
        };

        tracing::debug!(suspect = suspect_id, success = verdict.success, "accusation judged");
        verdict
    }
}

impl CaseEngine {
    /// True once at least one key contradiction has been discovered
    pub fn can_solve_case<S: AsRef<str>>(&self, discovered_contradiction_ids: &[S]) -> bool {
        self.contradictions()
            .iter()
            .filter(|c| c.is_key_contradiction)
            .any(|c| {
                discovered_contradiction_ids
                    .iter()
                    .any(|id| id.as_ref() == c.id)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_suspects() -> CaseEngine {
        CaseEngine::load_value(json!({
            "id": "case_accuse",
            "title": "Accuse",
            "kills": [{
                "index": 0,
                "victim": {"id": "v", "name": "Watari", "timeOfDeath": 23, "location": "hq"},
                "method": "heart_attack",
                "room": "hq",
                "evidenceIds": []
            }],
            "suspects": [
                {"id": "a", "name": "Ada", "isKira": true},
                {"id": "b", "name": "Ben", "isKira": false, "alibi": {"timeline": [
                    {"hour": 23, "location": "home", "witnesses": ["Cy"]}
                ], "statement": "Home all night"}}
            ],
            "evidence": [],
            "contradictions": [
                {"id": "k1", "type": "alibi_time", "suspectId": "a", "evidenceIds": [0],
                 "description": "No alibi", "isKeyContradiction": true},
                {"id": "n1", "type": "witness_mismatch", "suspectId": "a", "evidenceIds": [],
                 "description": "Odd witness", "isKeyContradiction": false}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn accusing_the_culprit_succeeds() {
        let case = two_suspects();
        let engine = ContradictionEngine::new(&case);

        let verdict = engine.check_accusation("a");
        assert!(verdict.success);
        assert!(verdict.reason.is_none());
        let ids: Vec<&str> = verdict.contradictions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["k1"]);
    }

    #[test]
    fn accusing_an_innocent_explains_why() {
        let case = two_suspects();
        let engine = ContradictionEngine::new(&case);

        let verdict = engine.check_accusation("b");
        assert!(!verdict.success);
        let reason = verdict.reason.unwrap();
        assert!(!reason.is_empty());
        assert!(reason.contains("Ben's alibi holds up"));
    }

    #[test]
    fn accusing_a_stranger_fails() {
        let case = two_suspects();
        let engine = ContradictionEngine::new(&case);

        let verdict = engine.check_accusation("zed");
        assert!(!verdict.success);
        assert!(verdict.reason.unwrap().contains("'zed'"));
        assert!(verdict.contradictions.is_empty());
    }

    #[test]
    fn solving_needs_a_key_contradiction() {
        let case = two_suspects();
        assert!(!case.can_solve_case::<&str>(&[]));
        assert!(!case.can_solve_case(&["n1"]));
        assert!(case.can_solve_case(&["n1", "k1"]));
        assert!(case.can_solve_case(&[String::from("k1")]));
    }

    #[test]
    fn verdict_omits_reason_on_success() {
        let case = two_suspects();
        let engine = ContradictionEngine::new(&case);
        let json = serde_json::to_value(engine.check_accusation("a")).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("reason").is_none());
        assert_eq!(json["suspectId"], "a");
    }
}
