//! Case loading and structural validation
//!
//! Turns raw case input (JSON text, an already-parsed JSON value, a file, or
//! a URL) into a typed [`Case`]. Only the invariants below are checked; cross
//! references between records are trusted.
//!
//! 1. every required top-level field is present
//! 2. there is at least one kill
//! 3. there are at least two suspects
//! 4. exactly one suspect is the culprit

use crate::data::Case;
use crate::{CaseError, CaseSourceError, MalformedCaseError};
use serde_json::Value;
use std::path::Path;

/// Top-level fields every case file must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 6] = ["id", "title", "kills", "suspects", "evidence", "contradictions"];

/// Load a case from JSON text
pub fn load_str(raw: &str) -> Result<Case, MalformedCaseError> {
    load_value(parse(raw)?)
}

/// Parse JSON text into an untyped document
pub fn parse(raw: &str) -> Result<Value, MalformedCaseError> {
    let value: Value = serde_json::from_str(raw).inspect_err(|error| {
        tracing::warn!(%error, "rejected case: not valid JSON");
    })?;
    Ok(value)
}

/// Load a case from an already-parsed JSON document
pub fn load_value(value: Value) -> Result<Case, MalformedCaseError> {
    let result = validate_structure(&value)
        .and_then(|()| serde_json::from_value::<Case>(value).map_err(MalformedCaseError::from));

    match &result {
        Ok(case) => tracing::info!(
            case = %case.id,
            title = %case.title,
            kills = case.kills.len(),
            suspects = case.suspects.len(),
            evidence = case.evidence.len(),
            "case loaded"
        ),
        Err(error) => tracing::warn!(%error, "rejected case"),
    }
    result
}

/// Read and load a case file from disk
pub fn load_path(path: impl AsRef<Path>) -> Result<Case, CaseError> {
    Ok(load_str(&read_path(path)?)?)
}

/// Raw contents of a case file
pub fn read_path(path: impl AsRef<Path>) -> Result<String, CaseSourceError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "could not read case file");
        CaseSourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Fetch a case from an http(s) URL or a file path.
///
/// One attempt, no retries: a failed fetch is a [`CaseSourceError`], a fetched
/// document that fails validation is a [`MalformedCaseError`].
pub async fn fetch(source: &str) -> Result<Case, CaseError> {
    Ok(load_str(&fetch_raw(source).await?)?)
}

/// Raw case text from an http(s) URL or a file path
pub async fn fetch_raw(source: &str) -> Result<String, CaseSourceError> {
    if is_url(source) {
        return fetch_url(source).await;
    }
    tokio::fs::read_to_string(source).await.map_err(|source_error| {
        tracing::warn!(path = source, error = %source_error, "could not read case file");
        CaseSourceError::Io {
            path: source.into(),
            source: source_error,
        }
    })
}

async fn fetch_url(url: &str) -> Result<String, CaseSourceError> {
    let http_error = |source| CaseSourceError::Http {
        url: url.to_string(),
        source,
    };

    let response = reqwest::get(url).await.map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url, %status, "case fetch failed");
        return Err(CaseSourceError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().await.map_err(http_error)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Check the structural invariants on the raw document, before typing it,
/// so a missing field is reported by name.
pub fn validate_structure(value: &Value) -> Result<(), MalformedCaseError> {
    let object = value.as_object().ok_or(MalformedCaseError::NotAnObject)?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !object.contains_key(**field)) {
        return Err(MalformedCaseError::MissingField(*missing));
    }

    match object.get("kills").and_then(Value::as_array) {
        Some(kills) if !kills.is_empty() => {}
        _ => return Err(MalformedCaseError::NoKills),
    }

    let suspects = object
        .get("suspects")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if suspects.len() < 2 {
        return Err(MalformedCaseError::TooFewSuspects(suspects.len()));
    }

    let kira_count = suspects
        .iter()
        .filter(|s| s.get("isKira").and_then(Value::as_bool) == Some(true))
        .count();
    if kira_count != 1 {
        return Err(MalformedCaseError::KiraCount(kira_count));
    }

    Ok(())
}

/// The same invariants, for a case built in memory
pub fn validate_case(case: &Case) -> Result<(), MalformedCaseError> {
    if case.kills.is_empty() {
        return Err(MalformedCaseError::NoKills);
    }
    if case.suspects.len() < 2 {
        return Err(MalformedCaseError::TooFewSuspects(case.suspects.len()));
    }
    match case.kira_count() {
        1 => Ok(()),
        count => Err(MalformedCaseError::KiraCount(count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "id": "case_t",
            "title": "Test",
            "kills": [{
                "index": 0,
                "victim": {"id": "v", "name": "V", "timeOfDeath": 21, "location": "park"},
                "method": "poison",
                "room": "park",
                "evidenceIds": []
            }],
            "suspects": [
                {"id": "a", "name": "A", "isKira": true, "alibi": {"timeline": [], "statement": ""}},
                {"id": "b", "name": "B", "isKira": false, "alibi": {"timeline": [], "statement": ""}}
            ],
            "evidence": [],
            "contradictions": []
        })
    }

    #[test]
    fn loads_minimal_case() {
        let case = load_value(minimal()).unwrap();
        assert_eq!(case.id, "case_t");
        assert_eq!(case.kills.len(), 1);
        assert_eq!(case.metadata, Default::default());
    }

    #[rstest]
    #[case("id")]
    #[case("title")]
    #[case("kills")]
    #[case("suspects")]
    #[case("evidence")]
    #[case("contradictions")]
    fn names_the_missing_field(#[case] field: &str) {
        let mut raw = minimal();
        raw.as_object_mut().unwrap().remove(field);

        let err = load_value(raw).unwrap_err();
        assert!(matches!(err, MalformedCaseError::MissingField(f) if f == field));
        assert_eq!(err.to_string(), format!("Missing required field: {field}"));
    }

    #[test]
    fn first_missing_field_wins() {
        let err = load_value(json!({"title": "no id, no anything"})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: id");
    }

    #[test]
    fn rejects_case_without_kills() {
        let mut raw = minimal();
        raw["kills"] = json!([]);
        assert!(matches!(load_value(raw).unwrap_err(), MalformedCaseError::NoKills));
    }

    #[test]
    fn rejects_lone_suspect() {
        let mut raw = minimal();
        raw["suspects"].as_array_mut().unwrap().pop();
        let err = load_value(raw).unwrap_err();
        assert!(matches!(err, MalformedCaseError::TooFewSuspects(1)));
    }

    #[rstest]
    #[case(false, false, 0)]
    #[case(true, true, 2)]
    fn reports_actual_kira_count(#[case] a: bool, #[case] b: bool, #[case] expected: usize) {
        let mut raw = minimal();
        raw["suspects"][0]["isKira"] = json!(a);
        raw["suspects"][1]["isKira"] = json!(b);

        let err = load_value(raw).unwrap_err();
        assert!(matches!(err, MalformedCaseError::KiraCount(n) if n == expected));
        assert_eq!(err.to_string(), format!("Case must have exactly 1 Kira, found {expected}"));
    }

    #[test]
    fn rejects_non_object_and_bad_json() {
        assert!(matches!(load_value(json!([1, 2])).unwrap_err(), MalformedCaseError::NotAnObject));
        assert!(matches!(load_str("{ not json").unwrap_err(), MalformedCaseError::Json(_)));
    }

    #[test]
    fn rejects_duplicate_alibi_hours() {
        let mut raw = minimal();
        raw["suspects"][0]["alibi"]["timeline"] = json!([
            {"hour": 20, "location": "home"},
            {"hour": 20, "location": "park"}
        ]);
        let err = load_value(raw).unwrap_err();
        assert!(matches!(err, MalformedCaseError::Json(_)));
        assert!(err.to_string().contains("more than one slot for hour 20"));
    }

    #[test]
    fn validates_in_memory_cases() {
        let mut case = load_value(minimal()).unwrap();
        assert!(validate_case(&case).is_ok());

        case.suspects[1].is_kira = true;
        assert!(matches!(validate_case(&case), Err(MalformedCaseError::KiraCount(2))));

        case.kills.clear();
        assert!(matches!(validate_case(&case), Err(MalformedCaseError::NoKills)));
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = load_path("/definitely/not/here/case.json").unwrap_err();
        assert!(matches!(err, CaseError::Source(CaseSourceError::Io { .. })));
        assert!(!err.is_malformed());
    }

    #[test]
    fn recognises_urls() {
        assert!(is_url("https://example.com/case.json"));
        assert!(is_url("http://localhost:8080/case.json"));
        assert!(!is_url("data/cases/case_001.json"));
    }
}
