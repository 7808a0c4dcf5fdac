//! Shared fixtures for integration tests

#![allow(dead_code)]

use shadow_ledger::CaseEngine;

pub const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/case_001_downtown_murders.json"
);

pub fn fixture_json() -> String {
    std::fs::read_to_string(FIXTURE).expect("fixture readable")
}

pub fn downtown_murders() -> CaseEngine {
    CaseEngine::load_path(FIXTURE).expect("fixture loads")
}
