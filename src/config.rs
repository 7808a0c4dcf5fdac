//! Layered configuration
//!
//! Sources, highest priority first:
//! 1. Environment variables (`SHADOW_LEDGER_*` prefix, `__` as separator)
//! 2. Project-level `shadow-ledger.toml`
//! 3. User-level `~/.config/shadow-ledger/config.toml`
//! 4. Built-in defaults
//!
//! `SHADOW_LEDGER_SESSION__MAX_ACCUSATIONS=5` maps to `session.max_accusations`.

use crate::game::investigation::DEFAULT_MAX_ACCUSATIONS;
use crate::game::{CaseEngine, InvestigationSession, Route, TravelTable};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Figment extraction or merge error
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Where the default case comes from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CaseSourceConfig {
    /// File path or http(s) URL
    pub source: String,
}

impl Default for CaseSourceConfig {
    fn default() -> Self {
        Self {
            source: "data/cases/case_001_downtown_murders.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    pub max_accusations: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_accusations: DEFAULT_MAX_ACCUSATIONS,
        }
    }
}

/// Extra routes merged over the built-in travel table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TravelConfig {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub case: CaseSourceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub travel: TravelConfig,
}

impl EngineConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// The provider chain, exposed so tests can layer extra sources
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("shadow-ledger.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SHADOW_LEDGER_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("shadow-ledger").join("config.toml"))
    }

    /// Built-in routes plus the configured ones
    pub fn travel_table(&self) -> TravelTable {
        let mut table = TravelTable::builtin();
        table.extend(self.travel.routes.iter().cloned());
        table
    }

    /// A fresh session using the configured accusation allowance
    pub fn new_session(&self, case: &CaseEngine) -> InvestigationSession {
        InvestigationSession::with_max_accusations(case, self.session.max_accusations)
    }
}
