//! Encounter configuration: who fights and for how long.
//!
//! Everything defaults to the fixed constants, so an empty JSON object is a
//! valid config. Fields that are present override the defaults.

use super::constants::*;
use crate::combat::adversary::Adversary;
use crate::combat::party::PartyMember;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Base stats for one combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantProfile {
    pub name: String,
    pub max_hp: u32,
    pub max_mp: u32,
    pub strength: u32,
    pub intelligence: u32,
}

impl CombatantProfile {
    pub fn party_default() -> Self {
        Self {
            name: PARTY_DEFAULT_NAME.to_string(),
            max_hp: PARTY_BASE_HP,
            max_mp: PARTY_BASE_MP,
            strength: PARTY_BASE_STRENGTH,
            intelligence: PARTY_BASE_INTELLIGENCE,
        }
    }

    pub fn adversary_default() -> Self {
        Self {
            name: ADVERSARY_DEFAULT_NAME.to_string(),
            max_hp: ADVERSARY_BASE_HP,
            max_mp: ADVERSARY_BASE_MP,
            strength: ADVERSARY_BASE_STRENGTH,
            intelligence: ADVERSARY_BASE_INTELLIGENCE,
        }
    }

    fn validate(&self, role: &str) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{} name is empty", role)));
        }
        if self.max_hp == 0 {
            return Err(ConfigError::Invalid(format!(
                "{} '{}' has zero max hp",
                role, self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub party: CombatantProfile,
    pub adversary: CombatantProfile,
    pub round_cap: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            party: CombatantProfile::party_default(),
            adversary: CombatantProfile::adversary_default(),
            round_cap: ROUND_CAP,
        }
    }
}

impl EncounterConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.party.validate("party member")?;
        self.adversary.validate("adversary")?;
        if self.round_cap == 0 {
            return Err(ConfigError::Invalid("round cap must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn build_party(&self) -> PartyMember {
        PartyMember::from_profile(&self.party)
    }

    pub fn build_adversary(&self) -> Adversary {
        Adversary::from_profile(&self.adversary)
    }
}
