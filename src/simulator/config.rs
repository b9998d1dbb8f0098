//! Simulation configuration.

use crate::core::config::EncounterConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of fights to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Combatants and round cap used for every fight
    pub encounter: EncounterConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            encounter: EncounterConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch for smoke checks
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            ..Default::default()
        }
    }
}
