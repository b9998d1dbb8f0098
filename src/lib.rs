//! Boss Arena - turn-based boss fight library
//!
//! This crate exposes the combat engine for the interactive binary, the
//! balance simulator and tests.

pub mod combat;
pub mod core;
pub mod simulator;

pub use crate::core::config::{CombatantProfile, ConfigError, EncounterConfig};
pub use combat::session::{run_combat, CombatOutcome, CombatReport, CombatSession, DefeatReason};
