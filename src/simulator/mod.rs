//! Monte Carlo balance simulator for the boss fight.
//!
//! Runs thousands of seeded fights with a random party policy to analyze:
//! - How often the party wins and how long fights last
//! - How often the adversary reaches its second phase
//! - How often fights stall at the round cap
//!
//! Every run goes through `CombatSession`, so simulated fights follow the
//! same rules as interactive ones.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
