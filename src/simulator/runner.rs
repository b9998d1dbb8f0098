//! Runs many fights through the real combat session.
//!
//! Each run drives a [`CombatSession`] with a [`RandomSelector`] and tallies
//! what happened from the session's report and event stream.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::combat::events::CombatEvent;
use crate::combat::input::RandomSelector;
use crate::combat::session::CombatSession;
use crate::core::config::EncounterConfig;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(&config.encounter, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} in {} rounds, party HP {}, adversary HP {}",
                run_idx + 1,
                config.num_runs,
                run_stats.outcome.label(),
                run_stats.rounds,
                run_stats.party_hp_left,
                run_stats.adversary_hp_left
            );
        }
        all_runs.push(run_stats);
    }

    tracing::info!(runs = all_runs.len(), "simulation complete");
    SimReport::from_runs(all_runs)
}

/// One fight with a random party policy.
pub fn simulate_single_run(encounter: &EncounterConfig, rng: &mut impl Rng) -> RunStats {
    let mut session = CombatSession::new(encounter.build_party(), encounter.build_adversary())
        .with_round_cap(encounter.round_cap);
    let mut selector = RandomSelector::new(rng);
    let mut events: Vec<CombatEvent> = Vec::new();

    let report = session.run(&mut selector, &mut events);

    let mut stats = RunStats {
        outcome: report.outcome,
        rounds: report.rounds,
        party_hp_left: session.party().actor.hp(),
        adversary_hp_left: session.adversary().actor.hp(),
        reached_phase_two: false,
        mana_shortfalls: 0,
        items_used: 0,
        damage_dealt: 0,
        damage_taken: 0,
    };

    let party_name = session.party().name();
    for event in &events {
        match event {
            CombatEvent::PhaseChanged { .. } => stats.reached_phase_two = true,
            CombatEvent::ManaShortfall { .. } => stats.mana_shortfalls += 1,
            CombatEvent::ItemUsed { .. } => stats.items_used += 1,
            CombatEvent::Damaged { actor, amount, .. } => {
                if actor == party_name {
                    stats.damage_taken = stats.damage_taken.saturating_add(*amount);
                } else {
                    stats.damage_dealt = stats.damage_dealt.saturating_add(*amount);
                }
            }
            _ => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 20,
            verbosity: 0,
            ..SimConfig::quick(42)
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.victories, b.victories);
        assert_eq!(a.round_distribution, b.round_distribution);
    }

    #[test]
    fn test_single_run_respects_round_cap() {
        let mut encounter = EncounterConfig::default();
        encounter.round_cap = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let stats = simulate_single_run(&encounter, &mut rng);
        assert!(stats.rounds <= 3);
    }

    #[test]
    fn test_run_stats_track_damage() {
        let encounter = EncounterConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let stats = simulate_single_run(&encounter, &mut rng);
        assert!(stats.damage_dealt > 0);
        assert_eq!(stats.damage_dealt >= 70, stats.outcome.is_victory());
    }
}
