//! Integration test: Monte Carlo simulator and encounter configs
//!
//! Runs seeded batches through the public simulator API and checks that the
//! aggregate report agrees with the individual runs it was built from.

use boss_arena::combat::session::{CombatOutcome, DefeatReason};
use boss_arena::simulator::{run_simulation, simulate_single_run, SimConfig, SimReport};
use boss_arena::EncounterConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn seeded(num_runs: u32, seed: u64) -> SimConfig {
    SimConfig {
        num_runs,
        seed: Some(seed),
        verbosity: 0,
        ..SimConfig::default()
    }
}

#[test]
fn report_totals_match_individual_runs() {
    let report = run_simulation(&seeded(200, 7));

    assert_eq!(report.num_runs, 200);
    assert_eq!(report.run_stats.len(), 200);
    assert_eq!(
        report.victories
            + report.defeats_party_fell
            + report.defeats_round_cap
            + report.defeats_withdrew,
        200
    );
    // A random policy never closes its input.
    assert_eq!(report.defeats_withdrew, 0);
    assert_eq!(report.round_distribution.values().sum::<u32>(), 200);

    for run in &report.run_stats {
        assert!(run.rounds >= 1 && run.rounds <= 20);
        match run.outcome {
            CombatOutcome::Victory => assert_eq!(run.adversary_hp_left, 0),
            CombatOutcome::Defeat(DefeatReason::PartyFell) => assert_eq!(run.party_hp_left, 0),
            CombatOutcome::Defeat(DefeatReason::RoundCap) => assert_eq!(run.rounds, 20),
            CombatOutcome::Defeat(DefeatReason::Withdrew) => {}
        }
    }
}

#[test]
fn same_seed_gives_same_report() {
    let a = run_simulation(&seeded(50, 1234));
    let b = run_simulation(&seeded(50, 1234));

    assert_eq!(a.run_stats, b.run_stats);
    assert_eq!(a.to_json(), b.to_json());
}

#[test]
fn rebuilt_report_matches_simulation() {
    let report = run_simulation(&seeded(30, 99));
    let rebuilt = SimReport::from_runs(report.run_stats.clone());

    assert_eq!(rebuilt.victories, report.victories);
    assert_eq!(rebuilt.round_distribution, report.round_distribution);
    assert_eq!(rebuilt.to_text(), report.to_text());
}

#[test]
fn overwhelming_party_always_wins() {
    let json = r#"{
        "party": {
            "name": "Champion",
            "max_hp": 500,
            "max_mp": 100,
            "strength": 80,
            "intelligence": 40
        }
    }"#;
    let encounter = EncounterConfig::from_json(json).unwrap();
    let config = SimConfig {
        encounter,
        ..seeded(25, 3)
    };

    let report = run_simulation(&config);
    assert_eq!(report.victories, 25);
    assert!((report.win_rate - 1.0).abs() < 1e-9);
}

#[test]
fn single_run_with_short_cap_never_exceeds_it() {
    let encounter = EncounterConfig::from_json(r#"{"round_cap": 2}"#).unwrap();

    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stats = simulate_single_run(&encounter, &mut rng);
        assert!(stats.rounds <= 2);
        assert!(!stats.outcome.is_victory());
    }
}

#[test]
fn damage_totals_saturate_with_huge_stats() {
    let json = r#"{
        "party": {
            "name": "Giant",
            "max_hp": 40,
            "max_mp": 20,
            "strength": 4294967295,
            "intelligence": 4294967295
        }
    }"#;
    let encounter = EncounterConfig::from_json(json).unwrap();

    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stats = simulate_single_run(&encounter, &mut rng);
        assert!(stats.outcome.is_victory());
        assert_eq!(stats.damage_dealt, u32::MAX);
    }
}
