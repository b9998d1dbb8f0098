//! Boss fight balance simulator CLI.
//!
//! Run Monte Carlo simulations of the boss fight with a random party policy.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 1000 fights
//!   cargo run --bin simulate -- -n 100 --seed 42   # 100 reproducible fights
//!   cargo run --bin simulate -- -c arena.json      # Custom combatants

use anyhow::Context;
use boss_arena::simulator::{run_simulation, SimConfig};
use boss_arena::EncounterConfig;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              BOSS ARENA BALANCE SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!(
        "  Party:          {} ({} HP, {} MP)",
        config.encounter.party.name, config.encounter.party.max_hp, config.encounter.party.max_mp
    );
    println!(
        "  Adversary:      {} ({} HP, {} MP)",
        config.encounter.adversary.name,
        config.encounter.adversary.max_hp,
        config.encounter.adversary.max_mp
    );
    println!("  Round Cap:      {}", config.encounter.round_cap);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json)
            .with_context(|| format!("failed to write JSON report to {}", filename))?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<SimConfig> {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if i + 1 < args.len() {
                    if let Ok(cap) = args[i + 1].parse::<u32>() {
                        config.encounter.round_cap = cap.max(1);
                    }
                    i += 1;
                }
            }
            "-c" | "--config" => {
                let path = args.get(i + 1).context("--config needs a path")?;
                config.encounter = EncounterConfig::load(Path::new(path))
                    .with_context(|| format!("loading encounter from {}", path))?;
                i += 1;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                let seed = config.seed.unwrap_or(42);
                config = SimConfig {
                    encounter: config.encounter,
                    ..SimConfig::quick(seed)
                };
            }
            _ => {}
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Boss Arena Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of fights to simulate (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -r, --rounds <R>    Round cap per fight (default: 20)");
    println!("    -c, --config <P>    Load combatants from a JSON encounter file");
    println!("    -v, --verbose       Print every fight");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (100 seeded fights)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                     # Default run");
    println!("    cargo run --bin simulate -- -n 100 -s 7      # 100 reproducible fights");
    println!("    cargo run --bin simulate -- --quick --json   # Quick check, save JSON");
}
