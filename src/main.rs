//! Boss Arena - interactive boss fight in the terminal.
//!
//! Usage:
//!   boss_arena [--config <path>]
//!
//! Exits 0 when the party wins and 1 otherwise.

use anyhow::Context;
use boss_arena::combat::events::{CombatEvent, EventSink, TracingSink};
use boss_arena::combat::party::Ability;
use boss_arena::combat::session::{ActionSelector, PlayerAction, SelectionError, TurnContext};
use boss_arena::{CombatSession, EncounterConfig};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Reads the party member's choice from a line-oriented input.
struct TerminalSelector<R> {
    input: R,
}

impl<R: BufRead> TerminalSelector<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String, SelectionError> {
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut raw = Vec::new();
        match self.input.read_until(b'\n', &mut raw) {
            Ok(0) | Err(_) => Err(SelectionError::InputClosed),
            Ok(_) => match String::from_utf8(raw) {
                Ok(line) => Ok(line.trim().to_string()),
                Err(err) => {
                    let lossy = String::from_utf8_lossy(err.as_bytes());
                    Err(SelectionError::UnknownAction(lossy.trim().to_string()))
                }
            },
        }
    }

    fn print_status(ctx: &TurnContext<'_>) {
        let party = ctx.party;
        let adversary = ctx.adversary;
        println!(
            "{}  HP {}/{}  MP {}/{}",
            party.name.as_str().bold(),
            party.hp(),
            party.max_hp,
            party.mp(),
            party.max_mp
        );
        println!(
            "{}  HP {}/{}  ({})",
            adversary.name.as_str().bold(),
            adversary.hp(),
            adversary.max_hp,
            ctx.phase.label()
        );
    }

    fn print_menu() {
        println!("  1) Attack");
        println!("  2) Power Strike ({} MP)", Ability::PowerStrike.mana_cost());
        println!("  3) Elemental Bolt ({} MP)", Ability::ElementalBolt.mana_cost());
        println!("  4) Heal ({} MP)", Ability::HealAlly.mana_cost());
        println!("  5) Use Item");
    }
}

impl<R: BufRead> ActionSelector for TerminalSelector<R> {
    fn select_action(&mut self, ctx: &TurnContext<'_>) -> Result<PlayerAction, SelectionError> {
        println!();
        Self::print_status(ctx);
        Self::print_menu();

        let choice = self.read_line("> ")?;
        if choice != "5" {
            return choice.parse();
        }

        let items = ctx.item_names();
        if items.is_empty() {
            return Err(SelectionError::EmptyInventory);
        }
        println!("Items: {}", items.join(", "));
        let name = self.read_line("Item name> ")?;
        Ok(PlayerAction::UseItem(name))
    }
}

/// Prints each event in colour and forwards it to the log.
struct TerminalSink {
    party_name: String,
    log: TracingSink,
}

impl EventSink for TerminalSink {
    fn emit(&mut self, event: CombatEvent) {
        let line = event.to_string();
        match &event {
            CombatEvent::RoundStarted { .. } => println!("\n{}", line.cyan().bold()),
            CombatEvent::Damaged { actor, .. } if *actor == self.party_name => {
                println!("{}", line.red())
            }
            CombatEvent::Damaged { .. } => println!("{}", line.yellow()),
            CombatEvent::Healed { .. } | CombatEvent::ManaRestored { .. } => {
                println!("{}", line.green())
            }
            CombatEvent::PhaseChanged { .. } => println!("{}", line.magenta().bold()),
            CombatEvent::SelectionRejected { .. } | CombatEvent::ManaShortfall { .. } => {
                println!("{}", line.dark_yellow())
            }
            CombatEvent::CombatEnded { outcome, .. } if outcome.is_victory() => {
                println!("\n{}", line.green().bold())
            }
            CombatEvent::CombatEnded { .. } => println!("\n{}", line.red().bold()),
            _ => println!("{}", line),
        }
        self.log.emit(event);
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<Option<PathBuf>> {
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                let path = args.get(i + 1).context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {:?}", other),
        }
        i += 1;
    }

    Ok(config_path)
}

fn print_help() {
    println!("Boss Arena - turn-based boss fight");
    println!();
    println!("USAGE:");
    println!("    boss_arena [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>   Load combatants and round cap from a JSON file");
    println!("    -h, --help            Show this help");
    println!();
    println!("Set RUST_LOG=combat=debug to log every event to stderr.");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let encounter = match parse_args(&args)? {
        Some(path) => EncounterConfig::load(&path)
            .with_context(|| format!("loading encounter from {}", path.display()))?,
        None => EncounterConfig::default(),
    };

    let party = encounter.build_party();
    let adversary = encounter.build_adversary();
    println!(
        "{} faces {}!",
        party.name().bold(),
        adversary.name().red().bold()
    );

    let mut sink = TerminalSink {
        party_name: party.name().to_string(),
        log: TracingSink,
    };
    let mut selector = TerminalSelector {
        input: io::stdin().lock(),
    };
    let mut session = CombatSession::new(party, adversary).with_round_cap(encounter.round_cap);
    let report = session.run(&mut selector, &mut sink);

    if report.outcome.is_victory() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
