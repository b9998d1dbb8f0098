//! Simulation report generation.

use crate::combat::session::{CombatOutcome, DefeatReason};
use serde::Serialize;
use std::collections::BTreeMap;

/// What one simulated fight looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub outcome: CombatOutcome,
    pub rounds: u32,
    pub party_hp_left: u32,
    pub adversary_hp_left: u32,
    pub reached_phase_two: bool,
    pub mana_shortfalls: u32,
    pub items_used: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats_party_fell: u32,
    pub defeats_round_cap: u32,
    pub defeats_withdrew: u32,

    // Aggregated stats
    pub win_rate: f64,
    pub avg_rounds: f64,
    pub avg_rounds_to_victory: f64,
    pub avg_adversary_hp_left: f64,
    pub avg_party_hp_left_on_victory: f64,
    pub phase_two_rate: f64,
    pub avg_mana_shortfalls: f64,
    pub avg_items_used: f64,

    // Rounds -> number of fights that ended on that round
    pub round_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average<'a>(runs: impl Iterator<Item = &'a RunStats>, field: impl Fn(&RunStats) -> u32) -> f64 {
    let mut total = 0.0;
    let mut count = 0u32;
    for run in runs {
        total += field(run) as f64;
        count += 1;
    }
    total / count.max(1) as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let count = |want: CombatOutcome| runs.iter().filter(|r| r.outcome == want).count() as u32;

        let victories = count(CombatOutcome::Victory);
        let defeats_party_fell = count(CombatOutcome::Defeat(DefeatReason::PartyFell));
        let defeats_round_cap = count(CombatOutcome::Defeat(DefeatReason::RoundCap));
        let defeats_withdrew = count(CombatOutcome::Defeat(DefeatReason::Withdrew));

        let win_rate = victories as f64 / num_runs.max(1) as f64;
        let avg_rounds = average(runs.iter(), |r| r.rounds);
        let avg_rounds_to_victory =
            average(runs.iter().filter(|r| r.outcome.is_victory()), |r| r.rounds);
        let avg_adversary_hp_left = average(runs.iter(), |r| r.adversary_hp_left);
        let avg_party_hp_left_on_victory =
            average(runs.iter().filter(|r| r.outcome.is_victory()), |r| r.party_hp_left);
        let phase_two_rate =
            runs.iter().filter(|r| r.reached_phase_two).count() as f64 / num_runs.max(1) as f64;
        let avg_mana_shortfalls = average(runs.iter(), |r| r.mana_shortfalls);
        let avg_items_used = average(runs.iter(), |r| r.items_used);

        let mut round_distribution = BTreeMap::new();
        for run in &runs {
            *round_distribution.entry(run.rounds).or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            defeats_party_fell,
            defeats_round_cap,
            defeats_withdrew,
            win_rate,
            avg_rounds,
            avg_rounds_to_victory,
            avg_adversary_hp_left,
            avg_party_hp_left_on_victory,
            phase_two_rate,
            avg_mana_shortfalls,
            avg_items_used,
            round_distribution,
            run_stats: runs,
        }
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    BOSS ARENA SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Fights simulated: {}\n", self.num_runs));
        report.push_str(&format!(
            "  Victories:        {} ({:.1}%)\n",
            self.victories,
            self.win_rate * 100.0
        ));
        report.push_str(&format!("  Party fell:       {}\n", self.defeats_party_fell));
        report.push_str(&format!("  Round cap hit:    {}\n", self.defeats_round_cap));
        if self.defeats_withdrew > 0 {
            report.push_str(&format!("  Withdrew:         {}\n", self.defeats_withdrew));
        }
        report.push('\n');

        report.push_str("── FIGHT LENGTH ─────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Rounds:             {:.1}\n", self.avg_rounds));
        report.push_str(&format!(
            "  Avg Rounds to Victory:  {:.1}\n",
            self.avg_rounds_to_victory
        ));
        report.push_str(&format!(
            "  Adversary HP Left:      {:.1}\n",
            self.avg_adversary_hp_left
        ));
        report.push_str(&format!(
            "  Party HP Left (wins):   {:.1}\n",
            self.avg_party_hp_left_on_victory
        ));
        report.push_str(&format!(
            "  Phase Two Reached:      {:.1}%\n",
            self.phase_two_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Mana Shortfalls:    {:.2}\n",
            self.avg_mana_shortfalls
        ));
        report.push_str(&format!("  Avg Items Used:         {:.2}\n\n", self.avg_items_used));

        report.push_str("── ROUND DISTRIBUTION ───────────────────────────────────────────\n");
        let max_count = self.round_distribution.values().copied().max().unwrap_or(1).max(1);
        for (rounds, count) in &self.round_distribution {
            let bar_len = (*count as usize * 40) / max_count as usize;
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            report.push_str(&format!(
                "  Round {:2}: {:5.1}% {}\n",
                rounds,
                pct,
                "█".repeat(bar_len)
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.9 {
            "TOO EASY - The adversary rarely wins"
        } else if self.win_rate > 0.5 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.2 {
            "HARD - Most fights are lost"
        } else {
            "TOO HARD - The party almost never wins"
        };
        report.push_str(&format!("  Difficulty: {}\n", rating));

        if self.num_runs > 0 && self.defeats_round_cap * 10 > self.num_runs {
            report.push_str("  ⚠️  Many fights stall at the round cap - damage too low?\n");
        }
        if self.num_runs > 0 && self.phase_two_rate < 0.5 {
            report.push_str("  ⚠️  Phase two rarely reached - adversary falls too fast?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
