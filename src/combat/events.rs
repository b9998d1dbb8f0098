//! Structured combat events and the sinks that observe them.
//!
//! The engine never prints. Every state change worth showing (damage, heals,
//! mana shortfalls, effects, phase switches, rejected selections) is pushed
//! into an [`EventSink`] as a [`CombatEvent`], and each event renders a
//! human-readable line through `Display`.

use super::adversary::Phase;
use super::session::{CombatOutcome, SelectionError};
use crate::core::constants::COMBAT_LOG_CAPACITY;
use std::collections::VecDeque;
use std::fmt;

/// What caused a chunk of damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    BasicAttack,
    PowerStrike,
    ElementalBolt,
    DamageOverTime,
    DarkBolt,
    ShadowWave,
    CrushingBlow,
}

impl DamageSource {
    pub fn label(&self) -> &'static str {
        match self {
            DamageSource::BasicAttack => "basic attack",
            DamageSource::PowerStrike => "power strike",
            DamageSource::ElementalBolt => "elemental bolt",
            DamageSource::DamageOverTime => "damage over time",
            DamageSource::DarkBolt => "dark bolt",
            DamageSource::ShadowWave => "shadow wave",
            DamageSource::CrushingBlow => "crushing blow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    /// An actor committed to an action (ability, skill or attack).
    ActionUsed {
        actor: String,
        action: &'static str,
        target: String,
    },
    Damaged {
        actor: String,
        amount: u32,
        source: DamageSource,
        hp_after: u32,
        max_hp: u32,
    },
    /// `amount` is the post-clamp delta, not the requested heal.
    Healed {
        actor: String,
        amount: u32,
        hp_after: u32,
        max_hp: u32,
    },
    ManaRestored {
        actor: String,
        amount: u32,
        mp_after: u32,
        max_mp: u32,
    },
    ManaShortfall {
        actor: String,
        needed: u32,
        available: u32,
    },
    EffectApplied {
        actor: String,
        effect: String,
        duration: i32,
    },
    EffectExpired {
        actor: String,
        effect: String,
    },
    PhaseChanged {
        actor: String,
        phase: Phase,
    },
    ItemUsed {
        actor: String,
        item: String,
    },
    /// A selection that did not consume the turn.
    SelectionRejected {
        reason: SelectionError,
    },
    CombatEnded {
        outcome: CombatOutcome,
        rounds: u32,
    },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::RoundStarted { round } => write!(f, "--- Round {} ---", round),
            CombatEvent::ActionUsed {
                actor,
                action,
                target,
            } => write!(f, "{} uses {} on {}.", actor, action, target),
            CombatEvent::Damaged {
                actor,
                amount,
                source,
                hp_after,
                max_hp,
            } => write!(
                f,
                "{} takes {} damage ({}). HP: {}/{}",
                actor,
                amount,
                source.label(),
                hp_after,
                max_hp
            ),
            CombatEvent::Healed {
                actor,
                amount,
                hp_after,
                max_hp,
            } => write!(
                f,
                "{} is healed for {}. HP: {}/{}",
                actor, amount, hp_after, max_hp
            ),
            CombatEvent::ManaRestored {
                actor,
                amount,
                mp_after,
                max_mp,
            } => write!(
                f,
                "{} restores {} mana. MP: {}/{}",
                actor, amount, mp_after, max_mp
            ),
            CombatEvent::ManaShortfall {
                actor,
                needed,
                available,
            } => write!(
                f,
                "{} does not have enough MP ({} needed, {} available)!",
                actor, needed, available
            ),
            CombatEvent::EffectApplied {
                actor,
                effect,
                duration,
            } => write!(f, "{} is afflicted by {} for {} turns.", actor, effect, duration),
            CombatEvent::EffectExpired { actor, effect } => {
                write!(f, "{} fades from {}.", effect, actor)
            }
            CombatEvent::PhaseChanged { actor, phase } => {
                write!(f, "{} enters {}!", actor, phase.label())
            }
            CombatEvent::ItemUsed { actor, item } => write!(f, "{} uses {}.", actor, item),
            CombatEvent::SelectionRejected { reason } => write!(f, "Invalid choice: {}.", reason),
            CombatEvent::CombatEnded { outcome, rounds } => {
                write!(f, "{} after {} rounds.", outcome.label(), rounds)
            }
        }
    }
}

/// Receives every event the engine emits.
pub trait EventSink {
    fn emit(&mut self, event: CombatEvent);
}

impl EventSink for Vec<CombatEvent> {
    fn emit(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

/// Forwards events to `tracing`. Round, phase and outcome changes log at
/// info, everything else at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: CombatEvent) {
        match &event {
            CombatEvent::RoundStarted { .. }
            | CombatEvent::PhaseChanged { .. }
            | CombatEvent::CombatEnded { .. } => tracing::info!(target: "combat", "{}", event),
            _ => tracing::debug!(target: "combat", "{}", event),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatLogEntry {
    pub round: u32,
    pub message: String,
}

/// Bounded log of rendered events, oldest entries dropped first.
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<CombatLogEntry>,
    capacity: usize,
    current_round: u32,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::with_capacity(COMBAT_LOG_CAPACITY)
    }
}

impl CombatLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            current_round: 0,
        }
    }

    pub fn add_log_entry(&mut self, message: String) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(CombatLogEntry {
            round: self.current_round,
            message,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EventSink for CombatLog {
    fn emit(&mut self, event: CombatEvent) {
        if let CombatEvent::RoundStarted { round } = event {
            self.current_round = round;
        }
        self.add_log_entry(event.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damaged(amount: u32) -> CombatEvent {
        CombatEvent::Damaged {
            actor: "Wanderer".to_string(),
            amount,
            source: DamageSource::BasicAttack,
            hp_after: 40 - amount,
            max_hp: 40,
        }
    }

    #[test]
    fn test_damage_event_renders_source_and_hp() {
        let text = damaged(6).to_string();
        assert_eq!(text, "Wanderer takes 6 damage (basic attack). HP: 34/40");
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<CombatEvent> = Vec::new();
        sink.emit(CombatEvent::RoundStarted { round: 1 });
        sink.emit(damaged(3));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0], CombatEvent::RoundStarted { round: 1 });
    }

    #[test]
    fn test_combat_log_drops_oldest_entries() {
        let mut log = CombatLog::with_capacity(3);
        for amount in 1..=5 {
            log.emit(damaged(amount));
        }
        assert_eq!(log.len(), 3);
        let first = log.entries().next().map(|e| e.message.clone());
        assert_eq!(
            first.as_deref(),
            Some("Wanderer takes 3 damage (basic attack). HP: 37/40")
        );
    }

    #[test]
    fn test_combat_log_tags_entries_with_round() {
        let mut log = CombatLog::default();
        log.emit(CombatEvent::RoundStarted { round: 4 });
        log.emit(damaged(2));
        assert!(log.entries().all(|e| e.round == 4));
    }
}
