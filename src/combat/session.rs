//! The round loop.
//!
//! A round is the party member's turn followed, if the fight is still on, by
//! the adversary's. The adversary's effects tick once before its turn and
//! once more at the start of `Adversary::take_turn`. The party member's action comes from an
//! [`ActionSelector`]; rejected selections are reported and re-prompted
//! without consuming the turn or re-ticking effects. The session ends when
//! either side drops to 0 hp or after the round cap.

use super::actor::Actor;
use super::adversary::{Adversary, Phase};
use super::events::{CombatEvent, EventSink};
use super::party::PartyMember;
use crate::core::constants::ROUND_CAP;
use serde::{Deserialize, Serialize};

/// One party-member action per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    BasicAttack,
    PowerStrike,
    ElementalBolt,
    HealAlly,
    UseItem(String),
}

/// Why a selection was turned down. None of these consume the turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    #[error("no item named {0:?} in inventory")]
    ItemNotFound(String),
    #[error("inventory is empty")]
    EmptyInventory,
    #[error("action input closed")]
    InputClosed,
}

/// Read-only view handed to the selector each time it is asked for an action.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub round: u32,
    pub party: &'a Actor,
    pub adversary: &'a Actor,
    pub phase: Phase,
}

impl TurnContext<'_> {
    pub fn item_names(&self) -> Vec<&str> {
        self.party.inventory.names()
    }
}

/// Source of party-member actions (terminal prompt, script, random policy).
pub trait ActionSelector {
    /// Returning [`SelectionError::InputClosed`] ends the session as a loss;
    /// any other error is reported and the selector is asked again.
    fn select_action(&mut self, ctx: &TurnContext<'_>) -> Result<PlayerAction, SelectionError>;
}

impl<F> ActionSelector for F
where
    F: FnMut(&TurnContext<'_>) -> Result<PlayerAction, SelectionError>,
{
    fn select_action(&mut self, ctx: &TurnContext<'_>) -> Result<PlayerAction, SelectionError> {
        self(ctx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatReason {
    PartyFell,
    RoundCap,
    Withdrew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat(DefeatReason),
}

impl CombatOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, CombatOutcome::Victory)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CombatOutcome::Victory => "Victory",
            CombatOutcome::Defeat(DefeatReason::PartyFell) => "Defeat",
            CombatOutcome::Defeat(DefeatReason::RoundCap) => "Defeat (round limit reached)",
            CombatOutcome::Defeat(DefeatReason::Withdrew) => "Defeat (withdrew from combat)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    /// Rounds started, including the one the fight ended in.
    pub rounds: u32,
}

/// Owns both combatants for the duration of a fight.
#[derive(Debug, Clone)]
pub struct CombatSession {
    party: PartyMember,
    adversary: Adversary,
    round_cap: u32,
}

impl CombatSession {
    pub fn new(party: PartyMember, adversary: Adversary) -> Self {
        Self {
            party,
            adversary,
            round_cap: ROUND_CAP,
        }
    }

    pub fn with_round_cap(mut self, round_cap: u32) -> Self {
        self.round_cap = round_cap;
        self
    }

    pub fn party(&self) -> &PartyMember {
        &self.party
    }

    pub fn adversary(&self) -> &Adversary {
        &self.adversary
    }

    pub fn round_cap(&self) -> u32 {
        self.round_cap
    }

    pub fn into_parts(self) -> (PartyMember, Adversary) {
        (self.party, self.adversary)
    }

    /// Runs the fight to completion.
    pub fn run(&mut self, selector: &mut dyn ActionSelector, sink: &mut dyn EventSink) -> CombatReport {
        tracing::info!(
            party = %self.party.name(),
            adversary = %self.adversary.name(),
            round_cap = self.round_cap,
            "combat started"
        );

        let mut rounds = 0;
        let outcome = loop {
            if !self.adversary.actor.is_alive() {
                break CombatOutcome::Victory;
            }
            if !self.party.actor.is_alive() {
                break CombatOutcome::Defeat(DefeatReason::PartyFell);
            }
            if rounds >= self.round_cap {
                break CombatOutcome::Defeat(DefeatReason::RoundCap);
            }

            rounds += 1;
            sink.emit(CombatEvent::RoundStarted { round: rounds });

            self.party.actor.start_turn(sink);
            if !self.party.actor.is_alive() {
                continue;
            }

            if self.party_turn(rounds, selector, sink).is_err() {
                break CombatOutcome::Defeat(DefeatReason::Withdrew);
            }
            if !self.adversary.actor.is_alive() {
                continue;
            }

            // Effects on the adversary tick here and again inside take_turn.
            self.adversary.actor.start_turn(sink);
            if !self.adversary.actor.is_alive() {
                continue;
            }
            self.adversary.take_turn(&mut self.party.actor, sink);
        };

        tracing::info!(?outcome, rounds, "combat finished");
        sink.emit(CombatEvent::CombatEnded { outcome, rounds });
        CombatReport { outcome, rounds }
    }

    /// Prompts until an action consumes the turn. Only a closed input
    /// escapes without acting.
    fn party_turn(
        &mut self,
        round: u32,
        selector: &mut dyn ActionSelector,
        sink: &mut dyn EventSink,
    ) -> Result<(), SelectionError> {
        loop {
            let ctx = TurnContext {
                round,
                party: &self.party.actor,
                adversary: &self.adversary.actor,
                phase: self.adversary.phase(),
            };
            let resolved = match selector.select_action(&ctx) {
                Ok(action) => self.resolve(action, sink),
                Err(SelectionError::InputClosed) => return Err(SelectionError::InputClosed),
                Err(reason) => Err(reason),
            };
            match resolved {
                Ok(()) => return Ok(()),
                Err(reason) => {
                    tracing::debug!(%reason, round, "selection rejected");
                    sink.emit(CombatEvent::SelectionRejected { reason });
                }
            }
        }
    }

    fn resolve(&mut self, action: PlayerAction, sink: &mut dyn EventSink) -> Result<(), SelectionError> {
        let target = &mut self.adversary.actor;
        match action {
            PlayerAction::BasicAttack => {
                self.party.basic_attack(target, sink);
            }
            PlayerAction::PowerStrike => {
                self.party.power_strike(target, sink);
            }
            PlayerAction::ElementalBolt => {
                self.party.elemental_bolt(target, sink);
            }
            PlayerAction::HealAlly => {
                self.party.heal_self(sink);
            }
            PlayerAction::UseItem(name) => self.party.use_item(&name, sink)?,
        }
        Ok(())
    }
}

/// Runs a fight between two freshly built combatants and reports whether the
/// party won.
pub fn run_combat(
    party: PartyMember,
    adversary: Adversary,
    selector: &mut dyn ActionSelector,
    sink: &mut dyn EventSink,
) -> bool {
    CombatSession::new(party, adversary)
        .run(selector, sink)
        .outcome
        .is_victory()
}
