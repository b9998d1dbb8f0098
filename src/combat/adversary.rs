//! The adversary and its two-phase strategy.
//!
//! The strategy is a plain enum: [`Phase::decide`] looks at the adversary's
//! state and returns an [`AdversaryAction`], which [`Adversary::act`] then
//! resolves against the target. Switching strategy is an assignment to the
//! `phase` field and only ever goes from `Phase1` to `Phase2`.

use super::actor::Actor;
use super::effect::Effect;
use super::events::{CombatEvent, DamageSource, EventSink};
use crate::core::config::CombatantProfile;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Phase1,
    Phase2,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Phase1 => "phase one",
            Phase::Phase2 => "phase two",
        }
    }

    /// Phase the health threshold calls for: `Phase2` at or below half of
    /// max hp (integer division).
    pub fn for_health(hp: u32, max_hp: u32) -> Phase {
        if hp <= max_hp / 2 {
            Phase::Phase2
        } else {
            Phase::Phase1
        }
    }

    /// Picks this turn's action. Skills are used whenever mana allows,
    /// otherwise the adversary falls back to melee.
    pub fn decide(self, adversary: &Actor) -> AdversaryAction {
        match self {
            Phase::Phase1 if adversary.mp() >= DARK_BOLT_COST => AdversaryAction::DarkBolt {
                cost: DARK_BOLT_COST,
                damage: adversary.intelligence.saturating_add(DARK_BOLT_FLAT_DAMAGE),
            },
            Phase::Phase2 if adversary.mp() >= SHADOW_WAVE_COST => AdversaryAction::ShadowWave {
                cost: SHADOW_WAVE_COST,
                damage: (adversary.intelligence / SHADOW_WAVE_INT_DIVISOR)
                    .saturating_add(SHADOW_WAVE_FLAT_DAMAGE),
            },
            _ => AdversaryAction::CrushingBlow {
                damage: adversary_melee_damage(adversary.strength),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdversaryAction {
    /// Phase one ranged skill.
    DarkBolt { cost: u32, damage: u32 },
    /// Phase two skill; frightens a target that survives it.
    ShadowWave { cost: u32, damage: u32 },
    /// Melee fallback when mana runs dry.
    CrushingBlow { damage: u32 },
}

impl AdversaryAction {
    pub fn source(&self) -> DamageSource {
        match self {
            AdversaryAction::DarkBolt { .. } => DamageSource::DarkBolt,
            AdversaryAction::ShadowWave { .. } => DamageSource::ShadowWave,
            AdversaryAction::CrushingBlow { .. } => DamageSource::CrushingBlow,
        }
    }
}

/// Melee damage; the adversary hits harder than the base attack.
pub fn adversary_melee_damage(strength: u32) -> u32 {
    strength.saturating_add(ADVERSARY_MELEE_BONUS)
}

#[derive(Debug, Clone)]
pub struct Adversary {
    pub actor: Actor,
    phase: Phase,
}

impl Adversary {
    pub fn new(name: impl Into<String>, max_hp: u32, max_mp: u32, strength: u32, intelligence: u32) -> Self {
        Self {
            actor: Actor::new(name, max_hp, max_mp, strength, intelligence),
            phase: Phase::Phase1,
        }
    }

    pub fn from_profile(profile: &CombatantProfile) -> Self {
        Self {
            actor: Actor::from_profile(profile),
            phase: Phase::Phase1,
        }
    }

    pub fn name(&self) -> &str {
        &self.actor.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Switches to `Phase2` once hp drops to half. Returns true on the turn
    /// the switch happens.
    pub fn update_phase(&mut self, sink: &mut dyn EventSink) -> bool {
        if self.phase == Phase::Phase2 {
            return false;
        }
        if Phase::for_health(self.actor.hp(), self.actor.max_hp) == Phase::Phase2 {
            self.phase = Phase::Phase2;
            tracing::debug!(adversary = %self.actor.name, hp = self.actor.hp(), "phase switch");
            sink.emit(CombatEvent::PhaseChanged {
                actor: self.actor.name.clone(),
                phase: Phase::Phase2,
            });
            return true;
        }
        false
    }

    pub fn melee(&self, target: &mut Actor, sink: &mut dyn EventSink) -> u32 {
        let damage = adversary_melee_damage(self.actor.strength);
        let action = AdversaryAction::CrushingBlow { damage };
        self.announce(&action, target, sink);
        target.take_damage(damage, action.source(), sink)
    }

    /// Runs the active strategy against `target`.
    pub fn act(&mut self, target: &mut Actor, sink: &mut dyn EventSink) -> AdversaryAction {
        let action = self.phase.decide(&self.actor);
        tracing::debug!(adversary = %self.actor.name, phase = ?self.phase, ?action, "adversary decision");

        match action {
            AdversaryAction::DarkBolt { cost, damage } => {
                if self.actor.spend_mana(cost, sink) {
                    self.announce(&action, target, sink);
                    target.take_damage(damage, action.source(), sink);
                }
            }
            AdversaryAction::ShadowWave { cost, damage } => {
                if self.actor.spend_mana(cost, sink) {
                    self.announce(&action, target, sink);
                    target.take_damage(damage, action.source(), sink);
                    if target.is_alive() {
                        target.add_effect(Effect::fear(), sink);
                    }
                }
            }
            AdversaryAction::CrushingBlow { .. } => {
                self.melee(target, sink);
            }
        }
        action
    }

    /// Full adversary turn: phase check, own effect tick, then the strategy.
    /// An adversary felled by its own effects does not act.
    pub fn take_turn(&mut self, target: &mut Actor, sink: &mut dyn EventSink) -> Option<AdversaryAction> {
        self.update_phase(sink);
        self.actor.start_turn(sink);
        if !self.actor.is_alive() {
            return None;
        }
        Some(self.act(target, sink))
    }

    fn announce(&self, action: &AdversaryAction, target: &Actor, sink: &mut dyn EventSink) {
        sink.emit(CombatEvent::ActionUsed {
            actor: self.actor.name.clone(),
            action: action.source().label(),
            target: target.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warden() -> Adversary {
        Adversary::new("Warden", 70, 25, 6, 6)
    }

    fn hero_actor() -> Actor {
        Actor::new("Hero", 40, 20, 6, 5)
    }

    #[test]
    fn test_phase_threshold_uses_integer_division() {
        assert_eq!(Phase::for_health(36, 70), Phase::Phase1);
        assert_eq!(Phase::for_health(35, 70), Phase::Phase2);
        assert_eq!(Phase::for_health(35, 71), Phase::Phase2);
        assert_eq!(Phase::for_health(36, 71), Phase::Phase1);
    }

    #[test]
    fn test_phase1_uses_dark_bolt_when_mana_allows() {
        let adversary = warden();
        assert_eq!(
            Phase::Phase1.decide(&adversary.actor),
            AdversaryAction::DarkBolt { cost: 6, damage: 9 }
        );
    }

    #[test]
    fn test_phase2_uses_shadow_wave_when_mana_allows() {
        let adversary = warden();
        assert_eq!(
            Phase::Phase2.decide(&adversary.actor),
            AdversaryAction::ShadowWave { cost: 8, damage: 6 }
        );
    }

    #[test]
    fn test_falls_back_to_melee_without_mana() {
        let mut adversary = warden();
        adversary.actor.set_mp(5);
        assert_eq!(
            Phase::Phase1.decide(&adversary.actor),
            AdversaryAction::CrushingBlow { damage: 9 }
        );
        adversary.actor.set_mp(7);
        assert_eq!(
            Phase::Phase2.decide(&adversary.actor),
            AdversaryAction::CrushingBlow { damage: 9 }
        );
    }

    #[test]
    fn test_dark_bolt_spends_mana_and_hits() {
        let mut adversary = warden();
        let mut hero = hero_actor();
        let mut events: Vec<CombatEvent> = Vec::new();

        adversary.act(&mut hero, &mut events);
        assert_eq!(adversary.actor.mp(), 19);
        assert_eq!(hero.hp(), 31);
    }

    #[test]
    fn test_shadow_wave_frightens_survivor() {
        let mut adversary = warden();
        let mut hero = hero_actor();
        let mut events: Vec<CombatEvent> = Vec::new();
        adversary.actor.set_hp(30);

        adversary.take_turn(&mut hero, &mut events);
        assert_eq!(adversary.phase(), Phase::Phase2);
        assert_eq!(adversary.actor.mp(), 17);
        assert_eq!(hero.hp(), 34);
        assert!(hero.has_effect(FEAR_EFFECT_NAME));
    }

    #[test]
    fn test_shadow_wave_does_not_frighten_fallen_target() {
        let mut adversary = warden();
        let mut hero = hero_actor();
        let mut events: Vec<CombatEvent> = Vec::new();
        adversary.actor.set_hp(30);
        hero.set_hp(4);

        adversary.take_turn(&mut hero, &mut events);
        assert!(!hero.is_alive());
        assert!(hero.effects().is_empty());
    }

    #[test]
    fn test_phase_switch_is_one_way() {
        let mut adversary = warden();
        let mut events: Vec<CombatEvent> = Vec::new();
        adversary.actor.set_hp(35);
        assert!(adversary.update_phase(&mut events));
        adversary.actor.set_hp(70);
        assert!(!adversary.update_phase(&mut events));
        assert_eq!(adversary.phase(), Phase::Phase2);

        let switches = events
            .iter()
            .filter(|e| matches!(e, CombatEvent::PhaseChanged { .. }))
            .count();
        assert_eq!(switches, 1);
    }

    #[test]
    fn test_adversary_felled_by_burn_does_not_act() {
        let mut adversary = warden();
        let mut hero = hero_actor();
        let mut events: Vec<CombatEvent> = Vec::new();
        adversary.actor.set_hp(2);
        adversary.actor.add_effect(Effect::burning(), &mut events);

        assert_eq!(adversary.take_turn(&mut hero, &mut events), None);
        assert!(!adversary.actor.is_alive());
        assert_eq!(hero.hp(), 40);
    }

    #[test]
    fn test_melee_fallback_damage() {
        let mut adversary = warden();
        let mut hero = hero_actor();
        let mut events: Vec<CombatEvent> = Vec::new();
        adversary.actor.set_mp(0);

        let action = adversary.act(&mut hero, &mut events);
        assert_eq!(action, AdversaryAction::CrushingBlow { damage: 9 });
        assert_eq!(hero.hp(), 31);
    }

    #[test]
    fn test_skill_and_melee_damage_saturate_on_huge_stats() {
        let giant = Adversary::new("Titan", 70, 25, u32::MAX, u32::MAX);
        assert_eq!(
            Phase::Phase1.decide(&giant.actor),
            AdversaryAction::DarkBolt { cost: 6, damage: u32::MAX }
        );
        assert_eq!(
            Phase::Phase2.decide(&giant.actor),
            AdversaryAction::ShadowWave { cost: 8, damage: u32::MAX / 2 + 3 }
        );
        assert_eq!(adversary_melee_damage(u32::MAX), u32::MAX);

        let mut hero = hero_actor();
        let mut events: Vec<CombatEvent> = Vec::new();
        assert_eq!(giant.melee(&mut hero, &mut events), u32::MAX);
        assert_eq!(hero.hp(), 0);
    }
}
