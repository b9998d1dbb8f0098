//! Shared combatant state: pools, attributes, effects and inventory.
//!
//! Party members and adversaries both wrap an [`Actor`]; the behavior that
//! differs between them (attack formula, ability set, strategy) lives in
//! their own modules.

use super::effect::Effect;
use super::events::{CombatEvent, DamageSource, EventSink};
use super::inventory::Inventory;
use crate::core::config::CombatantProfile;

#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub max_hp: u32,
    pub max_mp: u32,
    hp: u32,
    mp: u32,
    pub strength: u32,
    pub intelligence: u32,
    effects: Vec<Effect>,
    pub inventory: Inventory,
}

impl Actor {
    pub fn new(name: impl Into<String>, max_hp: u32, max_mp: u32, strength: u32, intelligence: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            max_mp,
            hp: max_hp,
            mp: max_mp,
            strength,
            intelligence,
            effects: Vec::new(),
            inventory: Inventory::new(),
        }
    }

    pub fn from_profile(profile: &CombatantProfile) -> Self {
        Self::new(
            profile.name.clone(),
            profile.max_hp,
            profile.max_mp,
            profile.strength,
            profile.intelligence,
        )
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn mp(&self) -> u32 {
        self.mp
    }

    /// Sets hp, clamped to `0..=max_hp`.
    pub fn set_hp(&mut self, value: u32) {
        self.hp = value.min(self.max_hp);
    }

    /// Sets mp, clamped to `0..=max_mp`.
    pub fn set_mp(&mut self, value: u32) {
        self.mp = value.min(self.max_mp);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn has_effect(&self, name: &str) -> bool {
        self.effects.iter().any(|e| e.name == name)
    }

    /// Runs `amount` through every active effect's incoming transform in list
    /// order, subtracts the result from hp and returns it.
    pub fn take_damage(&mut self, amount: u32, source: DamageSource, sink: &mut dyn EventSink) -> u32 {
        let modified = self
            .effects
            .iter()
            .fold(amount, |acc, effect| effect.modify_incoming(acc));
        self.hp = self.hp.saturating_sub(modified);
        sink.emit(CombatEvent::Damaged {
            actor: self.name.clone(),
            amount: modified,
            source,
            hp_after: self.hp,
            max_hp: self.max_hp,
        });
        modified
    }

    /// Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32, sink: &mut dyn EventSink) -> u32 {
        let old = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        let healed = self.hp - old;
        sink.emit(CombatEvent::Healed {
            actor: self.name.clone(),
            amount: healed,
            hp_after: self.hp,
            max_hp: self.max_hp,
        });
        healed
    }

    /// Returns the mp actually restored.
    pub fn restore_mana(&mut self, amount: u32, sink: &mut dyn EventSink) -> u32 {
        let old = self.mp;
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
        let restored = self.mp - old;
        sink.emit(CombatEvent::ManaRestored {
            actor: self.name.clone(),
            amount: restored,
            mp_after: self.mp,
            max_mp: self.max_mp,
        });
        restored
    }

    /// Deducts `cost` if affordable. On failure mp is untouched and a
    /// shortfall event is emitted.
    pub fn spend_mana(&mut self, cost: u32, sink: &mut dyn EventSink) -> bool {
        if self.mp >= cost {
            self.mp -= cost;
            return true;
        }
        sink.emit(CombatEvent::ManaShortfall {
            actor: self.name.clone(),
            needed: cost,
            available: self.mp,
        });
        false
    }

    /// Appends `effect`. Same-named effects stack as independent instances.
    pub fn add_effect(&mut self, effect: Effect, sink: &mut dyn EventSink) {
        sink.emit(CombatEvent::EffectApplied {
            actor: self.name.clone(),
            effect: effect.name.clone(),
            duration: effect.remaining_duration,
        });
        self.effects.push(effect);
    }

    /// Ticks every effect present when the turn starts, in list order, then
    /// drops the expired ones.
    pub fn start_turn(&mut self, sink: &mut dyn EventSink) {
        let snapshot_len = self.effects.len();
        for index in 0..snapshot_len {
            let due = self.effects[index].tick();
            if due > 0 {
                self.take_damage(due, DamageSource::DamageOverTime, sink);
            }
        }

        for expired in self.clean_effects() {
            sink.emit(CombatEvent::EffectExpired {
                actor: self.name.clone(),
                effect: expired.name,
            });
        }
    }

    /// Keeps non-expired effects in their original order and returns the
    /// removed ones.
    pub fn clean_effects(&mut self) -> Vec<Effect> {
        let (expired, active): (Vec<Effect>, Vec<Effect>) = std::mem::take(&mut self.effects)
            .into_iter()
            .partition(Effect::is_expired);
        self.effects = active;
        expired
    }

    /// Base attack shared by every combatant: `max(1, strength)` damage.
    pub fn attack(&self, target: &mut Actor, sink: &mut dyn EventSink) -> u32 {
        sink.emit(CombatEvent::ActionUsed {
            actor: self.name.clone(),
            action: DamageSource::BasicAttack.label(),
            target: target.name.clone(),
        });
        target.take_damage(basic_attack_damage(self.strength), DamageSource::BasicAttack, sink)
    }
}

pub fn basic_attack_damage(strength: u32) -> u32 {
    strength.max(1)
}
