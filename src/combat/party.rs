//! The controllable party member and its mana-gated abilities.

use super::actor::Actor;
use super::effect::Effect;
use super::events::{CombatEvent, DamageSource, EventSink};
use super::inventory::{Inventory, Item};
use super::session::SelectionError;
use crate::core::config::CombatantProfile;
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    PowerStrike,
    ElementalBolt,
    HealAlly,
}

impl Ability {
    pub fn all() -> [Ability; 3] {
        [Ability::PowerStrike, Ability::ElementalBolt, Ability::HealAlly]
    }

    pub fn mana_cost(self) -> u32 {
        match self {
            Ability::PowerStrike => POWER_STRIKE_COST,
            Ability::ElementalBolt => ELEMENTAL_BOLT_COST,
            Ability::HealAlly => HEAL_ALLY_COST,
        }
    }

    /// Whether `actor` currently has the mana for this ability.
    pub fn affordable_by(self, actor: &Actor) -> bool {
        actor.mp() >= self.mana_cost()
    }

    pub fn label(self) -> &'static str {
        match self {
            Ability::PowerStrike => "power strike",
            Ability::ElementalBolt => "elemental bolt",
            Ability::HealAlly => "heal ally",
        }
    }
}

pub fn power_strike_damage(strength: u32) -> u32 {
    strength.saturating_mul(POWER_STRIKE_STRENGTH_MULTIPLIER)
}

pub fn elemental_bolt_damage(intelligence: u32) -> u32 {
    intelligence
        .saturating_mul(ELEMENTAL_BOLT_INT_MULTIPLIER)
        .saturating_add(ELEMENTAL_BOLT_FLAT_DAMAGE)
}

pub fn heal_ally_amount(intelligence: u32) -> u32 {
    intelligence
        .saturating_mul(HEAL_ALLY_INT_MULTIPLIER)
        .saturating_add(HEAL_ALLY_FLAT_HEAL)
}

/// A party member. Abilities are no-ops when mana is short; the cost is
/// only deducted when the ability goes off.
#[derive(Debug, Clone)]
pub struct PartyMember {
    pub actor: Actor,
}

impl PartyMember {
    /// Builds a member carrying the starter consumables.
    pub fn new(name: impl Into<String>, max_hp: u32, max_mp: u32, strength: u32, intelligence: u32) -> Self {
        let mut actor = Actor::new(name, max_hp, max_mp, strength, intelligence);
        actor.inventory = Inventory::starter();
        Self { actor }
    }

    pub fn from_profile(profile: &CombatantProfile) -> Self {
        let mut actor = Actor::from_profile(profile);
        actor.inventory = Inventory::starter();
        Self { actor }
    }

    pub fn name(&self) -> &str {
        &self.actor.name
    }

    pub fn basic_attack(&self, target: &mut Actor, sink: &mut dyn EventSink) -> u32 {
        self.actor.attack(target, sink)
    }

    pub fn power_strike(&mut self, target: &mut Actor, sink: &mut dyn EventSink) -> bool {
        if !self.begin_ability(Ability::PowerStrike, &target.name, sink) {
            return false;
        }
        target.take_damage(
            power_strike_damage(self.actor.strength),
            DamageSource::PowerStrike,
            sink,
        );
        true
    }

    /// Direct damage plus a burn on the target.
    pub fn elemental_bolt(&mut self, target: &mut Actor, sink: &mut dyn EventSink) -> bool {
        if !self.begin_ability(Ability::ElementalBolt, &target.name, sink) {
            return false;
        }
        target.take_damage(
            elemental_bolt_damage(self.actor.intelligence),
            DamageSource::ElementalBolt,
            sink,
        );
        target.add_effect(Effect::burning(), sink);
        true
    }

    pub fn heal_self(&mut self, sink: &mut dyn EventSink) -> bool {
        let own_name = self.actor.name.clone();
        if !self.begin_ability(Ability::HealAlly, &own_name, sink) {
            return false;
        }
        let amount = heal_ally_amount(self.actor.intelligence);
        self.actor.heal(amount, sink);
        true
    }

    pub fn heal_ally(&mut self, ally: &mut Actor, sink: &mut dyn EventSink) -> bool {
        if !self.begin_ability(Ability::HealAlly, &ally.name, sink) {
            return false;
        }
        ally.heal(heal_ally_amount(self.actor.intelligence), sink);
        true
    }

    /// Consumes the named item on the member itself.
    pub fn use_item(&mut self, name: &str, sink: &mut dyn EventSink) -> Result<(), SelectionError> {
        let item = self.take_item(name)?;
        sink.emit(CombatEvent::ItemUsed {
            actor: self.actor.name.clone(),
            item: item.name.clone(),
        });
        item.apply(&mut self.actor, sink);
        Ok(())
    }

    /// Consumes the named item on another actor.
    pub fn use_item_on(
        &mut self,
        name: &str,
        target: &mut Actor,
        sink: &mut dyn EventSink,
    ) -> Result<(), SelectionError> {
        let item = self.take_item(name)?;
        sink.emit(CombatEvent::ItemUsed {
            actor: self.actor.name.clone(),
            item: item.name.clone(),
        });
        item.apply(target, sink);
        Ok(())
    }

    fn take_item(&mut self, name: &str) -> Result<Item, SelectionError> {
        if self.actor.inventory.is_empty() {
            return Err(SelectionError::EmptyInventory);
        }
        self.actor
            .inventory
            .take(name)
            .ok_or_else(|| SelectionError::ItemNotFound(name.to_string()))
    }

    fn begin_ability(&mut self, ability: Ability, target: &str, sink: &mut dyn EventSink) -> bool {
        if !self.actor.spend_mana(ability.mana_cost(), sink) {
            return false;
        }
        sink.emit(CombatEvent::ActionUsed {
            actor: self.actor.name.clone(),
            action: ability.label(),
            target: target.to_string(),
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> PartyMember {
        PartyMember::new("Hero", 40, 20, 6, 5)
    }

    fn dummy() -> Actor {
        Actor::new("Dummy", 70, 25, 6, 6)
    }

    #[test]
    fn test_power_strike_deals_double_strength() {
        let mut member = hero();
        let mut target = dummy();
        let mut events: Vec<CombatEvent> = Vec::new();

        assert!(member.power_strike(&mut target, &mut events));
        assert_eq!(target.hp(), 58);
        assert_eq!(member.actor.mp(), 15);
    }

    #[test]
    fn test_power_strike_without_mana_is_noop() {
        let mut member = hero();
        let mut target = dummy();
        let mut events: Vec<CombatEvent> = Vec::new();
        member.actor.set_mp(4);

        assert!(!member.power_strike(&mut target, &mut events));
        assert_eq!(target.hp(), 70);
        assert_eq!(member.actor.mp(), 4);
        assert!(matches!(events[0], CombatEvent::ManaShortfall { needed: 5, .. }));
    }

    #[test]
    fn test_elemental_bolt_damage_and_burn() {
        let mut member = hero();
        let mut target = dummy();
        let mut events: Vec<CombatEvent> = Vec::new();

        assert!(member.elemental_bolt(&mut target, &mut events));
        assert_eq!(target.hp(), 58);
        assert_eq!(member.actor.mp(), 13);
        assert_eq!(target.effects().len(), 1);
        let burn = &target.effects()[0];
        assert_eq!(burn.name, BURNING_EFFECT_NAME);
        assert_eq!(burn.remaining_duration, 2);
        assert_eq!(burn.damage_per_tick, 2);
    }

    #[test]
    fn test_heal_self_uses_intelligence() {
        let mut member = hero();
        let mut events: Vec<CombatEvent> = Vec::new();
        member.actor.set_hp(10);

        assert!(member.heal_self(&mut events));
        assert_eq!(member.actor.hp(), 24);
        assert_eq!(member.actor.mp(), 14);
    }

    #[test]
    fn test_heal_ally_targets_other_actor() {
        let mut member = hero();
        let mut ally = Actor::new("Ally", 30, 0, 3, 3);
        let mut events: Vec<CombatEvent> = Vec::new();
        ally.set_hp(1);

        assert!(member.heal_ally(&mut ally, &mut events));
        assert_eq!(ally.hp(), 15);
        assert_eq!(member.actor.hp(), 40);
    }

    #[test]
    fn test_use_item_applies_once_and_removes() {
        let mut member = hero();
        let mut events: Vec<CombatEvent> = Vec::new();
        member.actor.set_hp(20);

        assert_eq!(member.use_item(POTION_NAME, &mut events), Ok(()));
        assert_eq!(member.actor.hp(), 32);
        assert_eq!(member.actor.inventory.names(), vec![ETHER_NAME]);
    }

    #[test]
    fn test_use_ether_restores_mana() {
        let mut member = hero();
        let mut events: Vec<CombatEvent> = Vec::new();
        member.actor.set_mp(3);

        assert_eq!(member.use_item(ETHER_NAME, &mut events), Ok(()));
        assert_eq!(member.actor.mp(), 11);
    }

    #[test]
    fn test_use_missing_item_reports_not_found() {
        let mut member = hero();
        let mut events: Vec<CombatEvent> = Vec::new();

        let result = member.use_item("Elixir", &mut events);
        assert_eq!(result, Err(SelectionError::ItemNotFound("Elixir".to_string())));
        assert_eq!(member.actor.inventory.len(), 2);
        assert!(events.is_empty());
    }

    #[test]
    fn test_use_item_on_empty_inventory() {
        let mut member = hero();
        let mut events: Vec<CombatEvent> = Vec::new();
        member.actor.inventory = Inventory::new();

        assert_eq!(
            member.use_item(POTION_NAME, &mut events),
            Err(SelectionError::EmptyInventory)
        );
    }

    #[test]
    fn test_use_item_on_other_actor() {
        let mut member = hero();
        let mut ally = Actor::new("Ally", 30, 0, 3, 3);
        let mut events: Vec<CombatEvent> = Vec::new();
        ally.set_hp(10);

        assert_eq!(member.use_item_on(POTION_NAME, &mut ally, &mut events), Ok(()));
        assert_eq!(ally.hp(), 22);
        assert_eq!(member.actor.hp(), 40);
        assert!(!member.actor.inventory.contains(POTION_NAME));
    }

    #[test]
    fn test_formulas_saturate_on_huge_stats() {
        assert_eq!(power_strike_damage(u32::MAX), u32::MAX);
        assert_eq!(elemental_bolt_damage(u32::MAX), u32::MAX);
        assert_eq!(heal_ally_amount(u32::MAX), u32::MAX);

        let mut member = PartyMember::new("Giant", 40, 20, u32::MAX, u32::MAX);
        let mut target = dummy();
        let mut events: Vec<CombatEvent> = Vec::new();
        assert!(member.power_strike(&mut target, &mut events));
        assert_eq!(target.hp(), 0);

        member.actor.set_hp(1);
        assert!(member.heal_self(&mut events));
        assert_eq!(member.actor.hp(), 40);
    }

    #[test]
    fn test_affordable_by_tracks_costs() {
        let mut member = hero();
        member.actor.set_mp(6);
        assert!(Ability::PowerStrike.affordable_by(&member.actor));
        assert!(Ability::HealAlly.affordable_by(&member.actor));
        assert!(!Ability::ElementalBolt.affordable_by(&member.actor));
    }
}
