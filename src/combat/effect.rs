//! Timed status effects.

use crate::core::constants::*;

/// Transform applied to damage on its way into an afflicted actor.
pub type IncomingTransform = fn(u32) -> u32;

/// A status effect owned by the actor it afflicts.
///
/// Effects tick once at the start of each of their owner's turns: any
/// damage-per-tick is dealt, then the remaining duration counts down. An
/// effect is removed once both its duration and its damage-per-tick are
/// exhausted. Running out of duration exhausts the damage-per-tick as well,
/// so a burn of duration 2 deals damage on exactly two ticks.
#[derive(Debug, Clone)]
pub struct Effect {
    pub name: String,
    pub remaining_duration: i32,
    pub damage_per_tick: u32,
    incoming: Option<IncomingTransform>,
}

impl Effect {
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            remaining_duration: duration,
            damage_per_tick: 0,
            incoming: None,
        }
    }

    pub fn with_damage_per_tick(mut self, damage_per_tick: u32) -> Self {
        self.damage_per_tick = damage_per_tick;
        self
    }

    /// Attaches an incoming-damage transform. None of the stock effects
    /// carry one.
    pub fn with_incoming_transform(mut self, transform: IncomingTransform) -> Self {
        self.incoming = Some(transform);
        self
    }

    /// Inflicted by the elemental bolt.
    pub fn burning() -> Self {
        Self::new(BURNING_EFFECT_NAME, BURNING_DURATION).with_damage_per_tick(BURNING_DAMAGE_PER_TICK)
    }

    /// Inflicted by the adversary's shadow wave.
    pub fn fear() -> Self {
        Self::new(FEAR_EFFECT_NAME, FEAR_DURATION)
    }

    /// Advances the effect by one owner turn and returns the damage due on
    /// this tick (0 when the effect deals none).
    pub fn tick(&mut self) -> u32 {
        let due = self.damage_per_tick;
        self.remaining_duration -= 1;
        if self.remaining_duration <= 0 {
            self.damage_per_tick = 0;
        }
        due
    }

    pub fn modify_incoming(&self, amount: u32) -> u32 {
        match self.incoming {
            Some(transform) => transform(amount),
            None => amount,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_duration <= 0 && self.damage_per_tick == 0
    }
}
