//! Single-use consumables.

use super::actor::Actor;
use super::events::EventSink;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Behavior bound to an item when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    Heal(u32),
    RestoreMana(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub effect: ItemEffect,
}

impl Item {
    pub fn new(name: impl Into<String>, effect: ItemEffect) -> Self {
        Self {
            name: name.into(),
            effect,
        }
    }

    pub fn potion() -> Self {
        Self::new(POTION_NAME, ItemEffect::Heal(POTION_HEAL))
    }

    pub fn ether() -> Self {
        Self::new(ETHER_NAME, ItemEffect::RestoreMana(ETHER_MANA))
    }

    pub fn apply(&self, target: &mut Actor, sink: &mut dyn EventSink) {
        match self.effect {
            ItemEffect::Heal(amount) => {
                target.heal(amount, sink);
            }
            ItemEffect::RestoreMana(amount) => {
                target.restore_mana(amount, sink);
            }
        }
    }
}

/// Ordered item list. Names are the lookup key; duplicates are allowed and
/// resolved first-in-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two consumables every party member starts with.
    pub fn starter() -> Self {
        let mut inventory = Self::new();
        inventory.add(Item::potion());
        inventory.add(Item::ether());
        inventory
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes and returns the first item called `name`.
    pub fn take(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.name == name)?;
        Some(self.items.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_inventory_has_potion_and_ether() {
        let inventory = Inventory::starter();
        assert_eq!(inventory.names(), vec![POTION_NAME, ETHER_NAME]);
    }

    #[test]
    fn test_take_missing_item_leaves_inventory_unchanged() {
        let mut inventory = Inventory::starter();
        assert!(inventory.take("Elixir").is_none());
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_take_removes_only_first_match() {
        let mut inventory = Inventory::new();
        inventory.add(Item::potion());
        inventory.add(Item::ether());
        inventory.add(Item::potion());

        let taken = inventory.take(POTION_NAME);
        assert_eq!(taken, Some(Item::potion()));
        assert_eq!(inventory.names(), vec![ETHER_NAME, POTION_NAME]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut inventory = Inventory::starter();
        assert!(inventory.take("potion").is_none());
        assert!(inventory.contains(POTION_NAME));
    }
}
