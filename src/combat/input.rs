//! Action sources that do not need a terminal: text parsing, scripted
//! sequences and a seeded random policy.

use super::party::Ability;
use super::session::{ActionSelector, PlayerAction, SelectionError, TurnContext};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::str::FromStr;

impl FromStr for PlayerAction {
    type Err = SelectionError;

    /// Accepts the menu numbers (`1`..`5`) or their names. Item use needs a
    /// name after the keyword: `5 Potion`, `item Potion`, `use Potion`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (trimmed, ""),
        };

        let keyword = keyword.to_lowercase();
        let rest_lower = rest.to_lowercase();
        match (keyword.as_str(), rest_lower.as_str()) {
            ("1" | "attack", "") | ("basic", "attack") => Ok(PlayerAction::BasicAttack),
            ("2" | "power", "") | ("power", "strike") => Ok(PlayerAction::PowerStrike),
            ("3" | "bolt", "") | ("elemental", "bolt") => Ok(PlayerAction::ElementalBolt),
            ("4" | "heal", "") | ("heal", "ally") => Ok(PlayerAction::HealAlly),
            ("5" | "item" | "use", _) if !rest.is_empty() => {
                Ok(PlayerAction::UseItem(rest.to_string()))
            }
            _ => Err(SelectionError::UnknownAction(trimmed.to_string())),
        }
    }
}

/// Replays a fixed sequence of selections, then reports the input closed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    queue: VecDeque<Result<PlayerAction, SelectionError>>,
}

impl ScriptedSelector {
    pub fn new(actions: Vec<PlayerAction>) -> Self {
        Self {
            queue: actions.into_iter().map(Ok).collect(),
        }
    }

    /// Parses each line the way the terminal prompt would.
    pub fn from_inputs(inputs: &[&str]) -> Self {
        Self {
            queue: inputs.iter().map(|line| line.parse()).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionSelector for ScriptedSelector {
    fn select_action(&mut self, _ctx: &TurnContext<'_>) -> Result<PlayerAction, SelectionError> {
        self.queue.pop_front().unwrap_or(Err(SelectionError::InputClosed))
    }
}

/// Picks uniformly among the actions that would actually go off: basic
/// attack, affordable abilities (healing only when hurt) and carried items.
#[derive(Debug, Clone)]
pub struct RandomSelector<R> {
    rng: R,
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ActionSelector for RandomSelector<R> {
    fn select_action(&mut self, ctx: &TurnContext<'_>) -> Result<PlayerAction, SelectionError> {
        let party = ctx.party;
        let mut options = vec![PlayerAction::BasicAttack];
        for ability in Ability::all() {
            if !ability.affordable_by(party) {
                continue;
            }
            match ability {
                Ability::PowerStrike => options.push(PlayerAction::PowerStrike),
                Ability::ElementalBolt => options.push(PlayerAction::ElementalBolt),
                Ability::HealAlly if party.hp() < party.max_hp => {
                    options.push(PlayerAction::HealAlly)
                }
                Ability::HealAlly => {}
            }
        }
        for name in ctx.item_names() {
            options.push(PlayerAction::UseItem(name.to_string()));
        }

        Ok(options
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or(PlayerAction::BasicAttack))
    }
}
