//! Turn-based combat: combatants, status effects, the adversary's phase
//! strategy and the round loop that ties them together.

#![allow(unused_imports)]

pub mod actor;
pub mod adversary;
pub mod effect;
pub mod events;
pub mod input;
pub mod inventory;
pub mod party;
pub mod session;

pub use actor::*;
pub use adversary::*;
pub use effect::*;
pub use events::*;
pub use input::*;
pub use inventory::*;
pub use party::*;
pub use session::*;
