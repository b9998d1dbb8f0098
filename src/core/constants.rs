// Session limits
pub const ROUND_CAP: u32 = 20;

// Party member defaults
pub const PARTY_DEFAULT_NAME: &str = "Wanderer";
pub const PARTY_BASE_HP: u32 = 40;
pub const PARTY_BASE_MP: u32 = 20;
pub const PARTY_BASE_STRENGTH: u32 = 6;
pub const PARTY_BASE_INTELLIGENCE: u32 = 5;

// Adversary defaults
pub const ADVERSARY_DEFAULT_NAME: &str = "Forest Warden";
pub const ADVERSARY_BASE_HP: u32 = 70;
pub const ADVERSARY_BASE_MP: u32 = 25;
pub const ADVERSARY_BASE_STRENGTH: u32 = 6;
pub const ADVERSARY_BASE_INTELLIGENCE: u32 = 6;

// Party abilities: mana costs
pub const POWER_STRIKE_COST: u32 = 5;
pub const ELEMENTAL_BOLT_COST: u32 = 7;
pub const HEAL_ALLY_COST: u32 = 6;

// Party abilities: formula constants
pub const POWER_STRIKE_STRENGTH_MULTIPLIER: u32 = 2;
pub const ELEMENTAL_BOLT_INT_MULTIPLIER: u32 = 2;
pub const ELEMENTAL_BOLT_FLAT_DAMAGE: u32 = 2;
pub const HEAL_ALLY_INT_MULTIPLIER: u32 = 2;
pub const HEAL_ALLY_FLAT_HEAL: u32 = 4;

// Status effects
pub const BURNING_EFFECT_NAME: &str = "Burning";
pub const BURNING_DURATION: i32 = 2;
pub const BURNING_DAMAGE_PER_TICK: u32 = 2;
pub const FEAR_EFFECT_NAME: &str = "Fear";
pub const FEAR_DURATION: i32 = 2;

// Adversary phase skills
pub const DARK_BOLT_COST: u32 = 6;
pub const DARK_BOLT_FLAT_DAMAGE: u32 = 3;
pub const SHADOW_WAVE_COST: u32 = 8;
pub const SHADOW_WAVE_FLAT_DAMAGE: u32 = 3;
pub const SHADOW_WAVE_INT_DIVISOR: u32 = 2;
pub const ADVERSARY_MELEE_BONUS: u32 = 3;

// Starting consumables
pub const POTION_NAME: &str = "Potion";
pub const POTION_HEAL: u32 = 12;
pub const ETHER_NAME: &str = "Ether";
pub const ETHER_MANA: u32 = 8;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 32;
