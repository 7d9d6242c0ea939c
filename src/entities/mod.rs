//! Combat-capable actors: the hero and the monsters they meet

pub mod health;
pub mod combatant;
pub mod monster;
pub mod player;

pub use health::Health;
pub use combatant::Combatant;
pub use monster::Monster;
pub use player::{Player, BASE_ARMOR_CLASS, BASE_DAMAGE};
