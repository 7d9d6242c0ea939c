//! Item system

pub mod item;

pub use item::{Potion, Weapon, Armor, templates};
