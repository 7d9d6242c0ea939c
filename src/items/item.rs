//! Item definitions
//!
//! Potions, weapons and armor are plain value objects. The serde names
//! match the on-disk save format.

use serde::{Deserialize, Serialize};

/// A consumable that restores hit points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub name: String,
    #[serde(rename = "heal")]
    pub heal_amount: i32,
}

impl Potion {
    pub fn new(name: impl Into<String>, heal_amount: i32) -> Self {
        Self {
            name: name.into(),
            heal_amount,
        }
    }
}

/// A weapon adds its bonus to the wielder's base damage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(rename = "damage")]
    pub damage_bonus: i32,
    pub cost: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage_bonus: i32, cost: u32) -> Self {
        Self {
            name: name.into(),
            damage_bonus,
            cost,
        }
    }

    /// Gold received when selling this weapon
    pub fn sell_value(&self) -> u32 {
        self.cost / 2
    }
}

/// Armor replaces the wearer's base armor class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    #[serde(rename = "armor")]
    pub armor_value: i32,
    pub cost: u32,
}

impl Armor {
    pub fn new(name: impl Into<String>, armor_value: i32, cost: u32) -> Self {
        Self {
            name: name.into(),
            armor_value,
            cost,
        }
    }

    pub fn sell_value(&self) -> u32 {
        self.cost / 2
    }
}

/// Predefined potions dropped by monsters
pub mod templates {
    use super::Potion;

    pub const SMALL_HEAL: i32 = 5;
    pub const LARGE_HEAL: i32 = 12;

    pub fn small_healing_potion() -> Potion {
        Potion::new("Small Healing Potion", SMALL_HEAL)
    }

    pub fn large_healing_potion() -> Potion {
        Potion::new("Large Healing Potion", LARGE_HEAL)
    }
}
