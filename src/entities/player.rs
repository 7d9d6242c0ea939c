//! The hero and their belongings
//!
//! The player owns three ordered collections (potions, weapons, armors).
//! Equipped gear is tracked as an index into the owning collection, so an
//! equipped item is always one the player actually holds.

use crate::items::{Armor, Potion, Weapon};

use super::combatant::Combatant;
use super::health::Health;

/// Armor class when no armor is worn
pub const BASE_ARMOR_CLASS: i32 = 10;
/// Damage of an unarmed hit
pub const BASE_DAMAGE: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub health: Health,
    gold: u32,
    potions: Vec<Potion>,
    weapons: Vec<Weapon>,
    armors: Vec<Armor>,
    equipped_weapon: Option<usize>,
    equipped_armor: Option<usize>,
}

impl Player {
    pub fn new(name: impl Into<String>, hp: i32, max_hp: i32, gold: u32) -> Self {
        Self {
            name: name.into(),
            health: Health::new(hp, max_hp),
            gold,
            potions: Vec::new(),
            weapons: Vec::new(),
            armors: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    /// Fresh hero used when no save exists
    pub fn default_hero() -> Self {
        Self::new("Hero", 20, 30, 30)
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn potions(&self) -> &[Potion] {
        &self.potions
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn armors(&self) -> &[Armor] {
        &self.armors
    }

    /// Total entries across all three collections
    pub fn item_count(&self) -> usize {
        self.potions.len() + self.weapons.len() + self.armors.len()
    }

    pub fn equipped_weapon_index(&self) -> Option<usize> {
        self.equipped_weapon
    }

    pub fn equipped_armor_index(&self) -> Option<usize> {
        self.equipped_armor
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.equipped_weapon.and_then(|i| self.weapons.get(i))
    }

    pub fn equipped_armor(&self) -> Option<&Armor> {
        self.equipped_armor.and_then(|i| self.armors.get(i))
    }

    pub fn is_weapon_equipped(&self, index: usize) -> bool {
        self.equipped_weapon == Some(index)
    }

    pub fn is_armor_equipped(&self, index: usize) -> bool {
        self.equipped_armor == Some(index)
    }

    /// Restore hit points up to the maximum, returning the actual gain
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }

    // --- Gold ---

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, returns false if not enough
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if amount <= self.gold {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    // --- Collections ---

    pub fn add_potion(&mut self, potion: Potion) {
        self.potions.push(potion);
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    pub fn add_armor(&mut self, armor: Armor) {
        self.armors.push(armor);
    }

    /// Drink the potion at `index`. Returns the hit points actually
    /// restored, or `None` if there is no such potion.
    pub fn drink_potion(&mut self, index: usize) -> Option<i32> {
        if index >= self.potions.len() {
            return None;
        }
        let potion = self.potions.remove(index);
        Some(self.heal(potion.heal_amount))
    }

    /// Remove a weapon, unequipping it if it was the wielded one
    pub fn remove_weapon(&mut self, index: usize) -> Option<Weapon> {
        if index >= self.weapons.len() {
            return None;
        }
        self.equipped_weapon = shift_after_removal(self.equipped_weapon, index);
        Some(self.weapons.remove(index))
    }

    /// Remove an armor, unequipping it if it was the worn one
    pub fn remove_armor(&mut self, index: usize) -> Option<Armor> {
        if index >= self.armors.len() {
            return None;
        }
        self.equipped_armor = shift_after_removal(self.equipped_armor, index);
        Some(self.armors.remove(index))
    }

    // --- Equipment ---

    pub fn equip_weapon(&mut self, index: usize) -> bool {
        if index >= self.weapons.len() {
            return false;
        }
        self.equipped_weapon = Some(index);
        true
    }

    pub fn equip_armor(&mut self, index: usize) -> bool {
        if index >= self.armors.len() {
            return false;
        }
        self.equipped_armor = Some(index);
        true
    }

    pub fn unequip_weapon(&mut self) -> bool {
        self.equipped_weapon.take().is_some()
    }

    pub fn unequip_armor(&mut self) -> bool {
        self.equipped_armor.take().is_some()
    }
}

/// Equipped slot after the element at `removed` leaves the collection
fn shift_after_removal(equipped: Option<usize>, removed: usize) -> Option<usize> {
    match equipped {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}

impl Combatant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn armor_class(&self) -> i32 {
        self.equipped_armor()
            .map(|a| a.armor_value)
            .unwrap_or(BASE_ARMOR_CLASS)
    }

    fn damage(&self) -> i32 {
        BASE_DAMAGE + self.equipped_weapon().map(|w| w.damage_bonus).unwrap_or(0)
    }
}
