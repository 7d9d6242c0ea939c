//! Monsters met while wandering the dungeon

use super::combatant::Combatant;
use super::health::Health;

/// A short-lived opponent. Monsters exist only for the length of one fight.
#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub name: String,
    pub health: Health,
    pub base_damage: i32,
    pub armor: i32,
}

impl Monster {
    pub fn new(name: impl Into<String>, hp: i32, base_damage: i32, armor: i32) -> Self {
        Self {
            name: name.into(),
            health: Health::full(hp),
            base_damage,
            armor,
        }
    }
}

impl Combatant for Monster {
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
        self.armor
    }

    fn damage(&self) -> i32 {
        self.base_damage
    }
}
