//! Combat capability shared by the hero and monsters

use super::health::Health;

/// Anything that can attack and be attacked
pub trait Combatant {
    fn name(&self) -> &str;

    fn health(&self) -> &Health;

    fn health_mut(&mut self) -> &mut Health;

    /// Threshold an attack roll must meet or beat to hit
    fn armor_class(&self) -> i32;

    /// Damage dealt on a successful hit
    fn damage(&self) -> i32;

    fn hp(&self) -> i32 {
        self.health().current()
    }

    fn max_hp(&self) -> i32 {
        self.health().max()
    }

    fn is_alive(&self) -> bool {
        !self.health().is_dead()
    }
}
