//! Attack resolution
//!
//! A d20 roll against the defender's armor class. A hit deals the
//! attacker's full damage; nothing else is modified.

use crate::dice::Dice;
use crate::entities::Combatant;

/// Sides on the attack die
pub const ATTACK_DIE: i32 = 20;

/// Result of a single attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// The d20 roll, in `[1, 20]`
    pub roll: i32,
    /// Whether the roll met the defender's armor class
    pub hit: bool,
    /// Damage dealt, 0 on a miss
    pub damage: i32,
}

impl AttackResult {
    pub fn is_miss(&self) -> bool {
        !self.hit
    }
}

/// Roll the attack die and resolve the blow
pub fn attack(attacker: &dyn Combatant, defender: &mut dyn Combatant, dice: &mut dyn Dice) -> AttackResult {
    let roll = dice.roll(1, ATTACK_DIE);
    resolve_roll(attacker, defender, roll)
}

/// Resolve an attack for a roll that has already been made
pub fn resolve_roll(attacker: &dyn Combatant, defender: &mut dyn Combatant, roll: i32) -> AttackResult {
    if roll < defender.armor_class() {
        log::debug!("{} rolls {} against AC {}: miss", attacker.name(), roll, defender.armor_class());
        return AttackResult { roll, hit: false, damage: 0 };
    }

    let damage = attacker.damage();
    defender.health_mut().take_damage(damage);
    log::debug!(
        "{} rolls {} against AC {}: {} damage, {} hp left",
        attacker.name(),
        roll,
        defender.armor_class(),
        damage,
        defender.hp()
    );
    AttackResult { roll, hit: true, damage }
}

pub fn is_alive(entity: &dyn Combatant) -> bool {
    entity.is_alive()
}
