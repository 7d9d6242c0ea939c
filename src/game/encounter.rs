//! Wandering encounters
//!
//! A d100 decides whether the hero meets nothing, a goblin or an orc.
//! Monster stats scale with the encounter difficulty.

use crate::dice::Dice;
use crate::entities::{Combatant, Monster, Player};

/// Highest d100 roll that finds nothing
pub const NOTHING_MAX: i32 = 40;
/// Highest d100 roll that finds a weak monster
pub const WEAK_MAX: i32 = 85;

/// Base chance to escape a fight
pub const FLEE_BASE_CHANCE: f64 = 0.6;
/// Extra escape chance when the hero has more hp than the monster
pub const FLEE_HP_BONUS: f64 = 0.1;

/// Outcome of one step of wandering
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub message: String,
    pub monster: Option<Monster>,
}

/// Wander the dungeon once
pub fn wander(_hero: &Player, dice: &mut dyn Dice) -> Encounter {
    let roll = dice.roll(1, 100);
    log::debug!("Wander roll: {}", roll);

    if roll <= NOTHING_MAX {
        return Encounter {
            message: "You wander the dungeon but find nothing.".to_string(),
            monster: None,
        };
    }

    let monster = if roll <= WEAK_MAX {
        generate_monster(1, dice)
    } else {
        let mut orc = generate_monster(2, dice);
        orc.name = "Orc".to_string();
        orc
    };

    Encounter {
        message: format!("A {} appears!", monster.name),
        monster: Some(monster),
    }
}

/// Roll up a monster. Each stat is drawn independently.
pub fn generate_monster(difficulty: i32, dice: &mut dyn Dice) -> Monster {
    let hp = 8 + dice.roll(0, 4) * difficulty;
    let base_damage = 2 + dice.roll(0, 2) * difficulty;
    let armor = 10 + dice.roll(0, 2);
    Monster::new("Goblin", hp, base_damage, armor)
}

/// Try to run from a fight. Returns true on a clean escape.
pub fn attempt_flee(hero: &Player, monster: &Monster, dice: &mut dyn Dice) -> bool {
    let mut chance = FLEE_BASE_CHANCE;
    if hero.hp() > monster.hp() {
        chance += FLEE_HP_BONUS;
    }
    dice.chance() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{ScriptedDice, StdDice};

    fn wander_with(roll: i32) -> Encounter {
        let hero = Player::default_hero();
        let mut dice = ScriptedDice::with_rolls([roll, 2, 1, 0]);
        wander(&hero, &mut dice)
    }

    #[test]
    fn test_wander_boundaries() {
        assert!(wander_with(1).monster.is_none());
        assert!(wander_with(40).monster.is_none());
        assert_eq!(wander_with(40).message, "You wander the dungeon but find nothing.");
        assert_eq!(wander_with(41).monster.unwrap().name, "Goblin");
        assert_eq!(wander_with(85).monster.unwrap().name, "Goblin");
        assert_eq!(wander_with(86).monster.unwrap().name, "Orc");
        assert_eq!(wander_with(100).monster.unwrap().name, "Orc");
    }

    #[test]
    fn test_encounter_message_names_monster() {
        assert_eq!(wander_with(50).message, "A Goblin appears!");
        assert_eq!(wander_with(90).message, "A Orc appears!");
    }

    #[test]
    fn test_generate_monster_scales_with_difficulty() {
        let mut dice = ScriptedDice::with_rolls([2, 1, 0]);
        let goblin = generate_monster(1, &mut dice);
        assert_eq!(goblin.hp(), 10);
        assert_eq!(goblin.max_hp(), 10);
        assert_eq!(goblin.base_damage, 3);
        assert_eq!(goblin.armor, 10);

        let mut dice = ScriptedDice::with_rolls([4, 2, 2]);
        let orc = generate_monster(2, &mut dice);
        assert_eq!(orc.hp(), 16);
        assert_eq!(orc.base_damage, 6);
        assert_eq!(orc.armor, 12);
    }

    #[test]
    fn test_generated_stats_in_range() {
        let mut dice = StdDice::seeded(99);
        for difficulty in 1..=2 {
            for _ in 0..100 {
                let m = generate_monster(difficulty, &mut dice);
                assert!((8..=8 + 4 * difficulty).contains(&m.hp()));
                assert!((2..=2 + 2 * difficulty).contains(&m.base_damage));
                assert!((10..=12).contains(&m.armor));
            }
        }
    }

    #[test]
    fn test_flee_chance() {
        let hero = Player::default_hero(); // 20 hp
        let weak = Monster::new("Goblin", 8, 2, 10);
        let tough = Monster::new("Orc", 20, 2, 10);

        let mut dice = ScriptedDice::new();
        dice.push_chance(0.65).push_chance(0.65).push_chance(0.59);
        assert!(attempt_flee(&hero, &weak, &mut dice));
        assert!(!attempt_flee(&hero, &tough, &mut dice));
        assert!(attempt_flee(&hero, &tough, &mut dice));
    }
}
