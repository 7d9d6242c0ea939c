//! Castle shop, loot drops and gold rewards
//!
//! The shop stock is fixed. Buying hands the player a fresh copy of the
//! catalog entry; selling pays half the item's cost, rounded down.

use thiserror::Error;

use crate::dice::Dice;
use crate::entities::{Combatant, Monster, Player};
use crate::items::{templates, Armor, Potion, Weapon};

/// Highest d100 loot roll that drops a large potion
pub const LARGE_POTION_MAX: i32 = 5;
/// Highest d100 loot roll that drops a small potion
pub const SMALL_POTION_MAX: i32 = 35;

/// Why a trade did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("Not enough gold.")]
    NotEnoughGold { cost: u32, gold: u32 },
    #[error("Nothing to sell.")]
    NoSuchItem(usize),
}

/// An entry in the shop catalog
#[derive(Debug, Clone, PartialEq)]
pub enum ShopItem {
    Weapon(Weapon),
    Armor(Armor),
}

impl ShopItem {
    pub fn name(&self) -> &str {
        match self {
            ShopItem::Weapon(w) => &w.name,
            ShopItem::Armor(a) => &a.name,
        }
    }

    pub fn cost(&self) -> u32 {
        match self {
            ShopItem::Weapon(w) => w.cost,
            ShopItem::Armor(a) => a.cost,
        }
    }
}

pub fn shop_weapons() -> Vec<Weapon> {
    vec![
        Weapon::new("Short Sword", 2, 10),
        Weapon::new("Long Sword", 4, 20),
        Weapon::new("Great Axe", 6, 35),
    ]
}

pub fn shop_armors() -> Vec<Armor> {
    vec![
        Armor::new("Leather Armor", 12, 12),
        Armor::new("Chain Mail", 16, 28),
        Armor::new("Plate Armor", 20, 50),
    ]
}

/// Shop weapons followed by shop armors, in display order
pub fn shop_catalog() -> Vec<ShopItem> {
    shop_weapons()
        .into_iter()
        .map(ShopItem::Weapon)
        .chain(shop_armors().into_iter().map(ShopItem::Armor))
        .collect()
}

/// Buy an item. The player gets an independent copy of the catalog entry.
pub fn buy(player: &mut Player, item: &ShopItem) -> Result<(), TradeError> {
    let cost = item.cost();
    if !player.spend_gold(cost) {
        return Err(TradeError::NotEnoughGold {
            cost,
            gold: player.gold(),
        });
    }

    match item {
        ShopItem::Weapon(w) => player.add_weapon(w.clone()),
        ShopItem::Armor(a) => player.add_armor(a.clone()),
    }
    log::info!("Bought {} for {} gold", item.name(), cost);
    Ok(())
}

/// Sell the owned weapon at `index`, returning the gold credited
pub fn sell_weapon(player: &mut Player, index: usize) -> Result<u32, TradeError> {
    let weapon = player
        .remove_weapon(index)
        .ok_or(TradeError::NoSuchItem(index))?;
    let value = weapon.sell_value();
    player.add_gold(value);
    log::info!("Sold {} for {} gold", weapon.name, value);
    Ok(value)
}

/// Sell the owned armor at `index`, returning the gold credited
pub fn sell_armor(player: &mut Player, index: usize) -> Result<u32, TradeError> {
    let armor = player
        .remove_armor(index)
        .ok_or(TradeError::NoSuchItem(index))?;
    let value = armor.sell_value();
    player.add_gold(value);
    log::info!("Sold {} for {} gold", armor.name, value);
    Ok(value)
}

/// Roll for a potion drop from a defeated monster
pub fn handle_loot(_monster: &Monster, dice: &mut dyn Dice) -> Option<Potion> {
    let roll = dice.roll(1, 100);
    if roll <= LARGE_POTION_MAX {
        Some(templates::large_healing_potion())
    } else if roll <= SMALL_POTION_MAX {
        Some(templates::small_healing_potion())
    } else {
        None
    }
}

/// Gold awarded for defeating a monster
pub fn gold_reward(monster: &Monster, dice: &mut dyn Dice) -> u32 {
    let base = (monster.max_hp() / 2 + monster.damage()).max(1);
    dice.roll(base, base + 5) as u32
}
