//! Player save/load
//!
//! The hero is stored as a single JSON document. Equipped gear is written
//! out as a copy of the item plus its slot index, and re-linked to the
//! owned collection on load.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::entities::{Combatant, Player};
use crate::items::{Armor, Potion, Weapon};

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_name() -> String {
    "Hero".to_string()
}

fn default_hp() -> i32 {
    10
}

/// On-disk layout of the hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_hp")]
    pub hp: i32,
    /// Falls back to `hp` when absent
    #[serde(default)]
    pub max_hp: Option<i32>,
    /// Signed so a negative value still loads (clamped to 0)
    #[serde(default)]
    pub gold: i64,
    #[serde(default)]
    pub inventory: Vec<Potion>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    #[serde(default)]
    pub armors: Vec<Armor>,
    #[serde(default)]
    pub equipped_weapon: Option<Weapon>,
    #[serde(default)]
    pub equipped_armor: Option<Armor>,
    /// Slot of the equipped weapon, absent in older saves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped_weapon_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipped_armor_index: Option<usize>,
}

/// Slot to equip: the saved index when it still holds the same item,
/// otherwise the first owned item equal to it
fn relink<T: PartialEq>(owned: &[T], item: &T, index: Option<usize>) -> Option<usize> {
    match index {
        Some(i) if owned.get(i) == Some(item) => Some(i),
        _ => owned.iter().position(|o| o == item),
    }
}

impl SaveData {
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            hp: player.hp(),
            max_hp: Some(player.max_hp()),
            gold: i64::from(player.gold()),
            inventory: player.potions().to_vec(),
            weapons: player.weapons().to_vec(),
            armors: player.armors().to_vec(),
            equipped_weapon: player.equipped_weapon().cloned(),
            equipped_armor: player.equipped_armor().cloned(),
            equipped_weapon_index: player.equipped_weapon_index(),
            equipped_armor_index: player.equipped_armor_index(),
        }
    }

    /// Rebuild the player. An equipped item goes back to its saved slot,
    /// or the first owned item equal to it; if none matches it is added
    /// to the collection.
    pub fn into_player(self) -> Player {
        let max_hp = self.max_hp.unwrap_or(self.hp);
        if self.gold < 0 {
            log::warn!("Saved gold {} is negative, loading as 0", self.gold);
        }
        let gold = u32::try_from(self.gold.max(0)).unwrap_or(u32::MAX);
        let mut player = Player::new(self.name, self.hp, max_hp, gold);
        for potion in self.inventory {
            player.add_potion(potion);
        }
        for weapon in self.weapons {
            player.add_weapon(weapon);
        }
        for armor in self.armors {
            player.add_armor(armor);
        }

        if let Some(weapon) = self.equipped_weapon {
            let index = match relink(player.weapons(), &weapon, self.equipped_weapon_index) {
                Some(i) => i,
                None => {
                    log::warn!("Equipped weapon {} not in pack, adding it", weapon.name);
                    player.add_weapon(weapon);
                    player.weapons().len() - 1
                }
            };
            player.equip_weapon(index);
        }

        if let Some(armor) = self.equipped_armor {
            let index = match relink(player.armors(), &armor, self.equipped_armor_index) {
                Some(i) => i,
                None => {
                    log::warn!("Equipped armor {} not in pack, adding it", armor.name);
                    player.add_armor(armor);
                    player.armors().len() - 1
                }
            };
            player.equip_armor(index);
        }

        player
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Somewhere a hero snapshot can be kept between sessions
pub trait PlayerStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Player>, SaveError>;

    fn save(&mut self, player: &Player) -> Result<(), SaveError>;
}

/// JSON file at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlayerStore for JsonFileStore {
    fn load(&self) -> Result<Option<Player>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let data = SaveData::from_json(&json)?;
        log::info!("Player loaded from {:?}", self.path);
        Ok(Some(data.into_player()))
    }

    fn save(&mut self, player: &Player) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = SaveData::from_player(player).to_json()?;
        fs::write(&self.path, json)?;
        log::info!("Player saved to {:?}", self.path);
        Ok(())
    }
}

/// Keeps the latest snapshot in memory, serialized like the file store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PlayerStore for MemoryStore {
    fn load(&self) -> Result<Option<Player>, SaveError> {
        match &self.json {
            Some(json) => Ok(Some(SaveData::from_json(json)?.into_player())),
            None => Ok(None),
        }
    }

    fn save(&mut self, player: &Player) -> Result<(), SaveError> {
        self.json = Some(SaveData::from_player(player).to_json()?);
        self.saves += 1;
        Ok(())
    }
}

/// Load the saved hero, or a fresh one if there is no usable save
pub fn load_or_default(store: &dyn PlayerStore) -> Player {
    match store.load() {
        Ok(Some(player)) => player,
        Ok(None) => {
            log::info!("No saved player, creating a new hero");
            Player::default_hero()
        }
        Err(e) => {
            log::warn!("Failed to load player: {}, creating a new hero", e);
            Player::default_hero()
        }
    }
}
