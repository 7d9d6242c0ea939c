//! Delvekeep - A small turn-based dungeon crawl
//!
//! Wander the dungeon for monsters and gold, then spend it
//! on arms and armor at the castle.

pub mod config;
pub mod dice;
pub mod game;
pub mod entities;
pub mod combat;
pub mod items;
pub mod save;
pub mod ui;

// Re-export commonly used types
pub use game::{Game, GameState};
pub use entities::{Combatant, Monster, Player};
