//! Game module - Core game logic and state management

pub mod economy;
pub mod encounter;
mod messages;
mod state;

pub use economy::{ShopItem, TradeError};
pub use encounter::Encounter;
pub use messages::{GameMessage, MessageCategory, MessageLog, MAX_MESSAGES};
pub use state::{Game, GameState, InventorySlot, Key, CASTLE_MENU_OPTIONS, MAIN_MENU_OPTIONS};
