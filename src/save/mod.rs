//! Save/load system
//!
//! Persists the hero between sessions.

pub mod save_game;

pub use save_game::{
    SaveData, SaveError,
    PlayerStore, JsonFileStore, MemoryStore,
    load_or_default,
};
