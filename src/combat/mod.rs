//! Combat system

pub mod damage;

pub use damage::{attack, resolve_roll, is_alive, AttackResult, ATTACK_DIE};
