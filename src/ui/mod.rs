//! User Interface module
//!
//! Terminal UI using ratatui.

pub mod app;
pub mod input;

pub use app::App;
pub use input::{translate, InputAction};
