//! Terminal input crate.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] commands and tracks the soft drop hold for
//! terminals that never report key release.

pub mod handler;
pub mod map;

pub use voxel_tetris_types as types;

pub use handler::{InputHandler, KeyActions};
pub use map::{handle_key_event, is_down_key, should_quit};
