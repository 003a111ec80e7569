//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! framebuffer of styled characters and the renderer flushes it to the
//! terminal, sending only what changed since the last frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use voxel_tetris_core as core;
pub use voxel_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
