//! Voxel tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one path so the binary, the
//! integration tests and the benches share `voxel_tetris::{core,input,term,types}`.

pub use voxel_tetris_core as core;
pub use voxel_tetris_input as input;
pub use voxel_tetris_term as term;
pub use voxel_tetris_types as types;
