//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block game: the occupancy grid,
//! piece shapes and their exact rotation, row clearing with its animation
//! timeline, scoring, piece selection and the session state machine. It has
//! no dependency on terminals, sockets or files.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 occupancy grid, collision, locking, row collapse
//! - [`shapes`]: base cell offsets for the seven kinds
//! - [`pieces`]: the active piece and integer quarter-turn rotation
//! - [`clear`]: per-row clear animation progress
//! - [`input_state`]: presses sampled once per frame
//! - [`scoring`]: score policies and drop speed curves
//! - [`rng`]: seeded piece selection (uniform or 7-bag)
//! - [`config`]: session tuning from defaults or environment
//! - [`events`]: what happened, for logs and effects
//! - [`session`]: the game loop tying it all together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Coordinates
//!
//! `x` grows to the right and `y` grows upward: row 0 is the floor and row 19
//! is the top visible row. A piece may overhang above row 19 while falling.
//!
//! # Example
//!
//! ```
//! use voxel_tetris_core::{Session, SessionConfig};
//! use voxel_tetris_types::{GameMode, PieceKind};
//!
//! let mut session = Session::new(SessionConfig::default().with_seed(7));
//! session.piece_queue_mut().set_next(PieceKind::O);
//! session.start();
//!
//! session.move_left();
//! session.tick(0.016);
//!
//! assert_eq!(session.mode(), GameMode::Running);
//! assert_eq!(session.active().unwrap().x, 4);
//! ```

pub mod board;
pub mod clear;
pub mod config;
pub mod events;
pub mod input_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use voxel_tetris_types as types;

pub use board::Board;
pub use clear::{ClearEvent, ClearTracker};
pub use config::SessionConfig;
pub use events::SessionEvent;
pub use input_state::{InputState, Press};
pub use pieces::{Piece, PieceCells};
pub use rng::{PieceQueue, PieceRule, SimpleRng};
pub use scoring::{DropCurve, ScoringPolicy};
pub use session::{Session, SessionEvents};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
