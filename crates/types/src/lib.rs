//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! They are plain data with no behavior beyond conversions, making them
//! usable in any context (simulation, terminal rendering, JSON event logs).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the floor, y grows upward)
//!
//! # Timing Constants
//!
//! The simulation is delta-time based; durations are kept in milliseconds
//! here and converted to seconds by the session config.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 1000 | Automatic downward step |
//! | `SOFT_DROP_INTERVAL_MS` | 80 | Step interval while soft drop is held |
//! | `CLEAR_ANIMATION_MS` | 400 | Duration of a row-clear animation |
//! | `FRAME_MS` | 16 | Default frame pacing of the terminal runner |
//!
//! # Examples
//!
//! ```
//! use voxel_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Normal gravity interval (one row per second)
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Gravity interval while soft drop is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 80;

/// Soft drop divisor applied to the level interval when speed-up is enabled
pub const SOFT_DROP_DIVISOR: u32 = 10;

/// Row-clear animation length (progress speed 2.5/s)
pub const CLEAR_ANIMATION_MS: u32 = 400;

/// Default frame pacing for the terminal runner (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// Points awarded per cleared row
pub const POINTS_PER_ROW: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop intervals by level when speed-up is enabled (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Interval reduction per level beyond the table
pub const DROP_INTERVAL_STEP_MS: u32 = 10;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    L,
    J,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use voxel_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Uppercase letter used in HUDs.
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }

    /// Display color as 0xRRGGBB.
    ///
    /// The renderer owns shading; the simulation only carries identity.
    pub fn color(&self) -> u32 {
        match self {
            PieceKind::I => 0x38bdf8,
            PieceKind::O => 0xfacc15,
            PieceKind::T => 0xa855f7,
            PieceKind::S => 0x22d3ee,
            PieceKind::Z => 0xfb7185,
            PieceKind::L => 0xf97316,
            PieceKind::J => 0x60a5fa,
        }
    }

    /// Index into [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
        }
    }
}

/// Rotation state in clockwise quarter turns from the spawn orientation.
///
/// The cycle goes: R0 → R90 → R180 → R270 → R0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Build from any number of quarter turns (taken modulo 4).
    pub fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }

    /// Number of clockwise quarter turns (0-3).
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use voxel_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() as i32 + 1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() as i32 - 1)
    }
}

/// Coarse session mode shown by the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::NotStarted => "notStarted",
            GameMode::Running => "running",
            GameMode::Paused => "paused",
            GameMode::GameOver => "gameOver",
        }
    }
}

/// Marker stored in an occupied board cell.
///
/// `piece_id` identifies the piece instance that placed the cell, so a
/// renderer can keep one voxel per cell alive while rows collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Occupant {
    pub kind: PieceKind,
    pub piece_id: u32,
}

impl Occupant {
    pub fn new(kind: PieceKind, piece_id: u32) -> Self {
        Self { kind, piece_id }
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Occupant)`: Cell filled by a locked piece
pub type Cell = Option<Occupant>;

/// Commands a frontend can issue to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left (edge-triggered)
    MoveLeft,
    /// Move piece one cell right (edge-triggered)
    MoveRight,
    /// Move piece one cell down, locking it if blocked (edge-triggered)
    MoveDown,
    /// Rotate piece 90° clockwise (edge-triggered)
    Rotate,
    /// Begin holding soft drop (level-triggered)
    SoftDropOn,
    /// Release soft drop
    SoftDropOff,
    /// Leave the start screen
    Start,
    Pause,
    Resume,
    TogglePause,
    /// Restart with a fresh board from any mode
    Reset,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use voxel_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("softDropOn"), Some(GameAction::SoftDropOn));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "softdropon" => Some(GameAction::SoftDropOn),
            "softdropoff" => Some(GameAction::SoftDropOff),
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "togglepause" => Some(GameAction::TogglePause),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::SoftDropOn => "softDropOn",
            GameAction::SoftDropOff => "softDropOff",
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::TogglePause => "togglePause",
            GameAction::Reset => "reset",
        }
    }
}
