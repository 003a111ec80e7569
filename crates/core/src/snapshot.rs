use arrayvec::ArrayVec;
use serde::Serialize;

use crate::clear::ClearEvent;
use crate::pieces::{Piece, PieceCells};
use crate::types::{Cell, GameMode, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub color: u32,
    /// World cells; may include cells above the top row
    pub cells: PieceCells,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            color: value.color(),
            cells: value.cells(),
        }
    }
}

/// Read-only view handed to renderers and HUDs once per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// `board[y][x]`, row 0 is the floor
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub clearing: ArrayVec<ClearEvent, { BOARD_HEIGHT as usize }>,
    pub next: PieceKind,
    pub mode: GameMode,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub piece_id: u32,
    pub soft_drop: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.mode == GameMode::Running
    }

    /// Clear-animation progress of a row, if it is being removed
    pub fn clearing_progress(&self, row: u8) -> Option<f32> {
        self.clearing
            .iter()
            .find(|e| e.row == row)
            .map(|e| e.progress)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            clearing: ArrayVec::new(),
            next: PieceKind::I,
            mode: GameMode::NotStarted,
            score: 0,
            lines: 0,
            level: 0,
            piece_id: 0,
            soft_drop: false,
        }
    }
}
