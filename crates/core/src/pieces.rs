//! Pieces module - the falling tetromino and its exact rotation
//!
//! Rotation uses an integer `(cos, sin)` lookup per quarter turn, so any
//! sequence of rotations lands on exactly the same cells as the equivalent
//! single rotation. There is no floating point anywhere on this path.

use crate::shapes::{base_shape, max_offset_y, PieceShape};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// `(cos, sin)` of `n × 90°` for `n` in 0..4
const QUARTER_TURNS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Absolute cell coordinates of a piece
pub type PieceCells = [(i8, i8); 4];

/// Rotate a single offset clockwise by the given rotation.
#[inline]
pub fn rotate_offset((x, y): (i8, i8), rotation: Rotation) -> (i8, i8) {
    let (cos, sin) = QUARTER_TURNS[rotation.quarter_turns() as usize];
    (x * cos + y * sin, -x * sin + y * cos)
}

/// Rotate a whole shape clockwise by the given rotation.
pub fn rotate_shape(shape: &PieceShape, rotation: Rotation) -> PieceShape {
    let mut out = *shape;
    for offset in &mut out {
        *offset = rotate_offset(*offset, rotation);
    }
    out
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn position: horizontally centered, with its
    /// highest cell on the top visible row.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x: (BOARD_WIDTH / 2) as i8,
            y: BOARD_HEIGHT as i8 - 1 - max_offset_y(kind),
        }
    }

    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x,
            y,
        }
    }

    /// Anchor-relative offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        rotate_shape(base_shape(self.kind), self.rotation)
    }

    /// Absolute cells for an arbitrary rotation at the current anchor
    pub fn cells_at(&self, rotation: Rotation) -> PieceCells {
        let mut cells = rotate_shape(base_shape(self.kind), rotation);
        for (cx, cy) in &mut cells {
            *cx += self.x;
            *cy += self.y;
        }
        cells
    }

    /// Absolute cells for the current rotation
    pub fn cells(&self) -> PieceCells {
        self.cells_at(self.rotation)
    }

    /// A copy moved by `(dx, dy)`
    pub fn translate(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// A copy rotated clockwise by `quarter_turns` (negative turns go counter-clockwise)
    pub fn rotated(&self, quarter_turns: i32) -> Self {
        Self {
            rotation: Rotation::from_quarter_turns(
                self.rotation.quarter_turns() as i32 + quarter_turns,
            ),
            ..*self
        }
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }
}
