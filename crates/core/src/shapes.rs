//! Shape table - cell offsets of the seven tetrominoes
//!
//! Offsets are relative to the piece anchor (the cell at `(0, 0)`), in the
//! spawn orientation, with y growing upward. Rotation is applied on top of
//! these by [`crate::pieces`].

use crate::types::PieceKind;

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

const I_SHAPE: PieceShape = [(-2, 0), (-1, 0), (0, 0), (1, 0)];
const O_SHAPE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];
const T_SHAPE: PieceShape = [(-1, 0), (0, 0), (1, 0), (0, 1)];
const S_SHAPE: PieceShape = [(0, 0), (1, 0), (-1, 1), (0, 1)];
const Z_SHAPE: PieceShape = [(-1, 0), (0, 0), (0, 1), (1, 1)];
const L_SHAPE: PieceShape = [(-1, 0), (0, 0), (1, 0), (1, 1)];
const J_SHAPE: PieceShape = [(-1, 0), (0, 0), (1, 0), (-1, 1)];

/// Get the spawn-orientation offsets for a piece kind
pub fn base_shape(kind: PieceKind) -> &'static PieceShape {
    match kind {
        PieceKind::I => &I_SHAPE,
        PieceKind::O => &O_SHAPE,
        PieceKind::T => &T_SHAPE,
        PieceKind::S => &S_SHAPE,
        PieceKind::Z => &Z_SHAPE,
        PieceKind::L => &L_SHAPE,
        PieceKind::J => &J_SHAPE,
    }
}

/// Highest offset row of a shape; spawn uses it to keep the piece on the top row.
pub fn max_offset_y(kind: PieceKind) -> i8 {
    base_shape(kind)
        .iter()
        .map(|&(_, y)| y)
        .max()
        .unwrap_or(0)
}
