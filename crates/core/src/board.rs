//! Board module - manages the occupancy grid
//!
//! The board is a 10x20 grid where each cell is empty or holds an [`Occupant`].
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (bottom to top). Cells above the top row are open space: a piece may
//! overhang there, but nothing is ever stored there.

use arrayvec::ArrayVec;

use crate::types::{Cell, Occupant, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Full row indices, ascending
pub type FullRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the floor
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position lies outside the stored grid (including above the top)
    pub fn is_out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8
    }

    /// Check whether a single cell is blocked for a piece.
    ///
    /// Walls and floor block; the space above the top row does not.
    #[inline]
    pub fn blocks(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 {
            return true;
        }
        self.is_occupied(x, y)
    }

    /// Check whether any of the given cells hits a wall, the floor or a locked cell.
    pub fn collides(&self, cells: &[(i8, i8)]) -> bool {
        cells.iter().any(|&(x, y)| self.blocks(x, y))
    }

    /// Lock cells onto the board with the given occupant.
    ///
    /// All cells are validated first (inside the grid and empty); if any
    /// fails, nothing is written and false is returned.
    pub fn lock(&mut self, cells: &[(i8, i8)], occupant: Occupant) -> bool {
        let valid = cells
            .iter()
            .all(|&(x, y)| matches!(self.get(x, y), Some(None)));
        if !valid {
            return false;
        }

        for &(x, y) in cells {
            self.set(x, y, Some(occupant));
        }
        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, bottom to top
    pub fn find_full_rows(&self) -> FullRows {
        (0..BOARD_HEIGHT)
            .filter(|&y| self.is_row_full(y as usize))
            .collect()
    }

    /// Remove a row and shift every row above it down by one.
    ///
    /// Occupants move with their rows; the top row becomes empty.
    pub fn collapse_row(&mut self, row: usize) {
        debug_assert!(row < BOARD_HEIGHT as usize, "collapse_row({row}) out of range");
        if row >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;
        // copy_within handles the overlapping ranges
        self.cells
            .copy_within((row + 1) * width..BOARD_SIZE, row * width);
        self.cells[BOARD_SIZE - width..].fill(None);
    }

    /// Row `y` as a slice, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Rows from the floor upward
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy occupancy into a row-major 2D grid (row 0 = floor)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn occ(kind: PieceKind, id: u32) -> Occupant {
        Occupant::new(kind, id)
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_space_above_top_is_open() {
        let board = Board::new();
        assert!(!board.blocks(4, BOARD_HEIGHT as i8));
        assert!(!board.blocks(4, BOARD_HEIGHT as i8 + 3));
        assert!(board.blocks(-1, BOARD_HEIGHT as i8 + 3));
    }

    #[test]
    fn test_lock_rejects_overhang_without_writing() {
        let mut board = Board::new();
        let cells = [(4, 19), (4, 20), (5, 19), (5, 20)];
        assert!(!board.lock(&cells, occ(PieceKind::O, 1)));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_collapse_moves_occupants_with_rows() {
        let mut board = Board::new();
        board.set(0, 0, Some(occ(PieceKind::I, 1)));
        board.set(3, 1, Some(occ(PieceKind::T, 2)));
        board.set(9, 19, Some(occ(PieceKind::Z, 3)));

        board.collapse_row(0);

        assert_eq!(board.get(3, 0), Some(Some(occ(PieceKind::T, 2))));
        assert_eq!(board.get(9, 18), Some(Some(occ(PieceKind::Z, 3))));
        assert!(board.row(19).iter().all(|c| c.is_none()));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_collapse_top_row_only_clears_it() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 19, Some(occ(PieceKind::J, 7)));
        }
        board.set(0, 18, Some(occ(PieceKind::L, 8)));
        board.collapse_row(19);
        assert_eq!(board.occupied_count(), 1);
        assert!(board.is_occupied(0, 18));
    }

    #[test]
    fn test_write_grid_is_floor_first() {
        let mut board = Board::new();
        board.set(2, 0, Some(occ(PieceKind::S, 4)));
        let mut grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_grid(&mut grid);
        assert_eq!(grid[0][2], Some(occ(PieceKind::S, 4)));
        assert_eq!(grid[19][2], None);
    }
}
