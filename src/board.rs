//! Board grids: tile occupancy, premium squares, anchor enumeration.

use serde::{Deserialize, Serialize};

use crate::tiles::TileId;
use crate::types::{Position, SquareKind};

pub const STANDARD_SIZE: usize = 15;

/// Fixed-size grid of optional tile ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Option<TileId>>>,
}

impl Board {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![None; columns]; rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.rows
            && pos.column >= 0
            && (pos.column as usize) < self.columns
    }

    /// Tile at `pos`; `None` when empty or out of bounds.
    pub fn get(&self, pos: Position) -> Option<TileId> {
        if !self.contains(pos) {
            return None;
        }
        self.cells[pos.row as usize][pos.column as usize]
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    pub(crate) fn set(&mut self, pos: Position, tile: TileId) {
        debug_assert!(self.contains(pos));
        self.cells[pos.row as usize][pos.column as usize] = Some(tile);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(Option::is_none))
    }

    /// All occupied positions, row-major.
    pub fn occupied_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.map(|_| Position::new(r as i32, c as i32))
            })
        })
    }
}

/// Premium-multiplier grid, co-indexed with the board and fixed for the
/// round's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<SquareKind>>,
}

impl PremiumGrid {
    /// All-empty grid (used for non-standard dimensions).
    pub fn plain(rows: usize, columns: usize) -> Self {
        let mut grid = Self {
            rows,
            columns,
            cells: vec![vec![SquareKind::Empty; columns]; rows],
        };
        grid.cells[rows / 2][columns / 2] = SquareKind::Center;
        grid
    }

    /// The standard 15x15 premium layout.
    pub fn standard() -> Self {
        let mut grid = Self::plain(STANDARD_SIZE, STANDARD_SIZE);

        const TRIPLE_WORD: [(usize, usize); 8] = [
            (2, 2), (2, 12), (4, 4), (4, 10),
            (10, 4), (10, 10), (12, 2), (12, 12),
        ];
        const DOUBLE_WORD: [(usize, usize); 20] = [
            (0, 4), (0, 10), (1, 7), (3, 0), (3, 14),
            (4, 0), (4, 14), (6, 2), (6, 12), (7, 1),
            (7, 13), (8, 2), (8, 12), (10, 0), (10, 14),
            (11, 0), (11, 14), (13, 7), (14, 4), (14, 10),
        ];
        const TRIPLE_LETTER: [(usize, usize); 16] = [
            (1, 3), (1, 11), (3, 6), (3, 8),
            (5, 5), (5, 9), (6, 6), (6, 8),
            (8, 6), (8, 8), (9, 5), (9, 9),
            (11, 6), (11, 8), (13, 3), (13, 11),
        ];
        const DOUBLE_LETTER: [(usize, usize); 46] = [
            (0, 1), (0, 7), (0, 13), (1, 1), (1, 5), (1, 9), (1, 13),
            (2, 5), (2, 9), (3, 2), (3, 4), (3, 10), (3, 12),
            (4, 2), (4, 6), (4, 8), (4, 12), (5, 1), (5, 7), (5, 13),
            (6, 4), (6, 10), (7, 5), (7, 9), (8, 4), (8, 10),
            (9, 1), (9, 7), (9, 13), (10, 2), (10, 6), (10, 8), (10, 12),
            (11, 2), (11, 4), (11, 10), (11, 12), (12, 5), (12, 9),
            (13, 1), (13, 5), (13, 9), (13, 13), (14, 1), (14, 7), (14, 13),
        ];

        for (r, c) in TRIPLE_WORD {
            grid.cells[r][c] = SquareKind::TripleWord;
        }
        for (r, c) in DOUBLE_WORD {
            grid.cells[r][c] = SquareKind::DoubleWord;
        }
        for (r, c) in TRIPLE_LETTER {
            grid.cells[r][c] = SquareKind::TripleLetter;
        }
        for (r, c) in DOUBLE_LETTER {
            grid.cells[r][c] = SquareKind::DoubleLetter;
        }
        grid.cells[7][7] = SquareKind::Center;

        grid
    }

    /// Kind at `pos`; out-of-bounds reads as `Empty`.
    pub fn kind(&self, pos: Position) -> SquareKind {
        if pos.row < 0
            || (pos.row as usize) >= self.rows
            || pos.column < 0
            || (pos.column as usize) >= self.columns
        {
            return SquareKind::Empty;
        }
        self.cells[pos.row as usize][pos.column as usize]
    }

    pub fn center(&self) -> Position {
        Position::new((self.rows / 2) as i32, (self.columns / 2) as i32)
    }
}

/// Anchor positions for move generation: every empty in-bounds square
/// 4-adjacent to an occupied one, or just the center square while the board
/// is still empty. Sorted for deterministic iteration.
pub fn anchor_positions(board: &Board, center: Position) -> Vec<Position> {
    if board.is_empty() {
        return vec![center];
    }

    let mut anchors: Vec<Position> = board
        .occupied_positions()
        .flat_map(Position::neighbors)
        .filter(|&pos| board.contains(pos) && !board.is_occupied(pos))
        .collect();
    anchors.sort_unstable();
    anchors.dedup();
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_anchors_at_center() {
        let board = Board::new(15, 15);
        let anchors = anchor_positions(&board, Position::new(7, 7));
        assert_eq!(anchors, vec![Position::new(7, 7)]);
    }

    #[test]
    fn anchors_surround_a_lone_tile() {
        let mut board = Board::new(15, 15);
        board.set(Position::new(7, 7), 0);
        let anchors = anchor_positions(&board, Position::new(7, 7));
        assert_eq!(anchors.len(), 4);
        assert!(anchors.contains(&Position::new(6, 7)));
        assert!(anchors.contains(&Position::new(8, 7)));
        assert!(anchors.contains(&Position::new(7, 6)));
        assert!(anchors.contains(&Position::new(7, 8)));
    }

    #[test]
    fn anchors_stay_in_bounds_and_off_tiles() {
        let mut board = Board::new(15, 15);
        board.set(Position::new(0, 0), 0);
        board.set(Position::new(0, 1), 1);
        let anchors = anchor_positions(&board, Position::new(7, 7));
        assert!(anchors.iter().all(|&p| board.contains(p)));
        assert!(!anchors.contains(&Position::new(0, 0)));
        assert!(!anchors.contains(&Position::new(0, 1)));
        assert!(anchors.contains(&Position::new(1, 0)));
        assert!(anchors.contains(&Position::new(0, 2)));
    }

    #[test]
    fn standard_grid_layout() {
        let grid = PremiumGrid::standard();
        assert_eq!(grid.center(), Position::new(7, 7));
        assert_eq!(grid.kind(Position::new(7, 7)), SquareKind::Center);
        assert_eq!(grid.kind(Position::new(2, 2)), SquareKind::TripleWord);
        assert_eq!(grid.kind(Position::new(1, 7)), SquareKind::DoubleWord);
        assert_eq!(grid.kind(Position::new(5, 5)), SquareKind::TripleLetter);
        assert_eq!(grid.kind(Position::new(0, 1)), SquareKind::DoubleLetter);
        assert_eq!(grid.kind(Position::new(-1, 0)), SquareKind::Empty);
    }

    #[test]
    fn board_bounds() {
        let mut board = Board::new(15, 15);
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!board.contains(Position::new(15, 0)));
        assert!(board.contains(Position::new(14, 14)));

        board.set(Position::new(3, 4), 9);
        assert_eq!(board.get(Position::new(3, 4)), Some(9));
        assert_eq!(board.get(Position::new(3, 5)), None);
        assert_eq!(board.get(Position::new(-2, 5)), None);
        assert!(!board.is_empty());
    }
}
