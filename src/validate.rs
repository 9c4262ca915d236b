//! Placement validation: structural legality plus dictionary legality,
//! performed as a single read-only pre-mutation check.

use std::collections::{HashMap, HashSet};

use crate::board::Board;
use crate::dictionary::Dictionary;
use crate::error::PlacementError;
use crate::tiles::{Tile, TileId};
use crate::types::{Letter, Position, TilePlacement};
use crate::words::{formed_words, word_text, FormedWord};

/// Run the full legality check on a proposed placement set, in a fixed
/// order, each failure a distinct reason:
///
/// 1. non-empty set;
/// 2. rack ownership (and no tile placed twice);
/// 3. blank-letter contract;
/// 4. in-bounds, unoccupied, no duplicate positions;
/// 5. colinearity (more than one placement shares a row or a column);
/// 6. contiguity along the placement axis, bridging existing tiles;
/// 7. center square on an empty board, else adjacency to an existing tile;
/// 8. at least one multi-tile word forms;
/// 9. every formed word is in the dictionary.
///
/// Purely read-only: a failure at any step leaves all state untouched.
/// On success, returns the resolved words for scoring and commit.
#[allow(clippy::too_many_arguments)]
pub fn validate_placement(
    board: &Board,
    tiles: &HashMap<TileId, Tile>,
    blank_assignments: &HashMap<TileId, Letter>,
    center: Position,
    rack: &[TileId],
    placements: &[TilePlacement],
    dict: &Dictionary,
) -> Result<Vec<FormedWord>, PlacementError> {
    if placements.is_empty() {
        return Err(PlacementError::NoPlacements);
    }

    let owned: HashSet<TileId> = rack.iter().copied().collect();
    let mut used: HashSet<TileId> = HashSet::with_capacity(placements.len());
    for p in placements {
        if !owned.contains(&p.tile) {
            return Err(PlacementError::TileNotInRack(p.tile));
        }
        if !used.insert(p.tile) {
            return Err(PlacementError::DuplicateTile(p.tile));
        }
    }

    for p in placements {
        let tile = tiles.get(&p.tile).ok_or(PlacementError::UnknownTile(p.tile))?;
        if tile.letter.is_blank() {
            match p.blank_as {
                Some(assigned) if !assigned.is_blank() => {}
                _ => return Err(PlacementError::BlankRequiresLetter(p.tile)),
            }
        } else if p.blank_as.is_some() {
            return Err(PlacementError::UnexpectedBlankLetter(p.tile));
        }
    }

    let mut positions: HashSet<Position> = HashSet::with_capacity(placements.len());
    for p in placements {
        if !board.contains(p.position) {
            return Err(PlacementError::OutOfBounds(p.position));
        }
        if board.is_occupied(p.position) || !positions.insert(p.position) {
            return Err(PlacementError::PositionOccupied(p.position));
        }
    }

    if placements.len() > 1 {
        check_line_and_contiguity(board, placements, &positions)?;
    }

    if board.is_empty() {
        if !positions.contains(&center) {
            return Err(PlacementError::FirstWordMustCoverCenter);
        }
    } else if !connects_to_board(board, placements) {
        return Err(PlacementError::DisconnectedFromBoard);
    }

    let words = formed_words(board, blank_assignments, placements);
    if words.is_empty() {
        return Err(PlacementError::NoWordFormed);
    }

    for word in &words {
        let text = word_text(word, tiles)?;
        if text.chars().count() <= 1 {
            return Err(PlacementError::NoWordFormed);
        }
        if !dict.is_valid(&text) {
            return Err(PlacementError::WordNotInDictionary(text));
        }
    }

    Ok(words)
}

fn check_line_and_contiguity(
    board: &Board,
    placements: &[TilePlacement],
    new_positions: &HashSet<Position>,
) -> Result<(), PlacementError> {
    let first = placements[0].position;
    let horizontal = placements.iter().all(|p| p.position.row == first.row);
    let vertical = placements.iter().all(|p| p.position.column == first.column);
    if !horizontal && !vertical {
        return Err(PlacementError::NotInLine);
    }

    // Every cell strictly between the extremes must be a new tile or an
    // existing one; bridging is allowed, gaps are not.
    let coord = |pos: Position| if horizontal { pos.column } else { pos.row };
    let min = placements.iter().map(|p| coord(p.position)).min().unwrap_or(0);
    let max = placements.iter().map(|p| coord(p.position)).max().unwrap_or(0);

    for c in min..=max {
        let pos = if horizontal {
            Position::new(first.row, c)
        } else {
            Position::new(c, first.column)
        };
        if !new_positions.contains(&pos) && !board.is_occupied(pos) {
            return Err(PlacementError::NotContiguous);
        }
    }
    Ok(())
}

fn connects_to_board(board: &Board, placements: &[TilePlacement]) -> bool {
    placements.iter().any(|p| {
        p.position
            .neighbors()
            .iter()
            .any(|&n| board.is_occupied(n))
    })
}
