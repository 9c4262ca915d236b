//! Word-formation resolver: which contiguous runs does a placement create?

use std::collections::{HashMap, HashSet};

use crate::board::Board;
use crate::error::PlacementError;
use crate::tiles::{Tile, TileId};
use crate::types::{Axis, Letter, Position, TilePlacement};

/// A formed word: tile placements in board order along one axis.
pub type FormedWord = Vec<TilePlacement>;

/// Resolve every distinct multi-tile run the proposed placements create or
/// extend. Proposed placements must target empty squares (the validator
/// guarantees this). Existing blanks carry their recorded assignment so the
/// resulting words spell correctly.
///
/// Runs are deduplicated by their exact position sequence: a word discovered
/// from two different anchor tiles collapses to one entry. Returns an empty
/// vec when nothing multi-tile forms (e.g. a lone opening tile).
pub fn formed_words(
    board: &Board,
    blank_assignments: &HashMap<TileId, Letter>,
    placements: &[TilePlacement],
) -> Vec<FormedWord> {
    let mut lookup: HashMap<Position, TilePlacement> = placements
        .iter()
        .map(|p| (p.position, *p))
        .collect();
    for pos in board.occupied_positions() {
        if let Some(tile) = board.get(pos) {
            lookup.entry(pos).or_insert(TilePlacement {
                tile,
                position: pos,
                blank_as: blank_assignments.get(&tile).copied(),
            });
        }
    }

    let mut words: Vec<FormedWord> = Vec::new();
    let mut seen: HashSet<Vec<Position>> = HashSet::new();

    for placement in placements {
        for axis in Axis::BOTH {
            let run = scan_run(&lookup, placement.position, axis);
            if run.len() < 2 {
                continue;
            }
            let key: Vec<Position> = run.iter().map(|p| p.position).collect();
            if seen.insert(key) {
                words.push(run);
            }
        }
    }

    words
}

/// Walk backward from `origin` along `axis` to the run start, then collect
/// forward until the first empty square.
fn scan_run(
    lookup: &HashMap<Position, TilePlacement>,
    origin: Position,
    axis: Axis,
) -> FormedWord {
    let mut start = origin;
    while lookup.contains_key(&start.offset(axis, -1)) {
        start = start.offset(axis, -1);
    }

    let mut run = Vec::new();
    let mut cursor = start;
    while let Some(placement) = lookup.get(&cursor) {
        run.push(*placement);
        cursor = cursor.offset(axis, 1);
    }
    run
}

/// Spell a formed word, substituting assigned letters for blanks.
pub fn word_text(
    word: &[TilePlacement],
    tiles: &HashMap<TileId, Tile>,
) -> Result<String, PlacementError> {
    let mut text = String::with_capacity(word.len());
    for placement in word {
        let tile = tiles
            .get(&placement.tile)
            .ok_or(PlacementError::UnknownTile(placement.tile))?;
        let letter = match (tile.letter.is_blank(), placement.blank_as) {
            (true, Some(assigned)) => assigned,
            _ => tile.letter,
        };
        text.push(letter.as_char());
    }
    Ok(text)
}
