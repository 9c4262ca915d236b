//! Scoring: letter/word multiplier arithmetic and the all-tiles bonus.

use std::collections::HashMap;

use crate::board::PremiumGrid;
use crate::tiles::{Tile, TileId};
use crate::types::TilePlacement;
use crate::words::FormedWord;

/// Flat bonus for playing all 7 rack tiles in one move.
pub const BINGO_BONUS: u32 = 50;
pub const BINGO_TILE_COUNT: usize = 7;

/// Score one committed-or-previewed move from its resolved words.
///
/// Per word: sum of `letter_value x letter_multiplier` over every covered
/// square, multiplied by the product of the squares' word multipliers.
/// Multipliers key off the square's static kind — premium squares are never
/// consumed by earlier turns. Blanks score zero whatever letter they stand
/// for. `placed_count` is the number of newly placed tiles, for the bingo
/// bonus.
pub fn score_move(
    words: &[FormedWord],
    tiles: &HashMap<TileId, Tile>,
    premiums: &PremiumGrid,
    placed_count: usize,
) -> u32 {
    let mut total: u32 = words.iter().map(|w| score_word(w, tiles, premiums)).sum();
    if placed_count == BINGO_TILE_COUNT {
        total += BINGO_BONUS;
    }
    total
}

fn score_word(word: &[TilePlacement], tiles: &HashMap<TileId, Tile>, premiums: &PremiumGrid) -> u32 {
    let mut word_score: u32 = 0;
    let mut word_multiplier: u32 = 1;

    for placement in word {
        let multiplier = premiums.kind(placement.position).multiplier();
        let letter_value = tiles
            .get(&placement.tile)
            .map(|tile| if tile.letter.is_blank() { 0 } else { tile.value })
            .unwrap_or(0);
        word_score += letter_value * multiplier.letter;
        word_multiplier *= multiplier.word;
    }

    word_score * word_multiplier
}
