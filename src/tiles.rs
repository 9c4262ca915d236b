//! Tiles and the standard 100-tile distribution.

use serde::{Deserialize, Serialize};

use crate::types::Letter;

pub type TileId = u32;

/// An immutable tile: identity, face letter, point value. The value defaults
/// from the letter but can be overridden at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: Letter,
    pub value: u32,
}

impl Tile {
    pub fn new(id: TileId, letter: Letter) -> Self {
        Self {
            id,
            letter,
            value: letter.point_value(),
        }
    }

    pub fn with_value(id: TileId, letter: Letter, value: u32) -> Self {
        Self { id, letter, value }
    }
}

/// Letter counts of the standard distribution (blank first).
#[rustfmt::skip]
const DISTRIBUTION: [(Letter, usize); 27] = [
    (Letter::Blank, 2),
    (Letter::A, 9), (Letter::B, 2), (Letter::C, 2), (Letter::D, 4),
    (Letter::E, 12), (Letter::F, 2), (Letter::G, 3), (Letter::H, 2),
    (Letter::I, 9), (Letter::J, 1), (Letter::K, 1), (Letter::L, 4),
    (Letter::M, 2), (Letter::N, 6), (Letter::O, 8), (Letter::P, 2),
    (Letter::Q, 1), (Letter::R, 6), (Letter::S, 4), (Letter::T, 6),
    (Letter::U, 4), (Letter::V, 2), (Letter::W, 2), (Letter::X, 1),
    (Letter::Y, 2), (Letter::Z, 1),
];

/// Build the standard tile set with sequential ids. Callers shuffle.
pub fn standard_distribution() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(100);
    let mut id: TileId = 0;
    for (letter, count) in DISTRIBUTION {
        for _ in 0..count {
            tiles.push(Tile::new(id, letter));
            id += 1;
        }
    }
    tiles
}
