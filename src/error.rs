//! Typed failures. Every rejected action surfaces one of these; rejected
//! actions never mutate state.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tiles::TileId;
use crate::types::Position;

/// Structural failures of a proposed tile placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementError {
    /// The placement set was empty.
    NoPlacements,
    /// A referenced tile is not in the acting player's rack.
    TileNotInRack(TileId),
    /// A referenced tile id is not in the round's tile registry.
    UnknownTile(TileId),
    /// The same tile appears more than once in the placement set.
    DuplicateTile(TileId),
    /// A blank tile was placed without a letter assignment.
    BlankRequiresLetter(TileId),
    /// A lettered tile carried a blank-letter assignment.
    UnexpectedBlankLetter(TileId),
    OutOfBounds(Position),
    PositionOccupied(Position),
    /// Placements do not share a single row or column.
    NotInLine,
    /// A gap along the placement axis is neither a new tile nor an
    /// existing one.
    NotContiguous,
    FirstWordMustCoverCenter,
    /// The move touches no existing tile on a non-empty board.
    DisconnectedFromBoard,
    /// No multi-tile word is formed by the placement.
    NoWordFormed,
    WordNotInDictionary(String),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPlacements => write!(f, "no tile placements supplied"),
            Self::TileNotInRack(id) => write!(f, "tile {id} is not in the acting player's rack"),
            Self::UnknownTile(id) => write!(f, "tile {id} does not exist in this round"),
            Self::DuplicateTile(id) => write!(f, "tile {id} appears more than once"),
            Self::BlankRequiresLetter(id) => {
                write!(f, "blank tile {id} requires a letter assignment")
            }
            Self::UnexpectedBlankLetter(id) => {
                write!(f, "non-blank tile {id} cannot carry a letter assignment")
            }
            Self::OutOfBounds(p) => write!(f, "position ({}, {}) is off the board", p.row, p.column),
            Self::PositionOccupied(p) => {
                write!(f, "position ({}, {}) is already occupied", p.row, p.column)
            }
            Self::NotInLine => write!(f, "tiles must share a single row or column"),
            Self::NotContiguous => write!(f, "tiles must be contiguous along the placement axis"),
            Self::FirstWordMustCoverCenter => {
                write!(f, "the first word must cover the center square")
            }
            Self::DisconnectedFromBoard => {
                write!(f, "placement does not connect to any existing tile")
            }
            Self::NoWordFormed => write!(f, "placement forms no word"),
            Self::WordNotInDictionary(word) => write!(f, "{word:?} is not in the dictionary"),
        }
    }
}

impl Error for PlacementError {}

/// Session, turn-sequencing, and resource failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameError {
    NotEnoughPlayers,
    TooManyPlayers,
    /// The bag could not supply the initial 7-tile deal.
    BagExhaustedDuringDeal,
    PlayerNotFound(String),
    NotPlayersTurn(String),
    /// Any action attempted after the round reached `Complete`.
    GameComplete,
    CannotPassOnFirstTurn,
    /// The bag holds fewer tiles than the exchange requests.
    InsufficientTilesForExchange,
    Placement(PlacementError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotEnoughPlayers => write!(f, "a round requires at least 2 players"),
            Self::TooManyPlayers => write!(f, "a round allows at most 4 players"),
            Self::BagExhaustedDuringDeal => {
                write!(f, "not enough tiles in the bag for the initial deal")
            }
            Self::PlayerNotFound(id) => write!(f, "player {id:?} is not in this round"),
            Self::NotPlayersTurn(id) => write!(f, "it is not player {id:?}'s turn"),
            Self::GameComplete => write!(f, "the game is complete"),
            Self::CannotPassOnFirstTurn => {
                write!(f, "cannot pass before the opening word is placed")
            }
            Self::InsufficientTilesForExchange => {
                write!(f, "the bag holds too few tiles for that exchange")
            }
            Self::Placement(e) => write!(f, "invalid placement: {e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlacementError> for GameError {
    fn from(e: PlacementError) -> Self {
        GameError::Placement(e)
    }
}
