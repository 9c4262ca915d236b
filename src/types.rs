//! Core value types shared across the engine.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::tiles::TileId;

pub type PlayerId = String;

/// A board coordinate. Signed so neighbor arithmetic never wraps; the board
/// itself rejects out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The four orthogonal neighbors (the adjacency used for connectivity
    /// checks and anchor enumeration).
    pub fn neighbors(self) -> [Self; 4] {
        [
            Self::new(self.row - 1, self.column),
            Self::new(self.row + 1, self.column),
            Self::new(self.row, self.column - 1),
            Self::new(self.row, self.column + 1),
        ]
    }

    pub fn offset(self, axis: Axis, delta: i32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(self.row, self.column + delta),
            Axis::Vertical => Self::new(self.row + delta, self.column),
        }
    }
}

/// Scan/placement axis for word formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// A tile face: one of the 26 letters or the blank wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum Letter {
    Blank,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
}

impl Letter {
    /// The 26 real letters, in order (excludes `Blank`).
    #[rustfmt::skip]
    pub const ALPHABET: [Letter; 26] = [
        Letter::A, Letter::B, Letter::C, Letter::D, Letter::E, Letter::F,
        Letter::G, Letter::H, Letter::I, Letter::J, Letter::K, Letter::L,
        Letter::M, Letter::N, Letter::O, Letter::P, Letter::Q, Letter::R,
        Letter::S, Letter::T, Letter::U, Letter::V, Letter::W, Letter::X,
        Letter::Y, Letter::Z,
    ];

    pub fn is_blank(self) -> bool {
        self == Letter::Blank
    }

    /// Standard point value of this letter; blanks are worth nothing.
    pub fn point_value(self) -> u32 {
        use Letter::*;
        match self {
            Blank => 0,
            A | E | I | O | U | L | N | S | T | R => 1,
            D | G => 2,
            B | C | M | P => 3,
            F | H | V | W | Y => 4,
            K => 5,
            J | X => 8,
            Q | Z => 10,
        }
    }

    /// Uppercase character form; the blank renders as a space.
    pub fn as_char(self) -> char {
        if self == Letter::Blank {
            ' '
        } else {
            // Blank is discriminant 0, A..Z follow in order.
            (b'A' + (self as u8 - 1)) as char
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            ' ' => Some(Letter::Blank),
            u @ 'A'..='Z' => Some(Self::ALPHABET[(u as u8 - b'A') as usize]),
            _ => None,
        }
    }
}

/// Static kind of a board square. The multiplier is a pure function of the
/// kind; squares are never "consumed" by earlier turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquareKind {
    Empty,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointMultiplier {
    pub letter: u32,
    pub word: u32,
}

impl SquareKind {
    pub fn multiplier(self) -> PointMultiplier {
        match self {
            SquareKind::Empty | SquareKind::Center => PointMultiplier { letter: 1, word: 1 },
            SquareKind::DoubleLetter => PointMultiplier { letter: 2, word: 1 },
            SquareKind::TripleLetter => PointMultiplier { letter: 3, word: 1 },
            SquareKind::DoubleWord => PointMultiplier { letter: 1, word: 2 },
            SquareKind::TripleWord => PointMultiplier { letter: 1, word: 3 },
        }
    }

    /// True for any square with a non-default multiplier.
    pub fn is_premium(self) -> bool {
        let m = self.multiplier();
        m.letter > 1 || m.word > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub score: i64,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            score: 0,
        }
    }
}

/// One proposed tile placement. `blank_as` is mandatory iff the tile is a
/// blank (and must name a real letter); lettered tiles must leave it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilePlacement {
    pub tile: TileId,
    pub position: Position,
    #[serde(default)]
    pub blank_as: Option<Letter>,
}

impl TilePlacement {
    pub fn new(tile: TileId, position: Position) -> Self {
        Self {
            tile,
            position,
            blank_as: None,
        }
    }

    pub fn blank(tile: TileId, position: Position, as_letter: Letter) -> Self {
        Self {
            tile,
            position,
            blank_as: Some(as_letter),
        }
    }
}

/// Round progression: waiting on a specific player, or finished for good.
/// `Complete` is terminal — no action ever reverts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    WaitingForPlayer(PlayerId),
    Complete { winner: PlayerId },
}

impl RoundState {
    pub fn is_complete(&self) -> bool {
        matches!(self, RoundState::Complete { .. })
    }
}

/// A committed action. Rejected attempts are never logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    PlaceWord {
        placements: Vec<TilePlacement>,
        score: u32,
    },
    Pass,
    Exchange {
        tiles: Vec<TileId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub player: PlayerId,
    pub action: ActionKind,
    pub timestamp: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_char_roundtrip() {
        for letter in Letter::ALPHABET {
            assert_eq!(Letter::from_char(letter.as_char()), Some(letter));
        }
        assert_eq!(Letter::from_char(' '), Some(Letter::Blank));
        assert_eq!(Letter::from_char('q'), Some(Letter::Q));
        assert_eq!(Letter::from_char('3'), None);
    }

    #[test]
    fn letter_point_values() {
        assert_eq!(Letter::Blank.point_value(), 0);
        assert_eq!(Letter::E.point_value(), 1);
        assert_eq!(Letter::D.point_value(), 2);
        assert_eq!(Letter::C.point_value(), 3);
        assert_eq!(Letter::H.point_value(), 4);
        assert_eq!(Letter::K.point_value(), 5);
        assert_eq!(Letter::X.point_value(), 8);
        assert_eq!(Letter::Z.point_value(), 10);
    }

    #[test]
    fn position_neighbors() {
        let pos = Position::new(3, 3);
        let n = pos.neighbors();
        assert!(n.contains(&Position::new(2, 3)));
        assert!(n.contains(&Position::new(4, 3)));
        assert!(n.contains(&Position::new(3, 2)));
        assert!(n.contains(&Position::new(3, 4)));
    }

    #[test]
    fn square_multipliers() {
        assert_eq!(
            SquareKind::TripleWord.multiplier(),
            PointMultiplier { letter: 1, word: 3 }
        );
        assert_eq!(
            SquareKind::DoubleLetter.multiplier(),
            PointMultiplier { letter: 2, word: 1 }
        );
        assert!(!SquareKind::Center.is_premium());
        assert!(SquareKind::DoubleWord.is_premium());
    }
}
