//! Turn-based tile-placement word game engine: board and premium-square
//! model, word-formation resolver, placement validator, scoring, the round
//! state machine, and a tiered bot with an arena runner.

pub mod arena;
pub mod board;
pub mod bot;
pub mod bot_profiles;
pub mod dictionary;
pub mod error;
pub mod round;
pub mod scoring;
pub mod tiles;
pub mod types;
pub mod validate;
pub mod words;

pub use board::{Board, PremiumGrid};
pub use dictionary::Dictionary;
pub use error::{GameError, PlacementError};
pub use round::{Round, RoundConfig};
pub use types::{Player, Position, TilePlacement};
