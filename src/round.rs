//! The round aggregate and its turn state machine.
//!
//! A `Round` is exclusively owned by the game session; every mutation goes
//! through `place_word`, `pass`, or `exchange`, each of which validates
//! first and applies atomically. A rejected action leaves the round
//! bit-for-bit unchanged.

use std::collections::HashMap;
use std::time::SystemTime;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, PremiumGrid, STANDARD_SIZE};
use crate::dictionary::Dictionary;
use crate::error::{GameError, PlacementError};
use crate::scoring::score_move;
use crate::tiles::{standard_distribution, Tile, TileId};
use crate::types::{
    ActionKind, Letter, LogEntry, Player, PlayerId, Position, RoundState, TilePlacement,
};
use crate::validate::validate_placement;
use crate::words::FormedWord;

pub const RACK_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Round creation options. `tiles` overrides the standard shuffled
/// distribution with a fixed, unshuffled tile order (deterministic tests).
#[derive(Debug, Clone, Default)]
pub struct RoundConfig {
    pub id: Option<String>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub tiles: Option<Vec<Tile>>,
}

/// A player's seat: identity plus the tile ids currently held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    pub player: Player,
    pub tiles: Vec<TileId>,
}

/// A validated, scored placement that has not been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPreview {
    pub words: Vec<FormedWord>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    id: String,
    rows: usize,
    columns: usize,
    state: RoundState,
    tiles: HashMap<TileId, Tile>,
    bag: Vec<TileId>,
    racks: Vec<Rack>,
    board: Board,
    premiums: PremiumGrid,
    blank_assignments: HashMap<TileId, Letter>,
    consecutive_passes: usize,
    log: Vec<LogEntry>,
    started: SystemTime,
    ended: Option<SystemTime>,
}

impl Round {
    /// Create a round for 2-4 players: shuffle the tile set with the given
    /// rng, deal 7 tiles per player in seat order, and wait on the first
    /// seat. Fails typed on a bad player count or a bag too small to deal.
    pub fn new<R: Rng>(
        players: Vec<Player>,
        config: RoundConfig,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        if players.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }

        let rows = config.rows.unwrap_or(STANDARD_SIZE);
        let columns = config.columns.unwrap_or(STANDARD_SIZE);

        let all_tiles = match config.tiles {
            Some(cooked) => cooked,
            None => {
                let mut tiles = standard_distribution();
                tiles.shuffle(rng);
                tiles
            }
        };
        let tiles: HashMap<TileId, Tile> = all_tiles.iter().map(|t| (t.id, *t)).collect();
        let mut bag: Vec<TileId> = all_tiles.iter().map(|t| t.id).collect();

        let mut racks = Vec::with_capacity(players.len());
        for player in players {
            if bag.len() < RACK_SIZE {
                return Err(GameError::BagExhaustedDuringDeal);
            }
            let dealt: Vec<TileId> = bag.drain(..RACK_SIZE).collect();
            racks.push(Rack {
                player,
                tiles: dealt,
            });
        }

        let premiums = if rows == STANDARD_SIZE && columns == STANDARD_SIZE {
            PremiumGrid::standard()
        } else {
            PremiumGrid::plain(rows, columns)
        };

        let started = SystemTime::now();
        let id = config.id.unwrap_or_else(|| {
            let nanos = started
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0);
            format!("round-{nanos}")
        });
        let first = racks[0].player.id.clone();

        tracing::info!(round = %id, players = racks.len(), bag = bag.len(), "round created");

        Ok(Self {
            id,
            rows,
            columns,
            state: RoundState::WaitingForPlayer(first),
            tiles,
            bag,
            racks,
            board: Board::new(rows, columns),
            premiums,
            blank_assignments: HashMap::new(),
            consecutive_passes: 0,
            log: Vec::new(),
            started,
            ended: None,
        })
    }

    // === Actions ===

    /// Validate and commit a word placement, returning the move score.
    /// On any failure the round is left exactly as it was.
    pub fn place_word(
        &mut self,
        player_id: &str,
        placements: &[TilePlacement],
        dict: &Dictionary,
    ) -> Result<u32, GameError> {
        let (current, idx) = self.require_turn(player_id)?;
        let preview = self.preview_placement_for(idx, placements, dict)?;

        // All checks passed; mutate.
        for p in placements {
            self.board.set(p.position, p.tile);
            if let Some(letter) = p.blank_as {
                self.blank_assignments.insert(p.tile, letter);
            }
            if let Some(i) = self.racks[idx].tiles.iter().position(|&t| t == p.tile) {
                self.racks[idx].tiles.remove(i);
            }
        }
        self.racks[idx].player.score += i64::from(preview.score);
        self.draw_tiles(idx, placements.len());
        self.consecutive_passes = 0;
        self.log.push(LogEntry {
            player: current.clone(),
            action: ActionKind::PlaceWord {
                placements: placements.to_vec(),
                score: preview.score,
            },
            timestamp: SystemTime::now(),
        });
        tracing::debug!(
            round = %self.id,
            player = %current,
            score = preview.score,
            words = preview.words.len(),
            "word placed"
        );

        self.check_game_end();
        self.advance_turn();
        Ok(preview.score)
    }

    /// Validate and score a placement without committing it. Used by the
    /// acting player for previews; the AI generator runs the same check
    /// against arbitrary racks via `validate::validate_placement`.
    pub fn preview_placement(
        &self,
        player_id: &str,
        placements: &[TilePlacement],
        dict: &Dictionary,
    ) -> Result<PlacementPreview, GameError> {
        let (_, idx) = self.require_turn(player_id)?;
        self.preview_placement_for(idx, placements, dict)
    }

    fn preview_placement_for(
        &self,
        rack_index: usize,
        placements: &[TilePlacement],
        dict: &Dictionary,
    ) -> Result<PlacementPreview, GameError> {
        let words = validate_placement(
            &self.board,
            &self.tiles,
            &self.blank_assignments,
            self.center(),
            &self.racks[rack_index].tiles,
            placements,
            dict,
        )?;
        let score = score_move(&words, &self.tiles, &self.premiums, placements.len());
        Ok(PlacementPreview { words, score })
    }

    /// Forfeit the turn. Forbidden before the opening word; ends the game
    /// once every seat has passed in a row.
    pub fn pass(&mut self, player_id: &str) -> Result<(), GameError> {
        let (current, _) = self.require_turn(player_id)?;
        if self.board.is_empty() {
            return Err(GameError::CannotPassOnFirstTurn);
        }

        self.consecutive_passes += 1;
        self.log.push(LogEntry {
            player: current.clone(),
            action: ActionKind::Pass,
            timestamp: SystemTime::now(),
        });
        tracing::debug!(round = %self.id, player = %current, passes = self.consecutive_passes, "pass");

        if self.consecutive_passes >= self.racks.len() {
            self.end_game();
        } else {
            self.advance_turn();
        }
        Ok(())
    }

    /// Swap rack tiles for fresh ones. The bag must hold at least as many
    /// tiles as requested.
    pub fn exchange<R: Rng>(
        &mut self,
        player_id: &str,
        tile_ids: &[TileId],
        rng: &mut R,
    ) -> Result<(), GameError> {
        let (current, idx) = self.require_turn(player_id)?;

        for &id in tile_ids {
            if !self.racks[idx].tiles.contains(&id) {
                return Err(PlacementError::TileNotInRack(id).into());
            }
        }
        if self.bag.len() < tile_ids.len() {
            return Err(GameError::InsufficientTilesForExchange);
        }

        for &id in tile_ids {
            if let Some(i) = self.racks[idx].tiles.iter().position(|&t| t == id) {
                self.racks[idx].tiles.remove(i);
                self.bag.push(id);
            }
        }
        self.bag.shuffle(rng);
        self.draw_tiles(idx, tile_ids.len());
        self.consecutive_passes = 0;
        self.log.push(LogEntry {
            player: current.clone(),
            action: ActionKind::Exchange {
                tiles: tile_ids.to_vec(),
            },
            timestamp: SystemTime::now(),
        });
        tracing::debug!(round = %self.id, player = %current, count = tile_ids.len(), "exchange");

        self.advance_turn();
        Ok(())
    }

    // === Accessors ===

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn winner(&self) -> Option<&Player> {
        match &self.state {
            RoundState::Complete { winner } => self.player(winner),
            RoundState::WaitingForPlayer(_) => None,
        }
    }

    pub fn current_player(&self) -> Option<&Player> {
        match &self.state {
            RoundState::WaitingForPlayer(id) => self.player(id),
            RoundState::Complete { .. } => None,
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.racks
            .iter()
            .find(|r| r.player.id == player_id)
            .map(|r| &r.player)
    }

    pub fn rack(&self, player_id: &str) -> Option<&[TileId]> {
        self.racks
            .iter()
            .find(|r| r.player.id == player_id)
            .map(|r| r.tiles.as_slice())
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.racks.iter().map(|r| &r.player)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.board.get(pos).and_then(|id| self.tiles.get(&id))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn premiums(&self) -> &PremiumGrid {
        &self.premiums
    }

    pub fn center(&self) -> Position {
        self.premiums.center()
    }

    pub fn blank_assignment(&self, tile: TileId) -> Option<Letter> {
        self.blank_assignments.get(&tile).copied()
    }

    pub fn tiles_remaining_in_bag(&self) -> usize {
        self.bag.len()
    }

    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn started(&self) -> SystemTime {
        self.started
    }

    pub fn ended(&self) -> Option<SystemTime> {
        self.ended
    }

    pub(crate) fn tile_registry(&self) -> &HashMap<TileId, Tile> {
        &self.tiles
    }

    pub(crate) fn blank_assignments(&self) -> &HashMap<TileId, Letter> {
        &self.blank_assignments
    }

    // === Internals ===

    /// Check the round is waiting on `player_id`; returns the id and its
    /// seat index.
    fn require_turn(&self, player_id: &str) -> Result<(PlayerId, usize), GameError> {
        let current = match &self.state {
            RoundState::Complete { .. } => return Err(GameError::GameComplete),
            RoundState::WaitingForPlayer(id) => id.clone(),
        };
        if current != player_id {
            return Err(GameError::NotPlayersTurn(player_id.to_string()));
        }
        let idx = self
            .racks
            .iter()
            .position(|r| r.player.id == current)
            .ok_or_else(|| GameError::PlayerNotFound(current.clone()))?;
        Ok((current, idx))
    }

    /// Refill a rack from the front of the bag, drawing fewer when the bag
    /// runs short.
    fn draw_tiles(&mut self, rack_index: usize, count: usize) {
        let take = count.min(self.bag.len());
        if take == 0 {
            return;
        }
        let drawn: Vec<TileId> = self.bag.drain(..take).collect();
        self.racks[rack_index].tiles.extend(drawn);
    }

    fn advance_turn(&mut self) {
        let RoundState::WaitingForPlayer(current) = &self.state else {
            return;
        };
        let Some(idx) = self.racks.iter().position(|r| &r.player.id == current) else {
            return;
        };
        let next = (idx + 1) % self.racks.len();
        self.state = RoundState::WaitingForPlayer(self.racks[next].player.id.clone());
    }

    fn check_game_end(&mut self) {
        if self.racks.iter().any(|r| r.tiles.is_empty()) {
            self.end_game();
            return;
        }
        if self.bag.is_empty() && self.consecutive_passes >= self.racks.len() {
            self.end_game();
        }
    }

    /// Subtract every player's remaining rack value from their score, pick
    /// the winner (ties break to the lowest seat index), and seal the round.
    fn end_game(&mut self) {
        for rack in &mut self.racks {
            let penalty: i64 = rack
                .tiles
                .iter()
                .filter_map(|id| self.tiles.get(id))
                .map(|t| if t.letter.is_blank() { 0 } else { i64::from(t.value) })
                .sum();
            rack.player.score -= penalty;
        }

        let mut winner = &self.racks[0].player;
        for rack in &self.racks[1..] {
            if rack.player.score > winner.score {
                winner = &rack.player;
            }
        }
        tracing::info!(round = %self.id, winner = %winner.id, score = winner.score, "game complete");
        self.state = RoundState::Complete {
            winner: winner.id.clone(),
        };
        self.ended = Some(SystemTime::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{i}"), format!("Player {i}")))
            .collect()
    }

    fn new_round(n: usize) -> Round {
        let mut rng = StdRng::seed_from_u64(7);
        Round::new(players(n), RoundConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn creation_deals_seven_tiles_per_player() {
        for n in 2..=4 {
            let round = new_round(n);
            for i in 0..n {
                assert_eq!(round.rack(&format!("p{i}")).unwrap().len(), RACK_SIZE);
            }
            assert_eq!(round.tiles_remaining_in_bag(), 100 - n * RACK_SIZE);
            assert_eq!(
                round.state(),
                &RoundState::WaitingForPlayer("p0".to_string())
            );
        }
    }

    #[test]
    fn creation_rejects_bad_player_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            Round::new(players(1), RoundConfig::default(), &mut rng).unwrap_err(),
            GameError::NotEnoughPlayers
        );
        assert_eq!(
            Round::new(players(5), RoundConfig::default(), &mut rng).unwrap_err(),
            GameError::TooManyPlayers
        );
    }

    #[test]
    fn creation_rejects_bag_too_small_for_deal() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = RoundConfig {
            tiles: Some(
                (0..10)
                    .map(|i| Tile::new(i, Letter::A))
                    .collect(),
            ),
            ..Default::default()
        };
        assert_eq!(
            Round::new(players(2), config, &mut rng).unwrap_err(),
            GameError::BagExhaustedDuringDeal
        );
    }

    #[test]
    fn actions_reject_wrong_player() {
        let mut round = new_round(2);
        assert_eq!(
            round.pass("p1").unwrap_err(),
            GameError::NotPlayersTurn("p1".to_string())
        );
        assert_eq!(
            round.pass("ghost").unwrap_err(),
            GameError::NotPlayersTurn("ghost".to_string())
        );
    }

    #[test]
    fn pass_forbidden_on_empty_board() {
        let mut round = new_round(2);
        assert_eq!(round.pass("p0").unwrap_err(), GameError::CannotPassOnFirstTurn);
        assert_eq!(round.consecutive_passes(), 0);
        assert!(round.log().is_empty());
    }

    #[test]
    fn exchange_requires_bag_to_cover_request() {
        let mut round = new_round(2);
        let mut rng = StdRng::seed_from_u64(9);
        let rack: Vec<TileId> = round.rack("p0").unwrap().to_vec();

        // Drain the bag below the request size with a tiny cooked round.
        let mut tiles: Vec<Tile> = (0..15).map(|i| Tile::new(i, Letter::A)).collect();
        tiles.push(Tile::new(15, Letter::B));
        let config = RoundConfig {
            tiles: Some(tiles),
            ..Default::default()
        };
        let mut small = Round::new(players(2), config, &mut rng).unwrap();
        let small_rack: Vec<TileId> = small.rack("p0").unwrap().to_vec();
        assert_eq!(small.tiles_remaining_in_bag(), 2);
        assert_eq!(
            small.exchange("p0", &small_rack[..3], &mut rng).unwrap_err(),
            GameError::InsufficientTilesForExchange
        );

        // A covered request succeeds and keeps the rack size.
        round.exchange("p0", &rack[..3], &mut rng).unwrap();
        assert_eq!(round.rack("p0").unwrap().len(), RACK_SIZE);
        assert_eq!(round.tiles_remaining_in_bag(), 100 - 2 * RACK_SIZE);
        assert_eq!(round.current_player().unwrap().id, "p1");
    }

    #[test]
    fn exchange_rejects_unowned_tiles() {
        let mut round = new_round(2);
        let mut rng = StdRng::seed_from_u64(9);
        let foreign: Vec<TileId> = round.rack("p1").unwrap()[..1].to_vec();
        assert!(matches!(
            round.exchange("p0", &foreign, &mut rng).unwrap_err(),
            GameError::Placement(PlacementError::TileNotInRack(_))
        ));
    }
}
