//! Session state management.
//!
//! One session is a room's complete live game: board, bag, roster, turn
//! cursor, lifecycle flags. Every mutating operation validates before it
//! commits, so a rejected request leaves the session untouched.
//!
//! # State machine
//!
//! ```text
//! ┌────────┐  start (host, 2+ players)  ┌────────┐
//! │ Lobby  │───────────────────────────▶│ Active │──┐ move / pass /
//! │        │                            │        │◀─┘ exchange / removal
//! └───┬────┘                            └───┬────┘
//!     │ roster drains to zero               │ roster drains to zero
//!     ▼                                     ▼
//! ┌──────────────────────────────────────────────┐
//! │ Empty (terminal; the registry deletes it)    │
//! └──────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bag::TileBag;
use super::board::{premium_at, Board, Position, Premium, TileId};
use super::player::{Player, RACK_SIZE};

/// Maximum players per session.
pub const MAX_PLAYERS: usize = 4;

/// Minimum players required to start.
pub const MIN_PLAYERS: usize = 2;

/// Flat bonus for playing a full rack in one move.
pub const BINGO_BONUS: u32 = 50;

/// A single tile placement within a move. The tile must be in the acting
/// player's rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub tile_id: TileId,
}

impl Placement {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Session errors. Every rejection carries a human-readable reason; none
/// is fatal and none leaves the session mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    RoomFull,
    RoomNotFound,
    AlreadyJoined,
    AlreadyStarted,
    NotStarted,
    NotEnoughPlayers,
    NotYourTurn,
    NoTilesPlayed,
    CenterNotCovered,
    NotSingleLine,
    NotContiguous,
    NotConnected,
    OutOfBounds,
    CellOccupied,
    TileNotInRack,
    NotEnoughTilesToExchange,
}

impl SessionError {
    /// Coarse error category, included in error payloads for clients.
    pub fn category(&self) -> &'static str {
        match self {
            Self::RoomFull => "capacity",
            Self::RoomNotFound => "lookup",
            Self::NotYourTurn => "authorization",
            Self::AlreadyJoined
            | Self::AlreadyStarted
            | Self::NotStarted
            | Self::NotEnoughPlayers
            | Self::NotEnoughTilesToExchange => "state",
            Self::NoTilesPlayed
            | Self::CenterNotCovered
            | Self::NotSingleLine
            | Self::NotContiguous
            | Self::NotConnected
            | Self::OutOfBounds
            | Self::CellOccupied
            | Self::TileNotInRack => "geometry",
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomFull => write!(f, "Room is full"),
            Self::RoomNotFound => write!(f, "Room not found"),
            Self::AlreadyJoined => write!(f, "Already in this room"),
            Self::AlreadyStarted => write!(f, "Game already started"),
            Self::NotStarted => write!(f, "Game has not started"),
            Self::NotEnoughPlayers => write!(f, "Not enough players to start"),
            Self::NotYourTurn => write!(f, "It's not your turn"),
            Self::NoTilesPlayed => write!(f, "No tiles played"),
            Self::CenterNotCovered => write!(f, "First word must cross the center"),
            Self::NotSingleLine => write!(f, "Tiles must be in a single row or column"),
            Self::NotContiguous => write!(f, "Tiles must be contiguous"),
            Self::NotConnected => write!(f, "Must connect to existing tiles"),
            Self::OutOfBounds => write!(f, "Tile placed outside the board"),
            Self::CellOccupied => write!(f, "Cell is already occupied"),
            Self::TileNotInRack => write!(f, "Tile is not in your rack"),
            Self::NotEnoughTilesToExchange => {
                write!(f, "Not enough tiles in the bag to exchange")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Direction of the line a move lies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineAxis {
    Row(usize),
    Col(usize),
}

/// One room's complete live game state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Room identifier
    pub room_id: String,

    /// Roster in join order. Removal shifts later players down.
    players: Vec<Player>,

    /// Index into `players` of whoever acts next
    pub current_turn: usize,

    /// The placement board
    pub board: Board,

    /// Undealt tile pool
    bag: TileBag,

    /// Whether the game has started (false -> true exactly once)
    pub started: bool,

    /// Whether the opening move has been committed
    pub opening_move_played: bool,

    /// When the session was created
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// When the game started
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Session {
    /// Create a fresh session with a full shuffled bag.
    pub fn new(room_id: String, rng: &mut impl Rng) -> Self {
        Self {
            room_id,
            players: Vec::new(),
            current_turn: 0,
            board: Board::new(),
            bag: TileBag::standard(rng),
            started: false,
            opening_move_played: false,
            created_at: chrono::Utc::now(),
            started_at: None,
        }
    }

    // --- roster -----------------------------------------------------------

    /// Add a player. The first player to join becomes host.
    pub fn add_player(&mut self, id: i64, name: String) -> Result<(), SessionError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(SessionError::RoomFull);
        }
        if self.has_player(id) {
            return Err(SessionError::AlreadyJoined);
        }

        let is_host = self.players.is_empty();
        self.players.push(Player::new(id, name, is_host));
        Ok(())
    }

    /// Remove a player: their rack returns to the bag, host passes to the
    /// first remaining roster member, and the turn cursor is clamped to 0
    /// when it falls out of range.
    pub fn remove_player(&mut self, id: i64) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        let mut removed = self.players.remove(idx);

        self.bag.return_tiles(removed.drain_rack());

        if removed.is_host {
            if let Some(next) = self.players.first_mut() {
                next.is_host = true;
            }
        }

        if self.current_turn >= self.players.len() {
            self.current_turn = 0;
        }

        Some(removed)
    }

    /// Check if a player is in the roster.
    pub fn has_player(&self, id: i64) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Get a player.
    pub fn player(&self, id: i64) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a mutable player.
    pub fn player_mut(&mut self, id: i64) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Roster in join order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Current host, if any.
    pub fn host_id(&self) -> Option<i64> {
        self.players.iter().find(|p| p.is_host).map(|p| p.id)
    }

    pub fn is_host(&self, id: i64) -> bool {
        self.host_id() == Some(id)
    }

    // --- turns ------------------------------------------------------------

    /// Player id of whoever acts next.
    pub fn current_player_id(&self) -> Option<i64> {
        self.players.get(self.current_turn).map(|p| p.id)
    }

    pub fn is_player_turn(&self, id: i64) -> bool {
        self.current_player_id() == Some(id)
    }

    fn advance_turn(&mut self) {
        if !self.players.is_empty() {
            self.current_turn = (self.current_turn + 1) % self.players.len();
        }
    }

    // --- lifecycle --------------------------------------------------------

    /// Start the game: deal 7 tiles to each player in roster order. A bag
    /// too small for a later player deals short; it never errors.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(SessionError::NotEnoughPlayers);
        }

        self.started = true;
        self.started_at = Some(chrono::Utc::now());
        for player in &mut self.players {
            player.rack = self.bag.draw(RACK_SIZE);
        }
        Ok(())
    }

    /// Remaining bag count.
    pub fn bag_count(&self) -> usize {
        self.bag.len()
    }

    // --- moves ------------------------------------------------------------

    /// Pass the turn. Only effect is advancing the cursor.
    pub fn pass(&mut self, player_id: i64) -> Result<(), SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        if !self.is_player_turn(player_id) {
            return Err(SessionError::NotYourTurn);
        }
        self.advance_turn();
        Ok(())
    }

    /// Exchange rack tiles for fresh ones. Return, shuffle, then draw, in
    /// that order, so a player can never redraw a tile they just gave back.
    /// Ids not found in the rack are silently excluded.
    pub fn exchange(
        &mut self,
        player_id: i64,
        tile_ids: &[TileId],
        rng: &mut impl Rng,
    ) -> Result<(), SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        if !self.is_player_turn(player_id) {
            return Err(SessionError::NotYourTurn);
        }
        if self.bag.len() < tile_ids.len() {
            return Err(SessionError::NotEnoughTilesToExchange);
        }

        let player = self
            .player_mut(player_id)
            .ok_or(SessionError::NotYourTurn)?;
        let returned = player.take_tiles(tile_ids);
        let count = returned.len();

        self.bag.return_tiles(returned);
        self.bag.shuffle(rng);
        let drawn = self.bag.draw(count);

        // player_mut again: the bag borrow is over
        if let Some(player) = self.player_mut(player_id) {
            player.rack.extend(drawn);
        }

        self.advance_turn();
        Ok(())
    }

    /// Validate and commit a move. Returns the points scored.
    ///
    /// Validation happens in full before any mutation; the first failing
    /// check wins and the session is untouched on error.
    pub fn play_move(
        &mut self,
        player_id: i64,
        placements: &[Placement],
    ) -> Result<u32, SessionError> {
        if !self.started {
            return Err(SessionError::NotStarted);
        }
        if !self.is_player_turn(player_id) {
            return Err(SessionError::NotYourTurn);
        }

        let axis = self.validate_placements(player_id, placements)?;
        let total = self.score_move(player_id, placements, axis);

        // Commit: board write, score, rack removal, refill, flags, turn.
        let count = placements.len();
        for p in placements {
            let tile = self
                .player_mut(player_id)
                .and_then(|player| player.take_tile(p.tile_id))
                .expect("validated placement tile must be in rack");
            self.board.place(p.position(), tile);
        }
        let refill = self.bag.draw(count);
        if let Some(player) = self.player_mut(player_id) {
            player.score += total;
            player.rack.extend(refill);
        }
        self.opening_move_played = true;
        self.advance_turn();

        Ok(total)
    }

    /// Geometry checks, in fixed order: empty set, opening-center gate,
    /// single line, contiguity, connection to existing tiles. Placement
    /// well-formedness (bounds, empty target cells, tiles actually in the
    /// rack) is checked up front so a malformed request can never corrupt
    /// state.
    fn validate_placements(
        &self,
        player_id: i64,
        placements: &[Placement],
    ) -> Result<LineAxis, SessionError> {
        if placements.is_empty() {
            return Err(SessionError::NoTilesPlayed);
        }

        let player = self.player(player_id).ok_or(SessionError::NotYourTurn)?;
        let mut seen_cells = HashSet::new();
        let mut seen_tiles = HashSet::new();
        for p in placements {
            let pos = p.position();
            if !pos.is_valid() {
                return Err(SessionError::OutOfBounds);
            }
            if !self.board.is_empty_cell(pos) || !seen_cells.insert(pos) {
                return Err(SessionError::CellOccupied);
            }
            if !player.has_tile(p.tile_id) || !seen_tiles.insert(p.tile_id) {
                return Err(SessionError::TileNotInRack);
            }
        }

        if !self.opening_move_played && !placements.iter().any(|p| p.position().is_center()) {
            return Err(SessionError::CenterNotCovered);
        }

        let rows: HashSet<usize> = placements.iter().map(|p| p.row).collect();
        let cols: HashSet<usize> = placements.iter().map(|p| p.col).collect();
        if rows.len() > 1 && cols.len() > 1 {
            return Err(SessionError::NotSingleLine);
        }

        // A single tile is treated as a same-row line of length 1.
        let axis = if rows.len() == 1 {
            LineAxis::Row(*rows.iter().next().expect("non-empty"))
        } else {
            LineAxis::Col(*cols.iter().next().expect("non-empty"))
        };

        for pos in self.line_range(placements, axis) {
            if !seen_cells.contains(&pos) && self.board.get(pos).is_none() {
                return Err(SessionError::NotContiguous);
            }
        }

        if self.opening_move_played
            && !placements
                .iter()
                .any(|p| self.board.has_neighbor(p.position()))
        {
            return Err(SessionError::NotConnected);
        }

        Ok(axis)
    }

    /// Positions along the move's line from the minimum to the maximum
    /// placed coordinate, inclusive.
    fn line_range(&self, placements: &[Placement], axis: LineAxis) -> Vec<Position> {
        let coords = |f: fn(&Placement) -> usize| {
            let min = placements.iter().map(f).min().expect("non-empty");
            let max = placements.iter().map(f).max().expect("non-empty");
            min..=max
        };
        match axis {
            LineAxis::Row(row) => coords(|p| p.col).map(|col| Position::new(row, col)).collect(),
            LineAxis::Col(col) => coords(|p| p.row).map(|row| Position::new(row, col)).collect(),
        }
    }

    /// Score a validated move against the pre-move board. Letter premiums
    /// double or triple the placed tile; word premiums compound into one
    /// multiplier. Pre-existing tiles inside the placed range add their raw
    /// value. Premiums only ever trigger on cells that were empty, so each
    /// is spent exactly once.
    fn score_move(&self, player_id: i64, placements: &[Placement], axis: LineAxis) -> u32 {
        let player = self.player(player_id).expect("validated player");
        let mut tile_points: u32 = 0;
        let mut word_multiplier: u32 = 1;

        for p in placements {
            let tile = player.rack_tile(p.tile_id).expect("validated tile");
            let mut points = tile.value as u32;
            match premium_at(p.row, p.col) {
                Some(Premium::DoubleLetter) => points *= 2,
                Some(Premium::TripleLetter) => points *= 3,
                Some(Premium::DoubleWord) => word_multiplier *= 2,
                Some(Premium::TripleWord) => word_multiplier *= 3,
                None => {}
            }
            tile_points += points;
        }

        let line_bonus: u32 = self
            .line_range(placements, axis)
            .into_iter()
            .filter_map(|pos| self.board.get(pos))
            .map(|t| t.value as u32)
            .sum();

        let mut total = (tile_points + line_bonus) * word_multiplier;
        if placements.len() == RACK_SIZE {
            total += BINGO_BONUS;
        }
        total
    }
}
