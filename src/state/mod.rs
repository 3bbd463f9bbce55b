//! State management module for WordRack.
//!
//! This module provides the core state types and managers:
//!
//! - `board` - Tiles, premium squares, the 15x15 placement board
//! - `bag` - Undealt tile pool (draw / return / shuffle)
//! - `player` - Per-participant record (score, rack, host flag)
//! - `session` - Per-room game state machine
//! - `registry` - Room id to session mapping with teardown
//! - `sync` - View projections and their audiences
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         AppState                             │
//! │                                                              │
//! │   Request ──▶ RoomRegistry ──▶ Session ──▶ sync projections  │
//! │               room_id →        board / bag /    public view  │
//! │                 Session        roster / turns   + rack views │
//! │                                                              │
//! │   One inbound operation runs to completion (validate,        │
//! │   mutate, project) before the next is handled; sessions      │
//! │   need no internal locking.                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected operations never mutate a session; the requester alone gets
//! an error payload and everyone else sees nothing.

pub mod bag;
pub mod board;
pub mod player;
pub mod registry;
pub mod session;
pub mod sync;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use bag::{TileBag, BAG_TILES};
pub use board::{
    letter_value, premium_at, Board, Position, Premium, Tile, TileId, BOARD_SIZE, CENTER,
};
pub use player::{Player, RACK_SIZE};
pub use registry::RoomRegistry;
pub use session::{
    Placement, Session, SessionError, BINGO_BONUS, MAX_PLAYERS, MIN_PLAYERS,
};
pub use sync::{broadcast_state, private_rack, room_snapshot, Audience, Outbound};

/// Inbound operations. Each request arrives with a room id and the
/// requester's connection-scoped identity; the payload itself is a closed
/// tagged variant validated by serde before it ever reaches a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    CreateRoom { name: String },
    JoinRoom { name: String },
    StartGame,
    PlayMove { placements: Vec<Placement> },
    PassTurn,
    ExchangeTiles { tile_ids: Vec<TileId> },
    SendChat { text: String },
}

/// Combined application state: the room registry plus the process RNG.
///
/// `handle` is the single mutation path. It resolves the room, applies
/// the operation to completion, and returns the outbound projections the
/// transport host should deliver.
#[derive(Debug)]
pub struct AppState {
    pub rooms: RoomRegistry,
    rng: StdRng,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rooms: RoomRegistry::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic construction for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Handle one inbound request. Errors are folded into the result as a
    /// payload addressed to the requester alone.
    pub fn handle(&mut self, player_id: i64, room_id: &str, request: Request) -> Vec<Outbound> {
        match request {
            Request::CreateRoom { name } => {
                let session = self.rooms.create_or_get(room_id, &mut self.rng);
                if session.started {
                    return vec![Self::reject(player_id, &SessionError::AlreadyStarted)];
                }
                match session.add_player(player_id, name) {
                    Ok(()) => vec![sync::broadcast_state(session)],
                    Err(e) => vec![Self::reject(player_id, &e)],
                }
            }

            Request::JoinRoom { name } => {
                let Some(session) = self.rooms.get_mut(room_id) else {
                    return vec![Self::reject(player_id, &SessionError::RoomNotFound)];
                };
                if session.started {
                    return vec![Self::reject(player_id, &SessionError::AlreadyStarted)];
                }
                match session.add_player(player_id, name) {
                    Ok(()) => vec![sync::broadcast_state(session)],
                    Err(e) => vec![Self::reject(player_id, &e)],
                }
            }

            Request::StartGame => {
                let Some(session) = self.rooms.get_mut(room_id) else {
                    return vec![Self::reject(player_id, &SessionError::RoomNotFound)];
                };
                // Start failures are silent: no state change, no traffic.
                if !session.is_host(player_id) || session.start().is_err() {
                    return Vec::new();
                }
                sync::start_updates(session)
            }

            Request::PlayMove { placements } => {
                let Some(session) = self.rooms.get_mut(room_id) else {
                    return vec![Self::reject(player_id, &SessionError::RoomNotFound)];
                };
                match session.play_move(player_id, &placements) {
                    Ok(_points) => {
                        let mut out = vec![sync::broadcast_state(session)];
                        out.extend(sync::private_rack(session, player_id));
                        out
                    }
                    Err(e) => vec![Self::reject(player_id, &e)],
                }
            }

            Request::PassTurn => {
                let Some(session) = self.rooms.get_mut(room_id) else {
                    return vec![Self::reject(player_id, &SessionError::RoomNotFound)];
                };
                match session.pass(player_id) {
                    Ok(()) => vec![sync::broadcast_state(session)],
                    Err(e) => vec![Self::reject(player_id, &e)],
                }
            }

            Request::ExchangeTiles { tile_ids } => {
                let Some(session) = self.rooms.get_mut(room_id) else {
                    return vec![Self::reject(player_id, &SessionError::RoomNotFound)];
                };
                match session.exchange(player_id, &tile_ids, &mut self.rng) {
                    Ok(()) => {
                        let mut out = vec![sync::broadcast_state(session)];
                        out.extend(sync::private_rack(session, player_id));
                        out
                    }
                    Err(e) => vec![Self::reject(player_id, &e)],
                }
            }

            Request::SendChat { text } => {
                let Some(session) = self.rooms.get(room_id) else {
                    return vec![Self::reject(player_id, &SessionError::RoomNotFound)];
                };
                // Pure relay; non-members get nothing echoed.
                match session.player(player_id) {
                    Some(sender) => vec![Outbound::room(
                        room_id,
                        sync::chat_message(&sender.name, &text),
                    )],
                    None => Vec::new(),
                }
            }
        }
    }

    /// Handle a dropped connection: remove the player from every room that
    /// contains them and broadcast the new state of each surviving room.
    pub fn disconnect(&mut self, player_id: i64) -> Vec<Outbound> {
        let affected = self.rooms.disconnect(player_id);
        affected
            .iter()
            .filter_map(|room_id| self.rooms.get(room_id))
            .map(sync::broadcast_state)
            .collect()
    }

    fn reject(player_id: i64, err: &SessionError) -> Outbound {
        Outbound::player(player_id, sync::error_message(err))
    }
}
