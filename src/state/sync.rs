//! Synchronization layer.
//!
//! Derives view projections from a session and pairs each with the
//! audience that should receive it. This layer only reads session state;
//! actually delivering the payloads is the transport host's job.
//!
//! Two projections exist: the public room snapshot, broadcast to every
//! room member after each mutation, and the private rack snapshot,
//! delivered only to the rack's owner. The public snapshot never carries
//! rack contents, only per-player tile counts.

use super::session::{Session, SessionError};

/// Who a payload is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every member of the room
    Room(String),
    /// A single participant
    Player(i64),
}

/// A computed payload plus its audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub audience: Audience,
    pub payload: serde_json::Value,
}

impl Outbound {
    pub fn room(room_id: &str, payload: serde_json::Value) -> Self {
        Self {
            audience: Audience::Room(room_id.to_string()),
            payload,
        }
    }

    pub fn player(player_id: i64, payload: serde_json::Value) -> Self {
        Self {
            audience: Audience::Player(player_id),
            payload,
        }
    }
}

/// Public room snapshot: roster summaries in join order, turn cursor, the
/// full board, lifecycle flags, bag count, host. No rack contents.
pub fn room_snapshot(session: &Session) -> serde_json::Value {
    let players: Vec<serde_json::Value> = session.players().map(|p| p.to_json()).collect();

    serde_json::json!({
        "type": "room_state",
        "room_id": session.room_id,
        "players": players,
        "current_turn": session.current_turn,
        "board": session.board.to_json(),
        "started": session.started,
        "bag_count": session.bag_count(),
        "host_id": session.host_id()
    })
}

/// Private rack snapshot for one player.
pub fn rack_snapshot(session: &Session, player_id: i64) -> Option<serde_json::Value> {
    let player = session.player(player_id)?;
    Some(serde_json::json!({
        "type": "rack",
        "room_id": session.room_id,
        "tiles": player.rack_to_json()
    }))
}

/// Chat relay payload: verbatim text with sender name and timestamp.
pub fn chat_message(sender_name: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "chat",
        "sender": sender_name,
        "text": text,
        "sent_at": chrono::Utc::now().to_rfc3339()
    })
}

/// Error payload, delivered to the requester alone.
pub fn error_message(err: &SessionError) -> serde_json::Value {
    serde_json::json!({
        "type": "error",
        "category": err.category(),
        "reason": err.to_string()
    })
}

/// The broadcast that follows every mutation: one public snapshot to the
/// whole room.
pub fn broadcast_state(session: &Session) -> Outbound {
    Outbound::room(&session.room_id, room_snapshot(session))
}

/// Private rack update for one player, if they are in the session.
pub fn private_rack(session: &Session, player_id: i64) -> Option<Outbound> {
    rack_snapshot(session, player_id).map(|payload| Outbound::player(player_id, payload))
}

/// Updates emitted at game start: the public snapshot plus every player's
/// private rack.
pub fn start_updates(session: &Session) -> Vec<Outbound> {
    let mut out = vec![broadcast_state(session)];
    for player in session.players() {
        if let Some(update) = private_rack(session, player.id) {
            out.push(update);
        }
    }
    out
}
