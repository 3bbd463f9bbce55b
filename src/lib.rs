//! WordRack State Library
//!
//! This crate provides session state management for WordRack game logic.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Board & Tiles** - Fixed 15x15 board with the classic premium-square
//!   layout and the standard 100-tile letter distribution.
//!
//! - **Session State Machine** - Per-room game state (board, bag, roster,
//!   turn cursor) with validated, checked-before-commit operations.
//!
//! - **Room Registry** - Room id to session mapping with synchronous
//!   teardown of emptied sessions.
//!
//! - **Synchronization** - Public and private view projections paired with
//!   the audience each should reach.
//!
//! # Design Principles
//!
//! 1. **Validate before commit** - A rejected operation carries a specific
//!    reason and leaves the session untouched.
//!
//! 2. **Tile conservation** - Bag, racks, and board always partition the
//!    same 100-tile multiset, across every operation including removal
//!    and exchange.
//!
//! 3. **No networking** - This crate is pure state, no WebSocket or HTTP.
//!    The transport host delivers the outbound payloads this crate
//!    computes.
//!
//! 4. **Racks stay private** - Public projections only ever expose tile
//!    counts; rack contents go to their owner alone.
//!
//! # Example
//!
//! ```rust
//! use wordrack_state::state::{AppState, Audience, Request};
//!
//! let mut app = AppState::with_seed(7);
//!
//! // Two players set up a room; the first becomes host.
//! app.handle(1, "cozy-corner", Request::CreateRoom { name: "Alice".into() });
//! app.handle(2, "cozy-corner", Request::JoinRoom { name: "Bob".into() });
//!
//! // The host starts the game: everyone gets the public snapshot and
//! // their own private rack.
//! let updates = app.handle(1, "cozy-corner", Request::StartGame);
//! assert_eq!(updates.len(), 3);
//! assert_eq!(updates[0].audience, Audience::Room("cozy-corner".into()));
//! assert_eq!(updates[1].audience, Audience::Player(1));
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
