//! Room registry.
//!
//! Process-wide mapping of room identifier to live session. Sessions are
//! created on first use of a room id and garbage-collected synchronously
//! the instant their roster drains to zero.

use std::collections::HashMap;

use rand::Rng;

use super::session::Session;

/// Registry of live sessions, keyed by room id.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Session>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session for a room, creating it if absent.
    pub fn create_or_get(&mut self, room_id: &str, rng: &mut impl Rng) -> &mut Session {
        self.rooms
            .entry(room_id.to_string())
            .or_insert_with(|| Session::new(room_id.to_string(), rng))
    }

    /// Get a session.
    pub fn get(&self, room_id: &str) -> Option<&Session> {
        self.rooms.get(room_id)
    }

    /// Get a mutable session.
    pub fn get_mut(&mut self, room_id: &str) -> Option<&mut Session> {
        self.rooms.get_mut(room_id)
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Remove a session outright.
    pub fn remove(&mut self, room_id: &str) -> Option<Session> {
        self.rooms.remove(room_id)
    }

    /// Delete the session if its roster is empty. Returns true if it was
    /// reaped.
    pub fn reap_if_empty(&mut self, room_id: &str) -> bool {
        if self.rooms.get(room_id).is_some_and(|s| s.is_empty()) {
            self.rooms.remove(room_id);
            true
        } else {
            false
        }
    }

    /// Remove a player from every room containing that identity, reaping
    /// any session left empty. Returns the ids of the rooms the player was
    /// removed from.
    pub fn disconnect(&mut self, player_id: i64) -> Vec<String> {
        let affected: Vec<String> = self
            .rooms
            .iter()
            .filter(|(_, s)| s.has_player(player_id))
            .map(|(id, _)| id.clone())
            .collect();

        for room_id in &affected {
            if let Some(session) = self.rooms.get_mut(room_id) {
                session.remove_player(player_id);
            }
            self.reap_if_empty(room_id);
        }

        affected
    }

    /// Count live sessions.
    pub fn count(&self) -> usize {
        self.rooms.len()
    }

    /// Iterate over room ids.
    pub fn room_ids(&self) -> impl Iterator<Item = &String> {
        self.rooms.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_create_or_get_idempotent() {
        let mut registry = RoomRegistry::new();
        let mut r = rng();

        let created = registry.create_or_get("room-1", &mut r).created_at;

        let again = registry.create_or_get("room-1", &mut r);
        assert_eq!(again.created_at, created);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_reap_only_when_empty() {
        let mut registry = RoomRegistry::new();
        let mut r = rng();

        let session = registry.create_or_get("room-1", &mut r);
        session.add_player(1, "Alice".to_string()).unwrap();

        assert!(!registry.reap_if_empty("room-1"));
        assert!(registry.contains("room-1"));

        registry.get_mut("room-1").unwrap().remove_player(1);
        assert!(registry.reap_if_empty("room-1"));
        assert!(!registry.contains("room-1"));
    }

    #[test]
    fn test_disconnect_sweeps_all_rooms() {
        let mut registry = RoomRegistry::new();
        let mut r = rng();

        let a = registry.create_or_get("room-a", &mut r);
        a.add_player(1, "Alice".to_string()).unwrap();
        a.add_player(2, "Bob".to_string()).unwrap();

        let b = registry.create_or_get("room-b", &mut r);
        b.add_player(1, "Alice".to_string()).unwrap();

        let mut affected = registry.disconnect(1);
        affected.sort();
        assert_eq!(affected, vec!["room-a".to_string(), "room-b".to_string()]);

        // room-a survives with Bob promoted; room-b was reaped.
        assert!(registry.get("room-a").unwrap().is_host(2));
        assert!(!registry.contains("room-b"));
    }

    #[test]
    fn test_disconnect_unknown_player_is_noop() {
        let mut registry = RoomRegistry::new();
        let mut r = rng();
        registry
            .create_or_get("room-1", &mut r)
            .add_player(1, "Alice".to_string())
            .unwrap();

        assert!(registry.disconnect(99).is_empty());
        assert!(registry.contains("room-1"));
    }
}
