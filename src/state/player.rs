//! Player record.
//!
//! Per-participant mutable state within a session: identity, score, rack,
//! host flag. Racks are private; other participants only ever see the tile
//! count through the public summary.

use super::board::{Tile, TileId};

/// Maximum rack size.
pub const RACK_SIZE: usize = 7;

/// A player in a session.
#[derive(Debug, Clone)]
pub struct Player {
    /// Connection-scoped identity, assigned by the transport host.
    pub id: i64,

    /// Display name
    pub name: String,

    /// Running score
    pub score: u32,

    /// Current hand of tiles (at most [`RACK_SIZE`])
    pub rack: Vec<Tile>,

    /// Whether this player is the room host
    pub is_host: bool,
}

impl Player {
    pub fn new(id: i64, name: String, is_host: bool) -> Self {
        Self {
            id,
            name,
            score: 0,
            rack: Vec::with_capacity(RACK_SIZE),
            is_host,
        }
    }

    /// Check if the rack holds a tile with this id.
    pub fn has_tile(&self, tile_id: TileId) -> bool {
        self.rack.iter().any(|t| t.id == tile_id)
    }

    /// Look up a rack tile by id.
    pub fn rack_tile(&self, tile_id: TileId) -> Option<&Tile> {
        self.rack.iter().find(|t| t.id == tile_id)
    }

    /// Remove and return a rack tile by id.
    pub fn take_tile(&mut self, tile_id: TileId) -> Option<Tile> {
        let idx = self.rack.iter().position(|t| t.id == tile_id)?;
        Some(self.rack.remove(idx))
    }

    /// Remove every rack tile whose id appears in `tile_ids`. Ids not in
    /// the rack are ignored.
    pub fn take_tiles(&mut self, tile_ids: &[TileId]) -> Vec<Tile> {
        tile_ids
            .iter()
            .filter_map(|id| self.take_tile(*id))
            .collect()
    }

    /// Drain the whole rack (used when the player leaves).
    pub fn drain_rack(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.rack)
    }

    /// Public summary: everything except the rack contents.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "score": self.score,
            "tile_count": self.rack.len(),
            "is_host": self.is_host
        })
    }

    /// Private rack view, only ever delivered to this player.
    pub fn rack_to_json(&self) -> serde_json::Value {
        let tiles: Vec<serde_json::Value> = self.rack.iter().map(|t| t.to_json()).collect();
        serde_json::Value::Array(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_rack(letters: &str) -> Player {
        let mut player = Player::new(1, "Alice".to_string(), true);
        for (i, c) in letters.chars().enumerate() {
            player.rack.push(Tile::new(i as TileId, c));
        }
        player
    }

    #[test]
    fn test_take_tile() {
        let mut player = player_with_rack("CAT");
        assert!(player.has_tile(1));

        let tile = player.take_tile(1).unwrap();
        assert_eq!(tile.letter, Some('A'));
        assert!(!player.has_tile(1));
        assert_eq!(player.rack.len(), 2);
    }

    #[test]
    fn test_take_tiles_ignores_unknown_ids() {
        let mut player = player_with_rack("CAT");

        let taken = player.take_tiles(&[0, 99, 2]);
        assert_eq!(taken.len(), 2);
        assert_eq!(player.rack.len(), 1);
        assert_eq!(player.rack[0].letter, Some('A'));
    }

    #[test]
    fn test_drain_rack() {
        let mut player = player_with_rack("WORD");
        let tiles = player.drain_rack();
        assert_eq!(tiles.len(), 4);
        assert!(player.rack.is_empty());
    }

    #[test]
    fn test_summary_hides_rack() {
        let player = player_with_rack("CAT");
        let json = player.to_json();

        assert_eq!(json["tile_count"], 3);
        assert_eq!(json["name"], "Alice");
        assert!(json.get("rack").is_none());

        // The summary never mentions rack letters
        let rendered = json.to_string();
        assert!(!rendered.contains("\"letter\""));
    }

    #[test]
    fn test_rack_view_has_ids() {
        let player = player_with_rack("GO");
        let json = player.rack_to_json();
        let tiles = json.as_array().unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0]["letter"], "G");
        assert_eq!(tiles[0]["id"], 0);
    }
}
