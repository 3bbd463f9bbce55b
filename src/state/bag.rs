//! Tile bag.
//!
//! An ordered pool of undealt tiles, drawn from the tail. The population is
//! fixed at session creation to the standard 100-tile English distribution;
//! every tile that leaves the bag eventually returns to it or ends up on
//! the board, so the session-wide multiset never changes.

use rand::seq::SliceRandom;
use rand::Rng;

use super::board::{Tile, TileId};

/// Total tiles in a fresh bag.
pub const BAG_TILES: usize = 100;

/// Standard English distribution: (letter, count). Blanks are listed last.
const DISTRIBUTION: [(char, usize); 26] = [
    ('A', 9),
    ('B', 2),
    ('C', 2),
    ('D', 4),
    ('E', 12),
    ('F', 2),
    ('G', 3),
    ('H', 2),
    ('I', 9),
    ('J', 1),
    ('K', 1),
    ('L', 4),
    ('M', 2),
    ('N', 6),
    ('O', 8),
    ('P', 2),
    ('Q', 1),
    ('R', 6),
    ('S', 4),
    ('T', 6),
    ('U', 4),
    ('V', 2),
    ('W', 2),
    ('X', 1),
    ('Y', 2),
    ('Z', 1),
];

const BLANK_COUNT: usize = 2;

/// The undealt tile pool for one session.
#[derive(Debug, Clone)]
pub struct TileBag {
    tiles: Vec<Tile>,
}

impl TileBag {
    /// Build a full 100-tile bag and shuffle it.
    pub fn standard(rng: &mut impl Rng) -> Self {
        let mut tiles = Vec::with_capacity(BAG_TILES);
        let mut next_id: TileId = 0;
        for (letter, count) in DISTRIBUTION {
            for _ in 0..count {
                tiles.push(Tile::new(next_id, letter));
                next_id += 1;
            }
        }
        for _ in 0..BLANK_COUNT {
            tiles.push(Tile::blank(next_id));
            next_id += 1;
        }
        debug_assert_eq!(tiles.len(), BAG_TILES);

        let mut bag = Self { tiles };
        bag.shuffle(rng);
        bag
    }

    /// Draw up to `n` tiles from the tail. Returns fewer when the bag runs
    /// out; never errors.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let take = n.min(self.tiles.len());
        self.tiles.split_off(self.tiles.len() - take)
    }

    /// Return tiles to the bag.
    pub fn return_tiles(&mut self, tiles: Vec<Tile>) {
        self.tiles.extend(tiles);
    }

    /// Reorder the bag uniformly at random.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.tiles.shuffle(rng);
    }

    /// Remaining tile count.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over undealt tiles.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_standard_bag_population() {
        let mut rng = StdRng::seed_from_u64(42);
        let bag = TileBag::standard(&mut rng);
        assert_eq!(bag.len(), BAG_TILES);

        let blanks = bag.tiles().filter(|t| t.is_blank()).count();
        assert_eq!(blanks, 2);

        let es = bag.tiles().filter(|t| t.letter == Some('E')).count();
        assert_eq!(es, 12);

        let qs = bag.tiles().filter(|t| t.letter == Some('Q')).count();
        assert_eq!(qs, 1);
    }

    #[test]
    fn test_ids_unique() {
        let mut rng = StdRng::seed_from_u64(42);
        let bag = TileBag::standard(&mut rng);
        let ids: HashSet<_> = bag.tiles().map(|t| t.id).collect();
        assert_eq!(ids.len(), BAG_TILES);
    }

    #[test]
    fn test_draw_from_tail() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut bag = TileBag::standard(&mut rng);

        let drawn = bag.draw(7);
        assert_eq!(drawn.len(), 7);
        assert_eq!(bag.len(), BAG_TILES - 7);
    }

    #[test]
    fn test_short_draw_never_errors() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut bag = TileBag::standard(&mut rng);

        let all = bag.draw(BAG_TILES - 3);
        assert_eq!(all.len(), BAG_TILES - 3);

        let short = bag.draw(7);
        assert_eq!(short.len(), 3);
        assert!(bag.is_empty());

        let none = bag.draw(7);
        assert!(none.is_empty());
    }

    #[test]
    fn test_return_then_shuffle_then_draw() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut bag = TileBag::standard(&mut rng);

        let exchanged = bag.draw(3);
        let exchanged_ids: HashSet<_> = exchanged.iter().map(|t| t.id).collect();

        bag.return_tiles(exchanged);
        bag.shuffle(&mut rng);
        assert_eq!(bag.len(), BAG_TILES);

        // Conservation: the returned tiles are back in the pool.
        let pool_ids: HashSet<_> = bag.tiles().map(|t| t.id).collect();
        assert!(exchanged_ids.is_subset(&pool_ids));
    }

    #[test]
    fn test_shuffle_deterministic_with_seed() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let bag_a = TileBag::standard(&mut rng_a);
        let bag_b = TileBag::standard(&mut rng_b);

        let order_a: Vec<_> = bag_a.tiles().map(|t| t.id).collect();
        let order_b: Vec<_> = bag_b.tiles().map(|t| t.id).collect();
        assert_eq!(order_a, order_b);
    }
}
