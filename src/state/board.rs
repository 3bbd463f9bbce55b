//! Board and tile model.
//!
//! A fixed 15x15 placement board with the classic premium-square layout.
//! Cells start empty and are filled one tile at a time; a premium square
//! only counts while its cell is empty, so occupancy spends it permanently.

use serde::{Deserialize, Serialize};

/// Board dimensions.
pub const BOARD_SIZE: usize = 15;

/// The mandatory opening cell.
pub const CENTER: Position = Position { row: 7, col: 7 };

/// Opaque tile identifier, unique within a session.
pub type TileId = u32;

/// A single letter tile. Immutable once minted; blanks carry no letter
/// and score zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub letter: Option<char>,
    pub value: u8,
}

impl Tile {
    pub fn new(id: TileId, letter: char) -> Self {
        Self {
            id,
            letter: Some(letter.to_ascii_uppercase()),
            value: letter_value(letter),
        }
    }

    pub fn blank(id: TileId) -> Self {
        Self {
            id,
            letter: None,
            value: 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.letter.is_none()
    }

    /// Full tile representation, including the id. Only ever sent to the
    /// tile's owner.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "letter": self.letter.map(|c| c.to_string()),
            "value": self.value
        })
    }

    /// Board-facing representation: letter and value, no id.
    pub fn to_public_json(&self) -> serde_json::Value {
        serde_json::json!({
            "letter": self.letter.map(|c| c.to_string()),
            "value": self.value
        })
    }
}

/// Get point value for a letter. Blanks are handled by [`Tile::blank`].
pub fn letter_value(letter: char) -> u8 {
    match letter.to_ascii_uppercase() {
        'A' | 'E' | 'I' | 'O' | 'U' | 'L' | 'N' | 'S' | 'T' | 'R' => 1,
        'D' | 'G' => 2,
        'B' | 'C' | 'M' | 'P' => 3,
        'F' | 'H' | 'V' | 'W' | 'Y' => 4,
        'K' => 5,
        'J' | 'X' => 8,
        'Q' | 'Z' => 10,
        _ => 0,
    }
}

/// Premium square kinds.
///
/// The center cell is not a premium square; it is a distinguished marker
/// used only by the opening-move rule (see [`Position::is_center`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Premium {
    TripleWord,
    DoubleWord,
    TripleLetter,
    DoubleLetter,
}

impl Premium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TripleWord => "triple_word",
            Self::DoubleWord => "double_word",
            Self::TripleLetter => "triple_letter",
            Self::DoubleLetter => "double_letter",
        }
    }
}

const TRIPLE_WORD: [(usize, usize); 8] = [
    (0, 0),
    (0, 7),
    (0, 14),
    (7, 0),
    (7, 14),
    (14, 0),
    (14, 7),
    (14, 14),
];

const DOUBLE_WORD: [(usize, usize); 16] = [
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (10, 10),
    (11, 11),
    (12, 12),
    (13, 13),
    (1, 13),
    (2, 12),
    (3, 11),
    (4, 10),
    (10, 4),
    (11, 3),
    (12, 2),
    (13, 1),
];

const TRIPLE_LETTER: [(usize, usize); 12] = [
    (1, 5),
    (1, 9),
    (5, 1),
    (5, 5),
    (5, 9),
    (5, 13),
    (9, 1),
    (9, 5),
    (9, 9),
    (9, 13),
    (13, 5),
    (13, 9),
];

const DOUBLE_LETTER: [(usize, usize); 24] = [
    (0, 3),
    (0, 11),
    (2, 6),
    (2, 8),
    (3, 0),
    (3, 7),
    (3, 14),
    (6, 2),
    (6, 6),
    (6, 8),
    (6, 12),
    (7, 3),
    (7, 11),
    (8, 2),
    (8, 6),
    (8, 8),
    (8, 12),
    (11, 0),
    (11, 7),
    (11, 14),
    (12, 6),
    (12, 8),
    (14, 3),
    (14, 11),
];

/// Premium kind for a coordinate, from the fixed layout tables.
pub fn premium_at(row: usize, col: usize) -> Option<Premium> {
    let pos = (row, col);
    if TRIPLE_WORD.contains(&pos) {
        Some(Premium::TripleWord)
    } else if DOUBLE_WORD.contains(&pos) {
        Some(Premium::DoubleWord)
    } else if TRIPLE_LETTER.contains(&pos) {
        Some(Premium::TripleLetter)
    } else if DOUBLE_LETTER.contains(&pos) {
        Some(Premium::DoubleLetter)
    } else {
        None
    }
}

/// Board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if position is within board bounds.
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Check if this is the opening cell.
    pub fn is_center(&self) -> bool {
        *self == CENTER
    }

    /// The up-to-four orthogonal neighbors, clipped to the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        let (row, col) = (self.row as i32, self.col as i32);
        [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
            .into_iter()
            .filter(|(r, c)| {
                (0..BOARD_SIZE as i32).contains(r) && (0..BOARD_SIZE as i32).contains(c)
            })
            .map(|(r, c)| Position::new(r as usize, c as usize))
    }
}

/// The 15x15 placement board.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Get the tile at a position, if any.
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if pos.is_valid() {
            self.cells[pos.row][pos.col].as_ref()
        } else {
            None
        }
    }

    /// Check if a cell is empty (out-of-bounds counts as occupied).
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        pos.is_valid() && self.cells[pos.row][pos.col].is_none()
    }

    /// Place a tile. The caller must have verified the cell is empty.
    pub fn place(&mut self, pos: Position, tile: Tile) {
        debug_assert!(self.is_empty_cell(pos));
        self.cells[pos.row][pos.col] = Some(tile);
    }

    /// Check if any orthogonal neighbor holds a tile.
    pub fn has_neighbor(&self, pos: Position) -> bool {
        pos.neighbors().any(|n| self.get(n).is_some())
    }

    /// Count occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count()
    }

    /// Iterate over all placed tiles.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().filter_map(|c| c.as_ref())
    }

    /// Convert the full board to JSON: a 15x15 array of cells, `null` for
    /// empty, `{letter, value}` for occupied.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .cells
            .iter()
            .map(|row| {
                let cells: Vec<serde_json::Value> = row
                    .iter()
                    .map(|c| match c {
                        Some(tile) => tile.to_public_json(),
                        None => serde_json::Value::Null,
                    })
                    .collect();
                serde_json::Value::Array(cells)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_values() {
        assert_eq!(letter_value('A'), 1);
        assert_eq!(letter_value('D'), 2);
        assert_eq!(letter_value('B'), 3);
        assert_eq!(letter_value('F'), 4);
        assert_eq!(letter_value('K'), 5);
        assert_eq!(letter_value('X'), 8);
        assert_eq!(letter_value('Q'), 10);
        assert_eq!(letter_value('z'), 10); // Case insensitive
    }

    #[test]
    fn test_blank_tile() {
        let tile = Tile::blank(42);
        assert!(tile.is_blank());
        assert_eq!(tile.value, 0);
        assert_eq!(tile.letter, None);
    }

    #[test]
    fn test_premium_layout_counts() {
        let mut tw = 0;
        let mut dw = 0;
        let mut tl = 0;
        let mut dl = 0;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match premium_at(row, col) {
                    Some(Premium::TripleWord) => tw += 1,
                    Some(Premium::DoubleWord) => dw += 1,
                    Some(Premium::TripleLetter) => tl += 1,
                    Some(Premium::DoubleLetter) => dl += 1,
                    None => {}
                }
            }
        }
        assert_eq!(tw, 8);
        assert_eq!(dw, 16);
        assert_eq!(tl, 12);
        assert_eq!(dl, 24);
    }

    #[test]
    fn test_center_is_not_premium() {
        assert_eq!(premium_at(7, 7), None);
        assert!(Position::new(7, 7).is_center());
        assert!(!Position::new(7, 8).is_center());
    }

    #[test]
    fn test_premium_corners() {
        assert_eq!(premium_at(0, 0), Some(Premium::TripleWord));
        assert_eq!(premium_at(14, 14), Some(Premium::TripleWord));
        assert_eq!(premium_at(1, 1), Some(Premium::DoubleWord));
        assert_eq!(premium_at(5, 5), Some(Premium::TripleLetter));
        assert_eq!(premium_at(0, 3), Some(Premium::DoubleLetter));
    }

    #[test]
    fn test_board_place_and_get() {
        let mut board = Board::new();
        let pos = Position::new(7, 7);
        assert!(board.is_empty_cell(pos));

        board.place(pos, Tile::new(1, 'A'));
        assert!(!board.is_empty_cell(pos));
        assert_eq!(board.get(pos).unwrap().letter, Some('A'));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        let corner: Vec<Position> = Position::new(0, 0).neighbors().collect();
        assert_eq!(corner.len(), 2);

        let middle: Vec<Position> = Position::new(7, 7).neighbors().collect();
        assert_eq!(middle.len(), 4);
    }

    #[test]
    fn test_has_neighbor_orthogonal_only() {
        let mut board = Board::new();
        board.place(Position::new(7, 7), Tile::new(1, 'A'));

        assert!(board.has_neighbor(Position::new(7, 8)));
        assert!(board.has_neighbor(Position::new(6, 7)));
        // Diagonal does not count
        assert!(!board.has_neighbor(Position::new(6, 6)));
        assert!(!board.has_neighbor(Position::new(8, 8)));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        let pos = Position::new(15, 0);
        assert!(!pos.is_valid());
        assert!(board.get(pos).is_none());
        assert!(!board.is_empty_cell(pos));
    }

    #[test]
    fn test_board_to_json_shape() {
        let mut board = Board::new();
        board.place(Position::new(0, 1), Tile::new(9, 'Q'));

        let json = board.to_json();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert_eq!(rows[0].as_array().unwrap().len(), BOARD_SIZE);
        assert!(rows[0][0].is_null());
        assert_eq!(rows[0][1]["letter"], "Q");
        assert_eq!(rows[0][1]["value"], 10);
        // No id leaks through the board view
        assert!(rows[0][1].get("id").is_none());
    }
}
