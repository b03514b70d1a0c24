use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Forward-only directions a word can run in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Down and to the right
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
    ];

    /// Row and column step between consecutive letters
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
        }
    }

    /// Cell holding the `index`-th letter of a word starting at `start`
    pub fn step(self, start: Position, index: usize) -> Position {
        let (dr, dc) = self.delta();
        Position {
            row: start.row + index * dr,
            col: start.col + index * dc,
        }
    }
}

/// Where the first letter of a word goes and which way the rest extend
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Placement {
    pub start: Position,
    pub direction: Direction,
}

/// A word that made it into the grid
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PlacedWord {
    /// The word exactly as the caller supplied it (before uppercasing)
    pub word: String,
    pub start: Position,
    pub end: Position,
    pub direction: Direction,
}

impl PlacedWord {
    /// Every cell the word occupies, start to end
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        let len = match self.direction {
            Direction::Horizontal => self.end.col - self.start.col,
            Direction::Vertical | Direction::Diagonal => self.end.row - self.start.row,
        } + 1;
        (0..len).map(move |i| self.direction.step(self.start, i))
    }
}

/// Placement coordinates for every word that was placed, in input order.
///
/// Duplicate input words each get their own entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(transparent)]
pub struct WordCoordinates(Vec<PlacedWord>);

impl WordCoordinates {
    pub fn push(&mut self, placed: PlacedWord) {
        self.0.push(placed);
    }

    /// First placement recorded for `word` (original casing)
    pub fn get(&self, word: &str) -> Option<&PlacedWord> {
        self.0.iter().find(|p| p.word == word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedWord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> IntoIterator for &'a WordCoordinates {
    type Item = &'a PlacedWord;
    type IntoIter = std::slice::Iter<'a, PlacedWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Fully populated puzzle grid, row-major
pub type Grid = Vec<Vec<char>>;

/// Result of one generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub grid: Grid,
    pub coordinates: WordCoordinates,
    /// Words that found no room within the retry budget
    pub omitted: Vec<String>,
}

impl GeneratedPuzzle {
    pub fn size(&self) -> usize {
        self.grid.len()
    }

    /// Letters along a placed word's cells
    pub fn read(&self, placed: &PlacedWord) -> String {
        placed
            .cells()
            .map(|pos| self.grid[pos.row][pos.col])
            .collect()
    }
}
