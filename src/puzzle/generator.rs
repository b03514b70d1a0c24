use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    models::{Direction, GeneratedPuzzle, Grid, PlacedWord, Placement, Position, WordCoordinates},
    utils::letters::random_letter,
};

use super::GenerateError;

/// Smallest grid ever produced, regardless of word lengths
pub const MIN_GRID_SIZE: usize = 10;
/// Extra rows/columns added beyond the longest word
pub const GRID_MARGIN: usize = 2;
/// Random placements tried per word before it is dropped
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Grid under construction; `None` marks a cell nothing has claimed yet
type DraftGrid = Vec<Vec<Option<char>>>;

pub struct PuzzleGenerator;

impl PuzzleGenerator {
    /// Generate a puzzle using the thread-local random source
    pub fn generate<S: AsRef<str>>(words: &[S]) -> Result<GeneratedPuzzle, GenerateError> {
        Self::generate_with_rng(words, &mut rand::rng())
    }

    /// Generate a reproducible puzzle from a seed
    pub fn generate_seeded<S: AsRef<str>>(
        words: &[S],
        seed: u64,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        Self::generate_with_rng(words, &mut StdRng::seed_from_u64(seed))
    }

    /// Place every word in input order, then fill the leftover cells.
    ///
    /// Words that cannot be placed within [`MAX_PLACEMENT_ATTEMPTS`] are left
    /// out of the grid and reported in `omitted`.
    pub fn generate_with_rng<S: AsRef<str>>(
        words: &[S],
        rng: &mut impl Rng,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        let size = Self::grid_size(words)?;
        let mut grid: DraftGrid = vec![vec![None; size]; size];
        let mut coordinates = WordCoordinates::default();
        let mut omitted = Vec::new();

        for word in words {
            let original = word.as_ref();
            let letters: Vec<char> = original.to_uppercase().chars().collect();

            match Self::place_word(&mut grid, &letters, rng) {
                Some(placement) => {
                    let end = placement
                        .direction
                        .step(placement.start, letters.len() - 1);
                    coordinates.push(PlacedWord {
                        word: original.to_string(),
                        start: placement.start,
                        end,
                        direction: placement.direction,
                    });
                }
                None => {
                    tracing::debug!(
                        "Could not place '{}' after {} attempts",
                        original,
                        MAX_PLACEMENT_ATTEMPTS
                    );
                    omitted.push(original.to_string());
                }
            }
        }

        let grid = Self::fill_empty_cells(grid, rng);

        Ok(GeneratedPuzzle {
            grid,
            coordinates,
            omitted,
        })
    }

    /// Side length for a word list: longest word plus margin, never below the minimum
    pub fn grid_size<S: AsRef<str>>(words: &[S]) -> Result<usize, GenerateError> {
        let longest = words
            .iter()
            .map(|w| w.as_ref().to_uppercase().chars().count())
            .max()
            .ok_or(GenerateError::NoWords)?;

        Ok((longest + GRID_MARGIN).max(MIN_GRID_SIZE))
    }

    fn place_word(grid: &mut DraftGrid, letters: &[char], rng: &mut impl Rng) -> Option<Placement> {
        if letters.is_empty() {
            return None;
        }

        let size = grid.len();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            let start = Position {
                row: rng.random_range(0..size),
                col: rng.random_range(0..size),
            };
            let placement = Placement { start, direction };

            if Self::can_place(grid, letters, placement) {
                for (i, letter) in letters.iter().enumerate() {
                    let pos = direction.step(start, i);
                    grid[pos.row][pos.col] = Some(*letter);
                }
                return Some(placement);
            }
        }

        None
    }

    /// Every target cell must be inside the grid and either empty or already
    /// holding the same letter.
    fn can_place(grid: &DraftGrid, letters: &[char], placement: Placement) -> bool {
        let size = grid.len();
        let last = placement.direction.step(placement.start, letters.len() - 1);
        if last.row >= size || last.col >= size {
            return false;
        }

        letters.iter().enumerate().all(|(i, letter)| {
            let pos = placement.direction.step(placement.start, i);
            match grid[pos.row][pos.col] {
                None => true,
                Some(existing) => existing == *letter,
            }
        })
    }

    fn fill_empty_cells(grid: DraftGrid, rng: &mut impl Rng) -> Grid {
        grid.into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(|| random_letter(rng)))
                    .collect()
            })
            .collect()
    }
}
