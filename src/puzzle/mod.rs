// Placement engine: sizes the grid, places words, fills the rest

pub mod generator;
pub mod words;

use thiserror::Error;

pub use generator::PuzzleGenerator;
pub use words::WordList;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("cannot size a puzzle grid without any words")]
    NoWords,
}
