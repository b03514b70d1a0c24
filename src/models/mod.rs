pub mod puzzle;

pub use puzzle::{
    Direction, GeneratedPuzzle, Grid, PlacedWord, Placement, Position, WordCoordinates,
};
