use thiserror::Error;

use crate::pos::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1")]
    EmptyDimensions,

    #[error("a {rows}x{cols} grid is too large to allocate")]
    TooLarge { rows: usize, cols: usize },

    #[error("cell {pos} is outside of the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },

    #[error("cannot place {requested} alive cells on a grid of {capacity} cells")]
    TooManyCells { requested: usize, capacity: usize },
}
