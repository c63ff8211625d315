pub use error::GridError;
pub use grid::{CellState, Grid};
pub use pos::Position;

pub mod error;
pub mod grid;
pub mod pos;
pub mod rule;

/// Edge length of one cell in world units, used by presentation layers to lay the grid out.
pub const CELL_SIZE: u32 = 10;
