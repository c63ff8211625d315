use std::fmt;

/// A cell address on the grid. Rows grow downwards, columns to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offsets this position by `(d_row, d_col)`, wrapping around a `rows` x `cols` torus.
    pub fn wrapping_offset(self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> Self {
        Self {
            row: wrap(self.row, d_row, rows),
            col: wrap(self.col, d_col, cols),
        }
    }
}

fn wrap(center: usize, offset: isize, extent: usize) -> usize {
    let extent = extent as isize;
    let center = center as isize % extent;

    (center + offset).rem_euclid(extent) as usize
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for Position {
    fn from(value: [usize; 2]) -> Self {
        Self {
            row: value[0],
            col: value[1],
        }
    }
}

impl From<Position> for [usize; 2] {
    fn from(value: Position) -> Self {
        [value.row, value.col]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
