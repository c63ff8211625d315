use std::mem;

use itertools::Itertools;

use crate::{error::GridError, pos::Position, rule};

/// A fixed-size toroidal Game of Life grid.
///
/// Holds the live cell buffer plus a scratch buffer of the same shape that is only
/// meaningful while [`Grid::advance`] runs.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    next_cells: Vec<bool>,
    generation: u64,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions);
        }

        // A Vec can't hold more than isize::MAX bytes.
        let cell_count = rows
            .checked_mul(cols)
            .filter(|cell_count| *cell_count <= isize::MAX as usize)
            .ok_or(GridError::TooLarge { rows, cols })?;

        Ok(Self {
            rows,
            cols,
            cells: vec![false; cell_count],
            next_cells: vec![false; cell_count],
            generation: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of advances performed since the grid was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }

    pub fn is_alive<P>(&self, pos: P) -> Result<bool, GridError>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        Ok(self.cells[index])
    }

    /// Flips a single cell and returns its new liveness.
    pub fn toggle<P>(&mut self, pos: P) -> Result<bool, GridError>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        let cell = &mut self.cells[index];
        *cell = !*cell;

        Ok(*cell)
    }

    /// Counts the live cells among the eight toroidal neighbors of `pos`.
    ///
    /// The center itself is wrapped into range first, so this never fails.
    pub fn neighbor_count<P>(&self, pos: P) -> u8
    where
        P: Into<Position>,
    {
        const NEIGHBOR_OFFSETS: &[[isize; 2]] = &[
            [-1, -1],
            [-1, 0],
            [-1, 1],
            [0, -1],
            [0, 1],
            [1, -1],
            [1, 0],
            [1, 1],
        ];

        let center = pos.into();

        NEIGHBOR_OFFSETS
            .iter()
            .map(|[d_row, d_col]| center.wrapping_offset(*d_row, *d_col, self.rows, self.cols))
            .filter(|neighbor| self.cells[self.index_unchecked(*neighbor)])
            .count() as u8
    }

    /// Moves every cell to the next generation at once.
    ///
    /// Each cell is computed from the pre-advance buffer into the scratch buffer,
    /// which then becomes the live buffer.
    pub fn advance(&mut self) {
        for index in 0..self.cells.len() {
            let pos = self.index_to_pos(index);
            let next = rule::next_state(self.cells[index], self.neighbor_count(pos));
            self.next_cells[index] = next;
        }

        mem::swap(&mut self.cells, &mut self.next_cells);
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Clears the grid and brings exactly `alive_cells` distinct random cells to life.
    pub fn randomize(&mut self, alive_cells: usize) -> Result<(), GridError> {
        let capacity = self.cells.len();
        if alive_cells > capacity {
            return Err(GridError::TooManyCells {
                requested: alive_cells,
                capacity,
            });
        }

        self.clear();

        let mut available_positions = (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(Position::from)
            .collect_vec();

        for _ in 0..alive_cells {
            let chosen_index = rand::random_range(0..available_positions.len());
            let chosen_position = available_positions.swap_remove(chosen_index);

            let index = self.index_unchecked(chosen_position);
            self.cells[index] = true;
        }

        log::debug!("Randomized {}x{} grid with {alive_cells} alive cells", self.rows, self.cols);
        Ok(())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, alive)| (self.index_to_pos(index), CellState::from(*alive)))
    }

    fn pos_to_index<P>(&self, pos: P) -> Result<usize, GridError>
    where
        P: Into<Position>,
    {
        let pos = pos.into();

        if pos.row >= self.rows || pos.col >= self.cols {
            return Err(GridError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(self.index_unchecked(pos))
    }

    fn index_unchecked(&self, pos: Position) -> usize {
        pos.col + pos.row * self.cols
    }

    fn index_to_pos(&self, index: usize) -> Position {
        Position {
            row: index / self.cols,
            col: index % self.cols,
        }
    }
}

// The scratch buffer and generation counter are not part of a grid's state.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.cells == other.cells
    }
}

impl Eq for Grid {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}
