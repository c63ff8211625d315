use liblife::{Grid, Position};

fn grid_with(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(rows, cols).unwrap();
    for pos in alive {
        grid.toggle(*pos).unwrap();
    }
    grid
}

fn shifted(cells: &[(usize, usize)], d_row: isize, d_col: isize, rows: usize, cols: usize) -> Vec<(usize, usize)> {
    cells
        .iter()
        .map(|pos| {
            let Position { row, col } = Position::from(*pos).wrapping_offset(d_row, d_col, rows, cols);
            (row, col)
        })
        .collect()
}

const GLIDER: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];

#[test]
fn block_is_still_life() {
    let block = grid_with(10, 10, &[(4, 4), (4, 5), (5, 4), (5, 5)]);

    let mut grid = block.clone();
    for _ in 0..5 {
        grid.advance();
        assert_eq!(grid, block);
    }
}

#[test]
fn blinker_has_period_two() {
    let horizontal = grid_with(10, 10, &[(5, 4), (5, 5), (5, 6)]);
    let vertical = grid_with(10, 10, &[(4, 5), (5, 5), (6, 5)]);

    let mut grid = horizontal.clone();

    grid.advance();
    assert_eq!(grid, vertical);

    grid.advance();
    assert_eq!(grid, horizontal);
}

#[test]
fn blinker_across_the_edge_oscillates() {
    let horizontal = grid_with(10, 10, &[(0, 9), (0, 0), (0, 1)]);
    let vertical = grid_with(10, 10, &[(9, 0), (0, 0), (1, 0)]);

    let mut grid = horizontal.clone();

    grid.advance();
    assert_eq!(grid, vertical);

    grid.advance();
    assert_eq!(grid, horizontal);
}

#[test]
fn glider_moves_diagonally_and_wraps_home() {
    let mut grid = grid_with(10, 10, GLIDER);

    for _ in 0..4 {
        grid.advance();
    }
    assert_eq!(grid, grid_with(10, 10, &shifted(GLIDER, 1, 1, 10, 10)));

    // Nine more displacements bring it all the way around the torus.
    for _ in 0..36 {
        grid.advance();
    }
    assert_eq!(grid, grid_with(10, 10, GLIDER));
    assert_eq!(grid.generation(), 40);
}

#[test]
fn identical_histories_produce_identical_grids() {
    let edits: &[&[(usize, usize)]] = &[GLIDER, &[(7, 7), (7, 8), (7, 9)], &[(0, 1), (4, 4)]];

    let mut first = Grid::new(9, 11).unwrap();
    let mut second = Grid::new(9, 11).unwrap();

    for batch in edits {
        for pos in *batch {
            first.toggle(*pos).unwrap();
            second.toggle(*pos).unwrap();
        }

        for _ in 0..3 {
            first.advance();
            second.advance();
        }

        assert_eq!(first, second);
    }
}

#[test]
fn corner_sees_diagonal_wraparound_neighbor() {
    let grid = grid_with(3, 3, &[(2, 2)]);

    assert_eq!(grid.neighbor_count((0, 0)), 1);
    assert_eq!(grid.neighbor_count((1, 1)), 1);
}
