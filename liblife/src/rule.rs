/// Conway's B3/S23 rule: whether a cell is alive in the next generation.
pub fn next_state(alive: bool, alive_neighbors: u8) -> bool {
    match (alive, alive_neighbors) {
        (_, 3) => true,
        (true, 2) => true,
        _ => false,
    }
}
