use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_set::RandSetDefault;

use crate::{
    error::Error,
    maze::{Cell, Grid, Maze, is_reachable, manhattan},
};

/// Retry budget shared by border-point sampling and whole-maze retries.
const MAX_ATTEMPTS: usize = 10_000;
/// Minimum Manhattan distance between the start and goal border points.
const MIN_ENDPOINT_DISTANCE: usize = 3;

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Generates a solvable maze of the given size.
///
/// `size` must be odd and at least 5 so the carver has an interior
/// odd-coordinate lattice to work on; anything else is a programmer error.
/// Generation is retried until the endpoints are connected, as an explicit
/// bounded loop. The budget is effectively unreachable for reasonable
/// sizes, but exceeding it fails with [`Error::GenerationFailed`] rather
/// than looping forever.
pub fn generate(size: u8, seed: Option<u64>) -> Result<Maze, Error> {
    assert!(
        size >= 5 && size % 2 == 1,
        "maze size must be odd and at least 5, got {}",
        size
    );
    let mut rng = get_rng(seed);
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        if attempts > MAX_ATTEMPTS {
            tracing::warn!("[generator] retry budget exhausted after {} attempts", attempts);
            return Err(Error::GenerationFailed);
        }

        let (start, goal) = pick_endpoints(size, &mut rng, &mut attempts)?;
        let mut grid = Grid::new(size, Cell::Wall);
        carve(&mut grid, &mut rng);
        // Carving only touches the interior, so this re-opens the border
        // endpoints no matter what the carver did.
        let maze = Maze::new(grid, start, goal)?;

        if is_reachable(maze.grid(), start, goal) {
            tracing::debug!(
                "[generator] generated {}x{} maze, start {:?}, goal {:?}, {} attempts",
                size,
                size,
                start,
                goal,
                attempts
            );
            return Ok(maze);
        }
        tracing::debug!("[generator] endpoints not connected, regenerating");
    }
}

/// Picks two distinct random border points at Manhattan distance of at
/// least [`MIN_ENDPOINT_DISTANCE`] by rejection sampling, charged against
/// the caller's attempt budget.
fn pick_endpoints(
    size: u8,
    rng: &mut StdRng,
    attempts: &mut usize,
) -> Result<((u8, u8), (u8, u8)), Error> {
    let last = size - 1;
    let border: Vec<(u8, u8)> = (0..size)
        .map(|x| (x, 0))
        .chain((0..size).map(|x| (x, last)))
        .chain((0..size).map(|y| (0, y)))
        .chain((0..size).map(|y| (last, y)))
        .collect();
    loop {
        *attempts += 1;
        if *attempts > MAX_ATTEMPTS {
            return Err(Error::GenerationFailed);
        }
        let start = border[rng.random_range(0..border.len())];
        let goal = border[rng.random_range(0..border.len())];
        if manhattan(start, goal) >= MIN_ENDPOINT_DISTANCE {
            return Ok((start, goal));
        }
    }
}

/// Carves a perfect maze into the full-wall `grid` with randomized
/// Prim's-style wall addition on the odd-coordinate lattice: open a random
/// odd interior seed, then repeatedly open a random still-walled frontier
/// candidate together with the midpoint back to the cell it was reached
/// from.
fn carve(grid: &mut Grid, rng: &mut StdRng) {
    let size = grid.size();
    let seed = (
        rng.random_range(0..size / 2) * 2 + 1,
        rng.random_range(0..size / 2) * 2 + 1,
    );
    grid[seed] = Cell::Open;

    let mut frontier = wall_candidates(grid, seed)
        .into_iter()
        .collect::<RandSetDefault<_>>();

    // Pick a random frontier entry until the lattice is exhausted
    while let Some(&(candidate, origin)) = frontier.get_rand() {
        frontier.remove(&(candidate, origin));
        if grid[candidate] == Cell::Wall {
            grid[candidate] = Cell::Open;
            // Widen before adding: coordinates near u8::MAX would overflow
            let midpoint = (
                ((candidate.0 as u16 + origin.0 as u16) / 2) as u8,
                ((candidate.1 as u16 + origin.1 as u16) / 2) as u8,
            );
            grid[midpoint] = Cell::Open;
            for pair in wall_candidates(grid, candidate) {
                frontier.insert(pair);
            }
        }
    }
}

/// `(candidate, origin)` pairs for the cells two steps out from `origin`
/// in each axis direction, restricted to still-walled, strictly interior
/// cells.
fn wall_candidates(grid: &Grid, origin: (u8, u8)) -> Vec<((u8, u8), (u8, u8))> {
    let limit = grid.size() as i16 - 1;
    let (x, y) = (origin.0 as i16, origin.1 as i16);
    [(2, 0), (-2, 0), (0, 2), (0, -2)]
        .into_iter()
        .filter_map(|(dx, dy)| {
            let (cx, cy) = (x + dx, y + dy);
            ((1..limit).contains(&cx) && (1..limit).contains(&cy))
                .then_some(((cx as u8, cy as u8), origin))
        })
        .filter(|&(candidate, _)| grid[candidate] == Cell::Wall)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_mazes_satisfy_invariants() {
        for seed in 0..10 {
            let maze = generate(31, Some(seed)).unwrap();
            let grid = maze.grid();
            for endpoint in [maze.start(), maze.goal()] {
                assert_eq!(grid[endpoint], Cell::Open);
                assert!(grid.is_border(endpoint));
            }
            assert!(manhattan(maze.start(), maze.goal()) >= MIN_ENDPOINT_DISTANCE);
            assert!(is_reachable(grid, maze.start(), maze.goal()));
        }
    }

    #[test]
    fn test_smallest_size_generates() {
        let maze = generate(5, Some(0)).unwrap();
        assert_eq!(maze.size(), 5);
        assert!(is_reachable(maze.grid(), maze.start(), maze.goal()));
    }

    #[test]
    fn test_carver_opens_the_odd_lattice() {
        let maze = generate(31, Some(42)).unwrap();
        let grid = maze.grid();
        // Every odd interior coordinate is part of the carved tree.
        for y in (1u8..31).step_by(2) {
            for x in (1u8..31).step_by(2) {
                assert_eq!(grid[(x, y)], Cell::Open, "lattice cell ({}, {}) walled", x, y);
            }
        }
    }

    #[test]
    #[should_panic(expected = "odd and at least 5")]
    fn test_even_size_is_rejected() {
        let _ = generate(30, Some(0));
    }

    #[test]
    #[should_panic(expected = "odd and at least 5")]
    fn test_tiny_size_is_rejected() {
        let _ = generate(3, Some(0));
    }
}
