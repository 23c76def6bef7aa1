pub mod cell;
mod grid;

use std::collections::{HashSet, VecDeque};

pub use cell::Cell;
pub use grid::Grid;

use crate::error::Error;

/// A grid together with its two protected endpoint cells.
///
/// The start and goal are always `Open`; wall edits through
/// [`Maze::toggle_wall`] cannot overwrite them.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    grid: Grid,
    start: (u8, u8),
    goal: (u8, u8),
}

impl Maze {
    /// Wraps a grid with its endpoints. Both endpoints must be in bounds
    /// and are carved open if they are not already.
    pub fn new(mut grid: Grid, start: (u8, u8), goal: (u8, u8)) -> Result<Self, Error> {
        grid.set(start, Cell::Open)?;
        grid.set(goal, Cell::Open)?;
        Ok(Maze { grid, start, goal })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Side length of the underlying grid.
    pub fn size(&self) -> u8 {
        self.grid.size()
    }

    pub fn start(&self) -> (u8, u8) {
        self.start
    }

    pub fn goal(&self) -> (u8, u8) {
        self.goal
    }

    /// Flips a cell between open and wall, returning the new state.
    ///
    /// The start and goal cells are protected and rejected with
    /// [`Error::CellProtected`].
    pub fn toggle_wall(&mut self, coord: (u8, u8)) -> Result<Cell, Error> {
        if coord == self.start || coord == self.goal {
            return Err(Error::CellProtected(coord));
        }
        let flipped = match self.grid.get(coord)? {
            Cell::Open => Cell::Wall,
            Cell::Wall => Cell::Open,
        };
        self.grid.set(coord, flipped)?;
        Ok(flipped)
    }
}

/// Get the in-bounds axis neighbors of a cell, in the fixed order
/// left, right, up, down.
///
/// The fixed order is what keeps BFS tie-breaking deterministic across
/// runs, so it must not change.
pub fn get_neighbors(coord: (u8, u8), grid: &Grid) -> impl Iterator<Item = (u8, u8)> {
    let size = grid.size();
    let candidates: Vec<(u8, u8)> = if grid.is_in_bounds(coord) {
        let (x, y) = coord;
        vec![
            // NOTE: This way of handling underflow/overflow is overflow-safe.
            // When x < 1 or y < 1, wrap x - 1 or y - 1 to u8::MAX to avoid underflow,
            // and automatically filter it out in the comparison.
            // When x + 1 or y + 1 exceeds u8::MAX, set it to u8::MAX to avoid overflow,
            // and automatically filter it out in the comparison (as the largest grid index
            // numerically possible is u8::MAX - 1, while the largest size numerically
            // possible is u8::MAX).
            (x.wrapping_sub(1), y),
            (x.saturating_add(1), y),
            (x, y.wrapping_sub(1)),
            (x, y.saturating_add(1)),
        ]
    } else {
        // No neighbors if the coordinate is out of bounds
        vec![]
    };

    candidates
        .into_iter()
        .filter(move |&(x, y)| x < size && y < size)
}

/// Manhattan distance between two coordinates.
pub fn manhattan(a: (u8, u8), b: (u8, u8)) -> usize {
    a.0.abs_diff(b.0) as usize + a.1.abs_diff(b.1) as usize
}

/// Breadth-first flood fill over open cells.
///
/// Returns true iff `to` can be reached from `from` by axis moves through
/// `Open` cells. Terminates in O(size²); used as the post-generation gate.
pub fn is_reachable(grid: &Grid, from: (u8, u8), to: (u8, u8)) -> bool {
    if !grid.is_in_bounds(from) || !grid.is_in_bounds(to) || grid[from] != Cell::Open {
        return false;
    }
    let mut queue = VecDeque::from([from]);
    let mut seen = HashSet::from([from]);
    while let Some(cell) = queue.pop_front() {
        if cell == to {
            return true;
        }
        for next in get_neighbors(cell, grid) {
            if grid[next] == Cell::Open && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(size: u8) -> Grid {
        let mut grid = Grid::new(size, Cell::Wall);
        (0..size).for_each(|y| {
            (0..size).for_each(|x| {
                grid[(x, y)] = Cell::Open;
            });
        });
        grid
    }

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(5, Cell::Wall);
        grid[(2, 3)] = Cell::Open;
        assert_eq!(grid[(2, 3)], Cell::Open);
        assert_eq!(grid[(3, 2)], Cell::Wall);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(5, Cell::Wall);
        assert!(!grid.is_in_bounds((5, 5)));
        assert!(!grid.is_in_bounds((0, 5)));
        assert!(!grid.is_in_bounds((5, 0)));
        assert!(grid.is_in_bounds((4, 4)));
        assert_eq!(grid.get((5, 0)), Err(Error::OutOfBounds((5, 0))));
    }

    #[test]
    fn test_neighbor_order_is_left_right_up_down() {
        let grid = Grid::new(5, Cell::Wall);
        let neighbors = get_neighbors((2, 2), &grid).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 2), (3, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_neighbors_clipped_at_corner() {
        let grid = Grid::new(5, Cell::Wall);
        let neighbors = get_neighbors((0, 0), &grid).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 0), (0, 1)]);
        let neighbors = get_neighbors((4, 4), &grid).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(3, 4), (4, 3)]);
    }

    #[test]
    fn test_new_maze_carves_endpoints_open() {
        let grid = Grid::new(5, Cell::Wall);
        let maze = Maze::new(grid, (0, 0), (4, 4)).unwrap();
        assert_eq!(maze.grid()[(0, 0)], Cell::Open);
        assert_eq!(maze.grid()[(4, 4)], Cell::Open);
    }

    #[test]
    fn test_new_maze_rejects_out_of_bounds_endpoint() {
        let grid = Grid::new(5, Cell::Wall);
        assert_eq!(
            Maze::new(grid, (0, 0), (5, 5)).unwrap_err(),
            Error::OutOfBounds((5, 5))
        );
    }

    #[test]
    fn test_toggle_wall_flips_and_protects() {
        let mut maze = Maze::new(open_grid(5), (0, 0), (4, 4)).unwrap();
        assert_eq!(maze.toggle_wall((2, 2)), Ok(Cell::Wall));
        assert_eq!(maze.toggle_wall((2, 2)), Ok(Cell::Open));
        assert_eq!(maze.toggle_wall((0, 0)), Err(Error::CellProtected((0, 0))));
        assert_eq!(maze.toggle_wall((4, 4)), Err(Error::CellProtected((4, 4))));
        assert_eq!(maze.toggle_wall((9, 9)), Err(Error::OutOfBounds((9, 9))));
        // Rejected edits leave the endpoints open
        assert_eq!(maze.grid()[(0, 0)], Cell::Open);
    }

    #[test]
    fn test_reachability_on_open_grid() {
        let grid = open_grid(5);
        assert!(is_reachable(&grid, (0, 0), (4, 4)));
        assert!(is_reachable(&grid, (0, 0), (0, 0)));
    }

    #[test]
    fn test_reachability_blocked_by_wall_line() {
        let mut grid = open_grid(5);
        (0..5).for_each(|y| grid[(2, y)] = Cell::Wall);
        assert!(!is_reachable(&grid, (0, 0), (4, 4)));
        assert!(is_reachable(&grid, (0, 0), (1, 4)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((0, 0), (4, 4)), 8);
        assert_eq!(manhattan((3, 1), (1, 2)), 3);
        assert_eq!(manhattan((2, 2), (2, 2)), 0);
    }
}
