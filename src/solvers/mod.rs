use std::collections::{HashMap, HashSet};

mod astar;
mod bfs;
mod dfs;

use astar::AStarRun;
use bfs::BfsRun;
use dfs::DfsRun;

use crate::{error::Error, maze::Grid};

/// The pathfinding algorithms the visualizer can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Bfs,
    Dfs,
    AStar,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl Solver {
    /// Short label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            Solver::Bfs => "BFS",
            Solver::Dfs => "DFS",
            Solver::AStar => "A*",
        }
    }

    /// Begins a resumable search run over a snapshot of `grid`.
    ///
    /// Endpoints are validated here rather than discovered mid-run. The
    /// run clones the grid, so later edits to the caller's maze do not
    /// affect a search already in flight.
    pub fn start_run(
        &self,
        grid: &Grid,
        start: (u8, u8),
        goal: (u8, u8),
    ) -> Result<SearchRun, Error> {
        for endpoint in [start, goal] {
            if !grid.is_in_bounds(endpoint) {
                return Err(Error::OutOfBounds(endpoint));
            }
        }
        let grid = grid.clone();
        let inner = match self {
            Solver::Bfs => RunInner::Bfs(BfsRun::new(grid, start, goal)),
            Solver::Dfs => RunInner::Dfs(DfsRun::new(grid, start, goal)),
            Solver::AStar => RunInner::AStar(AStarRun::new(grid, start, goal)),
        };
        Ok(SearchRun { inner })
    }
}

/// One step's worth of progress from a search run.
#[derive(Debug, PartialEq)]
pub enum StepEvent<'a> {
    /// The run settled `cell`; `visited` is everything seen so far.
    ///
    /// The set is a live borrow of the engine's own state, valid only
    /// until the next `advance`. Callers keeping exploration state across
    /// ticks should accumulate the settled cells instead of cloning the
    /// whole set every step.
    Explored {
        cell: (u8, u8),
        visited: &'a HashSet<(u8, u8)>,
    },
    /// Terminal event: the path from start (exclusive) to goal
    /// (inclusive). No events follow.
    Done { path: Vec<(u8, u8)> },
}

/// A resumable search over a fixed (grid, start, goal) triple.
///
/// The driver pulls one settled cell per [`SearchRun::advance`] call and
/// may stop pulling at any point; the run owns all of its state, so
/// dropping it mid-run is always safe. `None` means the frontier is
/// exhausted without reaching the goal (the maze is unsolvable), or that
/// the run already finished.
pub struct SearchRun {
    inner: RunInner,
}

enum RunInner {
    Bfs(BfsRun),
    Dfs(DfsRun),
    AStar(AStarRun),
}

impl SearchRun {
    /// Advances the search by one settled cell.
    pub fn advance(&mut self) -> Option<StepEvent<'_>> {
        match &mut self.inner {
            RunInner::Bfs(run) => run.advance(),
            RunInner::Dfs(run) => run.advance(),
            RunInner::AStar(run) => run.advance(),
        }
    }
}

/// Where a run is in its lifecycle.
#[derive(Debug, PartialEq)]
enum Phase {
    /// Still expanding the frontier.
    Searching,
    /// The goal was settled last step; `Done` comes next.
    GoalSettled,
    /// `Done` was emitted; no more events.
    Finished,
}

/// Walks the parent map from `goal` back to `start` and reverses,
/// yielding the path with `start` excluded and `goal` included.
///
/// Only called once the goal has been settled, so the parent chain is
/// complete by construction.
fn reconstruct_path(
    parents: &HashMap<(u8, u8), (u8, u8)>,
    start: (u8, u8),
    goal: (u8, u8),
) -> Vec<(u8, u8)> {
    let mut path = Vec::new();
    let mut node = goal;
    while node != start {
        path.push(node);
        node = parents[&node];
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cell, get_neighbors, manhattan};
    use std::collections::VecDeque;

    fn open_grid(size: u8) -> Grid {
        let mut grid = Grid::new(size, Cell::Wall);
        (0..size).for_each(|y| {
            (0..size).for_each(|x| {
                grid[(x, y)] = Cell::Open;
            });
        });
        grid
    }

    /// Pulls a run to its terminal outcome, returning the path if one was
    /// found along with every cell reported as explored, in order.
    fn run_to_completion(run: &mut SearchRun) -> (Option<Vec<(u8, u8)>>, Vec<(u8, u8)>) {
        let mut explored = Vec::new();
        loop {
            match run.advance() {
                Some(StepEvent::Explored { cell, visited }) => {
                    assert!(visited.contains(&cell));
                    explored.push(cell);
                }
                Some(StepEvent::Done { path }) => return (Some(path), explored),
                None => return (None, explored),
            }
        }
    }

    /// Independent shortest-distance computation to verify BFS/A* against.
    fn flood_fill_distance(grid: &Grid, from: (u8, u8), to: (u8, u8)) -> Option<usize> {
        let mut queue = VecDeque::from([(from, 0usize)]);
        let mut seen = std::collections::HashSet::from([from]);
        while let Some((cell, dist)) = queue.pop_front() {
            if cell == to {
                return Some(dist);
            }
            for next in get_neighbors(cell, grid) {
                if grid[next] == Cell::Open && seen.insert(next) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }

    #[test]
    fn test_bfs_shortest_path_on_open_grid() {
        let grid = open_grid(5);
        let mut run = Solver::Bfs.start_run(&grid, (0, 0), (4, 4)).unwrap();
        let (path, _) = run_to_completion(&mut run);
        let path = path.unwrap();
        // Manhattan distance with no obstacles: 8 edges
        assert_eq!(path.len(), 8);
        assert_eq!(*path.last().unwrap(), (4, 4));
        assert!(!path.contains(&(0, 0)));
    }

    #[test]
    fn test_center_wall_does_not_change_bfs_length() {
        let mut grid = open_grid(5);
        grid[(2, 2)] = Cell::Wall;
        let mut run = Solver::Bfs.start_run(&grid, (0, 0), (4, 4)).unwrap();
        let (path, _) = run_to_completion(&mut run);
        assert_eq!(path.unwrap().len(), 8);
    }

    #[test]
    fn test_bfs_matches_flood_fill_on_generated_mazes() {
        for seed in 0..5 {
            let maze = crate::generator::generate(31, Some(seed)).unwrap();
            let expected = flood_fill_distance(maze.grid(), maze.start(), maze.goal()).unwrap();
            let mut run = Solver::Bfs
                .start_run(maze.grid(), maze.start(), maze.goal())
                .unwrap();
            let (path, _) = run_to_completion(&mut run);
            assert_eq!(path.unwrap().len(), expected);
        }
    }

    #[test]
    fn test_astar_matches_bfs_length() {
        for seed in 0..5 {
            let maze = crate::generator::generate(31, Some(seed)).unwrap();
            let mut bfs = Solver::Bfs
                .start_run(maze.grid(), maze.start(), maze.goal())
                .unwrap();
            let mut astar = Solver::AStar
                .start_run(maze.grid(), maze.start(), maze.goal())
                .unwrap();
            let (bfs_path, _) = run_to_completion(&mut bfs);
            let (astar_path, _) = run_to_completion(&mut astar);
            assert_eq!(bfs_path.unwrap().len(), astar_path.unwrap().len());
        }
    }

    #[test]
    fn test_dfs_path_is_a_simple_open_path() {
        let maze = crate::generator::generate(31, Some(7)).unwrap();
        let mut run = Solver::Dfs
            .start_run(maze.grid(), maze.start(), maze.goal())
            .unwrap();
        let (path, _) = run_to_completion(&mut run);
        let path = path.unwrap();
        assert_eq!(*path.last().unwrap(), maze.goal());
        // No repeated coordinates
        let distinct = path.iter().collect::<std::collections::HashSet<_>>();
        assert_eq!(distinct.len(), path.len());
        // Every hop is an axis move over open cells, starting next to the start
        assert_eq!(manhattan(maze.start(), path[0]), 1);
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
        for &cell in &path {
            assert_eq!(maze.grid()[cell], Cell::Open);
        }
    }

    #[test]
    fn test_sealed_goal_exhausts_every_solver() {
        // Wall off both neighbors of the corner goal
        let mut grid = open_grid(5);
        grid[(3, 4)] = Cell::Wall;
        grid[(4, 3)] = Cell::Wall;
        for solver in [Solver::Bfs, Solver::Dfs, Solver::AStar] {
            let mut run = solver.start_run(&grid, (0, 0), (4, 4)).unwrap();
            let (path, explored) = run_to_completion(&mut run);
            assert_eq!(path, None, "{} found a path into a sealed goal", solver);
            assert!(!explored.is_empty());
        }
    }

    #[test]
    fn test_goal_is_explored_before_done() {
        let grid = open_grid(5);
        for solver in [Solver::Bfs, Solver::Dfs, Solver::AStar] {
            let mut run = solver.start_run(&grid, (0, 0), (4, 4)).unwrap();
            let (path, explored) = run_to_completion(&mut run);
            assert!(path.is_some());
            assert_eq!(*explored.last().unwrap(), (4, 4));
        }
    }

    #[test]
    fn test_each_cell_settled_at_most_once() {
        // The open grid forces plenty of duplicate A* frontier entries
        let grid = open_grid(7);
        for solver in [Solver::Bfs, Solver::Dfs, Solver::AStar] {
            let mut run = solver.start_run(&grid, (0, 0), (6, 6)).unwrap();
            let (_, explored) = run_to_completion(&mut run);
            let distinct = explored.iter().collect::<std::collections::HashSet<_>>();
            assert_eq!(distinct.len(), explored.len(), "{} re-settled a cell", solver);
        }
    }

    #[test]
    fn test_no_events_after_done() {
        let grid = open_grid(5);
        let mut run = Solver::Bfs.start_run(&grid, (0, 0), (4, 4)).unwrap();
        let (path, _) = run_to_completion(&mut run);
        assert!(path.is_some());
        assert!(run.advance().is_none());
        assert!(run.advance().is_none());
    }

    #[test]
    fn test_start_run_rejects_out_of_bounds_endpoints() {
        let grid = open_grid(5);
        assert!(matches!(
            Solver::Bfs.start_run(&grid, (5, 0), (4, 4)),
            Err(Error::OutOfBounds((5, 0)))
        ));
        assert!(matches!(
            Solver::AStar.start_run(&grid, (0, 0), (0, 9)),
            Err(Error::OutOfBounds((0, 9)))
        ));
    }

    #[test]
    fn test_first_event_explores_the_start() {
        let grid = open_grid(5);
        let mut run = Solver::AStar.start_run(&grid, (2, 2), (4, 4)).unwrap();
        match run.advance() {
            Some(StepEvent::Explored { cell, visited }) => {
                assert_eq!(cell, (2, 2));
                assert_eq!(visited.len(), 1);
            }
            other => panic!("expected an Explored event, got {:?}", other),
        }
    }
}
