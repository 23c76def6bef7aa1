use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{Phase, StepEvent, reconstruct_path};
use crate::maze::{Cell, Grid, get_neighbors, manhattan};

/// A* run: min-priority frontier keyed by (estimated total cost, cost so
/// far) with the Manhattan heuristic and unit edge cost, so the found
/// path is optimal and ties on the estimate break toward the cheaper
/// cell. Stale frontier entries are lazily discarded: a cell may sit in
/// the heap several times, but it is settled, and reported as explored,
/// at most once.
pub(super) struct AStarRun {
    grid: Grid,
    start: (u8, u8),
    goal: (u8, u8),
    /// Reverse turns the std max-heap into a min-heap; entries are
    /// (estimated total cost, cost so far, cell).
    frontier: BinaryHeap<Reverse<(usize, usize, (u8, u8))>>,
    visited: HashSet<(u8, u8)>,
    parents: HashMap<(u8, u8), (u8, u8)>,
    /// Best known cost so far to reach each cell from the start.
    costs: HashMap<(u8, u8), usize>,
    phase: Phase,
}

impl AStarRun {
    pub(super) fn new(grid: Grid, start: (u8, u8), goal: (u8, u8)) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((manhattan(start, goal), 0, start)));
        AStarRun {
            grid,
            start,
            goal,
            frontier,
            visited: HashSet::new(),
            parents: HashMap::new(),
            costs: HashMap::from([(start, 0)]),
            phase: Phase::Searching,
        }
    }

    pub(super) fn advance(&mut self) -> Option<StepEvent<'_>> {
        match self.phase {
            Phase::Finished => None,
            Phase::GoalSettled => {
                self.phase = Phase::Finished;
                Some(StepEvent::Done {
                    path: reconstruct_path(&self.parents, self.start, self.goal),
                })
            }
            Phase::Searching => {
                // Lazy deletion: pop until we find a cell that has not been
                // settled yet, so one advance settles exactly one cell.
                let (cell, cost) = loop {
                    let Reverse((_, cost, cell)) = self.frontier.pop()?;
                    if self.visited.insert(cell) {
                        break (cell, cost);
                    }
                };
                if cell == self.goal {
                    self.phase = Phase::GoalSettled;
                } else {
                    for next in get_neighbors(cell, &self.grid) {
                        if self.grid[next] != Cell::Open {
                            continue;
                        }
                        let tentative = cost + 1;
                        let improves = match self.costs.get(&next) {
                            Some(&best) => tentative < best,
                            None => true,
                        };
                        if improves {
                            self.costs.insert(next, tentative);
                            self.parents.insert(next, cell);
                            self.frontier.push(Reverse((
                                tentative + manhattan(next, self.goal),
                                tentative,
                                next,
                            )));
                        }
                    }
                }
                Some(StepEvent::Explored {
                    cell,
                    visited: &self.visited,
                })
            }
        }
    }
}
