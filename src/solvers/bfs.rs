use std::collections::{HashMap, HashSet, VecDeque};

use super::{Phase, StepEvent, reconstruct_path};
use crate::maze::{Cell, Grid, get_neighbors};

/// Breadth-first run: FIFO frontier, neighbors visited and parented at
/// push time, so every cell is settled exactly once and the reconstructed
/// path is shortest in edge count.
pub(super) struct BfsRun {
    grid: Grid,
    start: (u8, u8),
    goal: (u8, u8),
    frontier: VecDeque<(u8, u8)>,
    visited: HashSet<(u8, u8)>,
    parents: HashMap<(u8, u8), (u8, u8)>,
    phase: Phase,
}

impl BfsRun {
    pub(super) fn new(grid: Grid, start: (u8, u8), goal: (u8, u8)) -> Self {
        BfsRun {
            grid,
            start,
            goal,
            frontier: VecDeque::from([start]),
            visited: HashSet::from([start]),
            parents: HashMap::new(),
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
                let cell = self.frontier.pop_front()?;
                if cell == self.goal {
                    self.phase = Phase::GoalSettled;
                } else {
                    for next in get_neighbors(cell, &self.grid) {
                        if self.grid[next] == Cell::Open && self.visited.insert(next) {
                            self.parents.insert(next, cell);
                            self.frontier.push_back(next);
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
