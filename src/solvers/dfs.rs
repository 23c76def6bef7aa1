use std::collections::{HashMap, HashSet};

use rand::{rngs::StdRng, seq::SliceRandom};

use super::{Phase, StepEvent, reconstruct_path};
use crate::maze::{Cell, Grid, get_neighbors};

/// Depth-first run: LIFO frontier with neighbors pushed in freshly
/// shuffled order every step, so exploration is deliberately not
/// reproducible across runs. The found path carries no shortest-path
/// guarantee.
pub(super) struct DfsRun {
    grid: Grid,
    start: (u8, u8),
    goal: (u8, u8),
    frontier: Vec<(u8, u8)>,
    visited: HashSet<(u8, u8)>,
    parents: HashMap<(u8, u8), (u8, u8)>,
    phase: Phase,
    rng: StdRng,
}

impl DfsRun {
    pub(super) fn new(grid: Grid, start: (u8, u8), goal: (u8, u8)) -> Self {
        DfsRun {
            grid,
            start,
            goal,
            frontier: vec![start],
            visited: HashSet::from([start]),
            parents: HashMap::new(),
            phase: Phase::Searching,
            rng: crate::generator::get_rng(None),
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
                let cell = self.frontier.pop()?;
                if cell == self.goal {
                    self.phase = Phase::GoalSettled;
                } else {
                    let mut neighbors = get_neighbors(cell, &self.grid).collect::<Vec<_>>();
                    neighbors.shuffle(&mut self.rng);
                    for next in neighbors {
                        if self.grid[next] == Cell::Open && self.visited.insert(next) {
                            self.parents.insert(next, cell);
                            self.frontier.push(next);
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
