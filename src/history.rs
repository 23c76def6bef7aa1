use std::collections::VecDeque;

use crate::{maze::Maze, solvers::Solver};

/// One recorded editing state: a deep copy of the maze plus the algorithm
/// selection at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub maze: Maze,
    pub solver: Solver,
}

/// Bounded undo/redo stacks of maze snapshots.
///
/// Recording an edit invalidates the redo branch. Undo and redo move the
/// caller's current state onto the opposite stack before popping, so an
/// undo followed by a redo restores the pre-undo state exactly. Snapshots
/// are full deep copies; this is O(size²) per operation, which is fine for
/// interactive use on grids this small.
pub struct EditHistory {
    /// Most recent snapshot at the back; oldest evicted past the cap.
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    max_entries: usize,
}

impl EditHistory {
    pub fn new(max_entries: usize) -> Self {
        EditHistory {
            undo: VecDeque::with_capacity(max_entries),
            redo: Vec::new(),
            max_entries,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Records the state that is about to be edited. Clears the redo
    /// stack and evicts the oldest snapshot past the cap.
    pub fn record(&mut self, maze: &Maze, solver: Solver) {
        if self.max_entries == 0 {
            return;
        }
        if self.undo.len() == self.max_entries {
            self.undo.pop_front();
        }
        self.undo.push_back(Snapshot {
            maze: maze.clone(),
            solver,
        });
        self.redo.clear();
    }

    /// Pops the most recent snapshot, parking `current` on the redo
    /// stack. Hands `current` back unchanged when there is nothing to
    /// undo.
    pub fn undo(&mut self, current: Snapshot) -> Snapshot {
        match self.undo.pop_back() {
            Some(snapshot) => {
                self.redo.push(current);
                snapshot
            }
            None => current,
        }
    }

    /// Mirror of [`EditHistory::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Snapshot {
        match self.redo.pop() {
            Some(snapshot) => {
                if self.undo.len() == self.max_entries {
                    self.undo.pop_front();
                }
                self.undo.push_back(current);
                snapshot
            }
            None => current,
        }
    }

    /// Drops both stacks, used when a new maze replaces the session.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cell, Grid};

    fn open_maze() -> Maze {
        let mut grid = Grid::new(5, Cell::Wall);
        (0..5).for_each(|y| {
            (0..5).for_each(|x| {
                grid[(x, y)] = Cell::Open;
            });
        });
        Maze::new(grid, (0, 0), (4, 4)).unwrap()
    }

    fn snapshot(maze: &Maze, solver: Solver) -> Snapshot {
        Snapshot {
            maze: maze.clone(),
            solver,
        }
    }

    #[test]
    fn test_undo_then_redo_restores_exactly() {
        let mut history = EditHistory::new(50);
        let before = open_maze();
        let mut maze = before.clone();

        history.record(&maze, Solver::Bfs);
        maze.toggle_wall((2, 2)).unwrap();
        let after = maze.clone();

        let restored = history.undo(snapshot(&maze, Solver::AStar));
        assert_eq!(restored.maze, before);
        assert_eq!(restored.solver, Solver::Bfs);

        let redone = history.redo(restored.clone());
        assert_eq!(redone.maze, after);
        assert_eq!(redone.solver, Solver::AStar);
    }

    #[test]
    fn test_undo_on_empty_history_is_a_noop() {
        let mut history = EditHistory::new(50);
        let current = snapshot(&open_maze(), Solver::Dfs);
        assert!(!history.can_undo());
        assert_eq!(history.undo(current.clone()), current);
        assert_eq!(history.redo(current.clone()), current);
    }

    #[test]
    fn test_undo_stack_is_capped_at_fifty() {
        let mut history = EditHistory::new(50);
        let mut maze = open_maze();
        // First recorded state is (1, 1) walled; it should be evicted.
        for i in 0..55u8 {
            maze.toggle_wall((1 + (i % 3), 1)).unwrap();
            history.record(&maze, Solver::Bfs);
        }
        assert_eq!(history.undo_depth(), 50);
        // Unwind everything; the final restore is the 6th recorded state,
        // not the 1st.
        let mut current = snapshot(&maze, Solver::Bfs);
        while history.can_undo() {
            current = history.undo(current);
        }
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.undo(current.clone()), current);
    }

    #[test]
    fn test_fresh_edit_clears_redo() {
        let mut history = EditHistory::new(50);
        let mut maze = open_maze();

        history.record(&maze, Solver::Bfs);
        maze.toggle_wall((2, 2)).unwrap();

        let restored = history.undo(snapshot(&maze, Solver::Bfs));
        assert!(history.can_redo());

        // A new edit branches off; the redo future is gone.
        history.record(&restored.maze, Solver::Bfs);
        assert!(!history.can_redo());
        let current = snapshot(&restored.maze, Solver::Bfs);
        assert_eq!(history.redo(current.clone()), current);
    }

    #[test]
    fn test_zero_capacity_keeps_no_history() {
        let mut history = EditHistory::new(0);
        let maze = open_maze();
        history.record(&maze, Solver::Bfs);
        assert!(!history.can_undo());
    }
}
