mod renderer;

use std::{
    collections::HashSet,
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    terminal::{self, ClearType},
};

use crate::{
    error::Error,
    generator,
    history::{EditHistory, Snapshot},
    maze::Maze,
    solvers::{SearchRun, Solver, StepEvent},
};
use renderer::{Frame, Renderer};

/// What the session is doing between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// No run in flight; the cursor is live and cells can be edited.
    Editing,
    /// A run is advanced one step per tick.
    Solving,
    /// A run is suspended; resuming picks up where it left off.
    Paused,
}

#[derive(Debug, Copy, Clone)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The interactive session: one maze, one algorithm selection, an edit
/// history, and at most one search run in flight.
///
/// Everything runs on a single thread. Each frame draws the current
/// state, waits up to the step delay for input, and then advances the
/// active run by exactly one step, so pausing is simply not calling
/// `advance` and cancelling is dropping the run.
pub struct App {
    maze: Maze,
    solver: Solver,
    history: EditHistory,
    run: Option<SearchRun>,
    mode: Mode,
    cursor: (u8, u8),
    /// Settled cells accumulated from `Explored` events for display.
    explored: HashSet<(u8, u8)>,
    /// Most recent solution path, if any.
    path: Vec<(u8, u8)>,
    /// The cell the active run settled last.
    agent: Option<(u8, u8)>,
    step_delay: Duration,
    status: String,
}

impl App {
    /// Undo stack capacity.
    const MAX_HISTORY_SNAPSHOTS: usize = 50;
    /// Default animation delay per search step.
    const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);
    const MIN_STEP_DELAY: Duration = Duration::from_millis(1);
    const MAX_STEP_DELAY: Duration = Duration::from_millis(500);

    /// Generates the initial maze and sets up the session state.
    pub fn new(size: u8, seed: Option<u64>) -> Result<Self, Error> {
        let maze = generator::generate(size, seed)?;
        Ok(App {
            maze,
            solver: Solver::Bfs,
            history: EditHistory::new(App::MAX_HISTORY_SNAPSHOTS),
            run: None,
            mode: Mode::Editing,
            cursor: (size / 2, size / 2),
            explored: HashSet::new(),
            path: Vec::new(),
            agent: None,
            step_delay: App::DEFAULT_STEP_DELAY,
            status: "Generated a new maze".to_string(),
        })
    }

    /// Set a panic hook to restore terminal state on panic, so the
    /// terminal is not left in raw mode or the alternate screen.
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen.
    /// Also sets a panic hook to restore terminal on panic.
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state: leave the alternate screen and
    /// disable raw mode.
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main session loop: draw, poll for one tick's worth of input,
    /// advance the active run by one step.
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut renderer = Renderer::new();
        tracing::info!("[app] started session loop");
        loop {
            renderer.draw(&self.frame())?;

            if event::poll(self.step_delay)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if !self.handle_key(key.code) {
                            break;
                        }
                    }
                    // Full redraw next frame covers resizes
                    _ => {}
                }
            }

            if self.mode == Mode::Solving && self.step() {
                renderer.bell()?;
            }
        }
        tracing::info!("[app] exiting session loop");
        Ok(())
    }

    /// Returns false when the session should end.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return false,
            KeyCode::Left => self.move_cursor(Direction::Left),
            KeyCode::Right => self.move_cursor(Direction::Right),
            KeyCode::Up => self.move_cursor(Direction::Up),
            KeyCode::Down => self.move_cursor(Direction::Down),
            KeyCode::Char(' ') => self.toggle_cell(),
            KeyCode::Char('s') => self.start_solve(),
            KeyCode::Enter => self.toggle_pause(),
            KeyCode::Char('n') => self.randomize(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('y') => self.redo(),
            KeyCode::Char('1') => self.select_solver(Solver::Bfs),
            KeyCode::Char('2') => self.select_solver(Solver::Dfs),
            KeyCode::Char('3') => self.select_solver(Solver::AStar),
            KeyCode::Char(']') => {
                self.step_delay = (self.step_delay / 2).max(App::MIN_STEP_DELAY);
            }
            KeyCode::Char('[') => {
                self.step_delay = (self.step_delay * 2).min(App::MAX_STEP_DELAY);
            }
            _ => {}
        }
        true
    }

    fn frame(&self) -> Frame<'_> {
        let mode = match self.mode {
            Mode::Editing => "editing",
            Mode::Solving => "solving",
            Mode::Paused => "paused",
        };
        Frame {
            maze: &self.maze,
            solver: self.solver,
            explored: &self.explored,
            route: &self.path,
            agent: self.agent,
            cursor: (self.mode == Mode::Editing).then_some(self.cursor),
            status: format!("[{}] {} | {}", self.solver.label(), mode, self.status),
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        if self.mode != Mode::Editing {
            return;
        }
        let (x, y) = self.cursor;
        let moved = match direction {
            Direction::Left => x.checked_sub(1).map(|x| (x, y)),
            Direction::Right => (x + 1 < self.maze.size()).then_some((x + 1, y)),
            Direction::Up => y.checked_sub(1).map(|y| (x, y)),
            Direction::Down => (y + 1 < self.maze.size()).then_some((x, y + 1)),
        };
        if let Some(coord) = moved {
            self.cursor = coord;
        }
    }

    /// Toggles the wall under the cursor, recording the pre-edit state.
    /// Rejected edits (the protected endpoints) record nothing.
    fn toggle_cell(&mut self) {
        if self.mode != Mode::Editing {
            return;
        }
        let before = self.maze.clone();
        match self.maze.toggle_wall(self.cursor) {
            Ok(cell) => {
                self.history.record(&before, self.solver);
                self.status = format!("Set {:?} to {:?}", self.cursor, cell);
            }
            Err(err) => {
                tracing::debug!("[app] edit rejected: {}", err);
                self.status = err.to_string();
            }
        }
    }

    fn start_solve(&mut self) {
        if self.mode != Mode::Editing {
            return;
        }
        match self
            .solver
            .start_run(self.maze.grid(), self.maze.start(), self.maze.goal())
        {
            Ok(run) => {
                self.run = Some(run);
                self.mode = Mode::Solving;
                self.clear_overlays();
                self.status = format!("Solving with {}...", self.solver);
                tracing::info!("[app] started {} run", self.solver.label());
            }
            Err(err) => {
                // Unreachable for a well-formed maze, but surfaced anyway
                self.status = err.to_string();
            }
        }
    }

    /// Advances the active run by one step. Returns true when the run
    /// finished with a path this tick.
    fn step(&mut self) -> bool {
        let Some(run) = &mut self.run else {
            return false;
        };
        match run.advance() {
            Some(StepEvent::Explored { cell, .. }) => {
                // Accumulate instead of copying the engine's visited set
                self.explored.insert(cell);
                self.agent = Some(cell);
                false
            }
            Some(StepEvent::Done { path }) => {
                self.status = format!("Path found: {} steps", path.len());
                tracing::info!(
                    "[app] {} found a path of {} steps after exploring {} cells",
                    self.solver.label(),
                    path.len(),
                    self.explored.len()
                );
                self.path = path;
                self.agent = None;
                self.run = None;
                self.mode = Mode::Editing;
                true
            }
            None => {
                self.status = "No path exists between start and goal".to_string();
                tracing::info!(
                    "[app] {} exhausted after exploring {} cells",
                    self.solver.label(),
                    self.explored.len()
                );
                self.agent = None;
                self.run = None;
                self.mode = Mode::Editing;
                false
            }
        }
    }

    fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            Mode::Solving => Mode::Paused,
            Mode::Paused => Mode::Solving,
            Mode::Editing => return,
        };
        tracing::debug!("[app] run {:?}", self.mode);
    }

    /// Replaces the maze with a fresh random one. Cancels any active run
    /// and drops the edit history along with the old maze.
    fn randomize(&mut self) {
        self.abandon_run();
        match generator::generate(self.maze.size(), None) {
            Ok(maze) => {
                self.maze = maze;
                self.history.clear();
                self.clear_overlays();
                self.status = "Generated a new maze".to_string();
            }
            Err(err) => {
                tracing::warn!("[app] generation failed: {}", err);
                self.status = format!("{} (press n to retry)", err);
            }
        }
    }

    fn undo(&mut self) {
        self.abandon_run();
        if !self.history.can_undo() {
            self.status = "Nothing to undo".to_string();
            return;
        }
        let current = Snapshot {
            maze: self.maze.clone(),
            solver: self.solver,
        };
        let restored = self.history.undo(current);
        self.maze = restored.maze;
        self.solver = restored.solver;
        self.clear_overlays();
        self.status = "Undid last edit".to_string();
    }

    fn redo(&mut self) {
        self.abandon_run();
        if !self.history.can_redo() {
            self.status = "Nothing to redo".to_string();
            return;
        }
        let current = Snapshot {
            maze: self.maze.clone(),
            solver: self.solver,
        };
        let restored = self.history.redo(current);
        self.maze = restored.maze;
        self.solver = restored.solver;
        self.clear_overlays();
        self.status = "Redid last edit".to_string();
    }

    fn select_solver(&mut self, solver: Solver) {
        if solver == self.solver {
            return;
        }
        self.solver = solver;
        // Switching algorithms cancels the run and its overlays
        self.abandon_run();
        self.clear_overlays();
        self.status = format!("Selected {}", solver);
    }

    /// Cancellation is abandonment: dropping the run releases all of its
    /// state and nothing else needs reconciling.
    fn abandon_run(&mut self) {
        if self.run.take().is_some() {
            tracing::debug!("[app] abandoned in-flight {} run", self.solver.label());
        }
        self.mode = Mode::Editing;
    }

    fn clear_overlays(&mut self) {
        self.explored.clear();
        self.path.clear();
        self.agent = None;
    }
}
