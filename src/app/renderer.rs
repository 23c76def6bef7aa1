use std::{
    collections::HashSet,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    maze::{Cell, Maze},
    solvers::Solver,
};

/// What a grid cell should look like on screen this frame, after
/// overlaying the exploration state on the maze model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Tile {
    Open,
    Wall,
    Explored,
    /// Solution path cell, colored per algorithm.
    Route(Solver),
    Start,
    Goal,
    /// The cell the search settled most recently.
    Agent,
    /// The editing cursor.
    Cursor,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub(super) const CELL_WIDTH: u16 = 2;
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let styled_symbol = match self {
            Tile::Open => "  ".with(Color::Reset),
            Tile::Wall => "⬜".with(Color::White),
            Tile::Explored => "* ".with(Color::DarkGreen),
            Tile::Route(solver) => "██".with(match solver {
                Solver::Bfs => Color::Blue,
                Solver::Dfs => Color::Green,
                Solver::AStar => Color::Yellow,
            }),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
            Tile::Agent => "🟡".with(Color::Yellow),
            Tile::Cursor => "[]".with(Color::Magenta),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Everything the renderer needs to draw one frame.
pub(super) struct Frame<'a> {
    pub maze: &'a Maze,
    pub solver: Solver,
    pub explored: &'a HashSet<(u8, u8)>,
    pub route: &'a [(u8, u8)],
    pub agent: Option<(u8, u8)>,
    /// Editing cursor; `None` while a run is animating.
    pub cursor: Option<(u8, u8)>,
    pub status: String,
}

fn tile_at(frame: &Frame, coord: (u8, u8)) -> Tile {
    if frame.agent == Some(coord) {
        return Tile::Agent;
    }
    if frame.cursor == Some(coord) {
        return Tile::Cursor;
    }
    if coord == frame.maze.start() {
        return Tile::Start;
    }
    if coord == frame.maze.goal() {
        return Tile::Goal;
    }
    if frame.route.contains(&coord) {
        return Tile::Route(frame.solver);
    }
    if frame.explored.contains(&coord) {
        return Tile::Explored;
    }
    match frame.maze.grid()[coord] {
        Cell::Wall => Tile::Wall,
        Cell::Open => Tile::Open,
    }
}

/// Full-frame terminal renderer: the grid, a status line, and a help
/// line. Redraws everything each tick; a frame is under a thousand cells,
/// which is well below the animation budget.
pub(super) struct Renderer {
    stdout: Stdout,
}

impl Renderer {
    const HELP: &'static str = "arrows: move  space: toggle wall  s: solve  enter: pause  n: new maze  u/y: undo/redo  1/2/3: BFS/DFS/A*  [/]: speed  esc: quit";

    pub(super) fn new() -> Self {
        Renderer {
            stdout: std::io::stdout(),
        }
    }

    /// Check that the terminal fits the grid plus two text lines.
    /// If not, show a resize prompt instead of the frame.
    fn check_size(&mut self, size: u8) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_width = size as u16 * Tile::CELL_WIDTH;
        let needed_height = size as u16 + 2;
        if term_width < needed_width || term_height < needed_height {
            let msg = format!(
                "Terminal size ({}x{}) is too small for a {}x{} maze (needs {}x{}). Resize the terminal, or press Esc to exit.",
                term_width, term_height, size, size, needed_width, needed_height
            );
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow))
            )?;
            self.stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Draws one frame.
    pub(super) fn draw(&mut self, frame: &Frame) -> std::io::Result<()> {
        let size = frame.maze.size();
        if !self.check_size(size)? {
            return Ok(());
        }

        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for y in 0..size {
            for x in 0..size {
                self.stdout.queue(style::Print(tile_at(frame, (x, y))))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }

        queue!(self.stdout, terminal::Clear(ClearType::FromCursorDown))?;
        let width = terminal::size()?.0 as usize;
        let (status, _) = frame.status.as_str().unicode_truncate(width);
        let (help, _) = Renderer::HELP.unicode_truncate(width);
        queue!(
            self.stdout,
            style::PrintStyledContent(status.to_string().with(Color::Cyan)),
            style::Print("\r\n"),
            style::PrintStyledContent(help.to_string().with(Color::DarkGrey)),
        )?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Rings the terminal bell, the success chime for a found path.
    pub(super) fn bell(&mut self) -> std::io::Result<()> {
        self.stdout.write_all(b"\x07")?;
        self.stdout.flush()
    }
}
