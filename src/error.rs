use std::fmt;

/// Errors surfaced by the maze core to its callers.
///
/// Exhaustion of a search run is not an error: a run that runs out of
/// frontier simply stops producing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Coordinate outside the grid.
    OutOfBounds((u8, u8)),
    /// Attempted edit of the start or goal cell.
    CellProtected((u8, u8)),
    /// Maze generation exceeded its retry budget.
    GenerationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfBounds(coord) => {
                write!(f, "coordinate {:?} is outside the grid", coord)
            }
            Error::CellProtected(coord) => {
                write!(f, "cell {:?} is the start or goal and cannot be edited", coord)
            }
            Error::GenerationFailed => {
                write!(f, "maze generation exceeded its retry budget")
            }
        }
    }
}

impl std::error::Error for Error {}
