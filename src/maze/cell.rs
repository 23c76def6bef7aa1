/// Occupancy state of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Passable cell.
    Open,
    /// Impassable cell.
    #[default]
    Wall,
}

impl Cell {
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Open)
    }
}
