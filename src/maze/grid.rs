use crate::error::Error;

use super::cell::Cell;

/// A square occupancy grid, indexed by `(x, y)` with the origin at the top
/// left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    data: Box<[Cell]>,
    size: u8,
}

impl Grid {
    /// Creates a `size` x `size` grid with every cell set to `cell`.
    pub fn new(size: u8, cell: Cell) -> Self {
        let data = vec![cell; size as usize * size as usize].into_boxed_slice();
        Grid { data, size }
    }

    /// Side length of the grid.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Checks if the given coordinate is within the bounds of the grid.
    pub fn is_in_bounds(&self, coord: (u8, u8)) -> bool {
        coord.0 < self.size && coord.1 < self.size
    }

    /// Checks if the given coordinate lies on the outer ring of the grid.
    pub fn is_border(&self, coord: (u8, u8)) -> bool {
        coord.0 == 0 || coord.1 == 0 || coord.0 == self.size - 1 || coord.1 == self.size - 1
    }

    /// Bounds-checked read.
    pub fn get(&self, coord: (u8, u8)) -> Result<Cell, Error> {
        if self.is_in_bounds(coord) {
            Ok(self[coord])
        } else {
            Err(Error::OutOfBounds(coord))
        }
    }

    /// Bounds-checked write.
    pub fn set(&mut self, coord: (u8, u8), cell: Cell) -> Result<(), Error> {
        if self.is_in_bounds(coord) {
            self[coord] = cell;
            Ok(())
        } else {
            Err(Error::OutOfBounds(coord))
        }
    }

    fn ravel_index(&self, x: u8, y: u8) -> usize {
        // Overflow-safe since coordinates are u8 (assuming usize is at least 32 bits)
        debug_assert!(
            self.is_in_bounds((x, y)),
            "grid indexed out of bounds at ({}, {})",
            x,
            y
        );
        y as usize * self.size as usize + x as usize
    }
}

impl std::ops::Index<(u8, u8)> for Grid {
    type Output = Cell;

    fn index(&self, index: (u8, u8)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl std::ops::IndexMut<(u8, u8)> for Grid {
    fn index_mut(&mut self, index: (u8, u8)) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}
