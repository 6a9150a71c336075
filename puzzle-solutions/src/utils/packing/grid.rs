//! Occupancy grid owned by a single search.

use super::orientation::Orientation;
use super::search::FitError;

/// Row-major occupied flags for a `width * height` region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Empty grid; fails if `width * height` cells cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, FitError> {
        let too_large = || FitError::RegionTooLarge { width, height };
        let len = width.checked_mul(height).ok_or_else(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, false);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// True if every cell of `orientation` anchored at `(row, col)` is inside
    /// the grid and currently empty.
    pub fn can_place(&self, orientation: &Orientation, row: usize, col: usize) -> bool {
        // normalized cells all lie inside the bounding box
        if row + orientation.height() > self.height || col + orientation.width() > self.width {
            return false;
        }
        orientation
            .cells()
            .iter()
            .all(|&(dr, dc)| !self.is_occupied(row + dr as usize, col + dc as usize))
    }

    /// Mark the cells of a placement occupied. Call only after [`Self::can_place`].
    pub fn place(&mut self, orientation: &Orientation, row: usize, col: usize) {
        self.fill(orientation, row, col, true);
    }

    /// Clear the cells of a previous [`Self::place`].
    pub fn remove(&mut self, orientation: &Orientation, row: usize, col: usize) {
        self.fill(orientation, row, col, false);
    }

    fn fill(&mut self, orientation: &Orientation, row: usize, col: usize, value: bool) {
        for &(dr, dc) in orientation.cells() {
            self.cells[(row + dr as usize) * self.width + col + dc as usize] = value;
        }
    }
}
