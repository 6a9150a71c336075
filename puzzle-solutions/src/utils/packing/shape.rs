//! Shapes as normalized cell lists, plus the point transforms used to orient them.

/// A grid cell as `(row, col)`. Signed so rotated and reflected sets can
/// go negative before they are normalized.
pub type Point = (i32, i32);

/// An immutable piece: its occupied cells, normalized so the minimum row
/// and column are zero, sorted row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: Vec<Point>,
}

impl Shape {
    /// Build a shape from rows of occupied flags. Rows may differ in length.
    pub fn from_grid<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let cells: Vec<Point> = rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .filter(|(_, occupied)| **occupied)
                    .map(move |(c, _)| (r as i32, c as i32))
            })
            .collect();
        Self::from_cells(cells)
    }

    /// Build a shape from cells in any order and at any origin.
    /// Duplicate cells collapse into one.
    pub fn from_cells(cells: impl IntoIterator<Item = Point>) -> Self {
        let raw: Vec<Point> = cells.into_iter().collect();
        let mut cells = normalize(&raw);
        cells.dedup();
        Self { cells }
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Shift `points` so the minimum row and column are zero, then sort row-major.
///
/// An empty input yields an empty output.
pub fn normalize(points: &[Point]) -> Vec<Point> {
    let (Some(min_r), Some(min_c)) = (
        points.iter().map(|p| p.0).min(),
        points.iter().map(|p| p.1).min(),
    ) else {
        return Vec::new();
    };

    let mut normalized: Vec<Point> = points.iter().map(|&(r, c)| (r - min_r, c - min_c)).collect();
    normalized.sort_unstable();
    normalized
}

/// Rotate 90°: `(r, c) -> (c, -r)`. The result is not normalized.
pub fn rotate(points: &[Point]) -> Vec<Point> {
    points.iter().map(|&(r, c)| (c, -r)).collect()
}

/// Mirror across the vertical axis: `(r, c) -> (r, -c)`. The result is not normalized.
pub fn reflect(points: &[Point]) -> Vec<Point> {
    points.iter().map(|&(r, c)| (r, -c)).collect()
}
