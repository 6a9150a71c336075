//! Orientation generation under the eight rotations and reflections of the square.

use std::collections::HashSet;

use super::shape::{Point, Shape, normalize, reflect, rotate};

/// One normalized rotation/reflection of a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Orientation {
    cells: Vec<Point>,
    height: usize,
    width: usize,
}

impl Orientation {
    /// `cells` must already be normalized.
    fn from_normalized(cells: Vec<Point>) -> Self {
        let height = cells.iter().map(|p| p.0 as usize + 1).max().unwrap_or(0);
        let width = cells.iter().map(|p| p.1 as usize + 1).max().unwrap_or(0);
        Self {
            cells,
            height,
            width,
        }
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Rows spanned by the bounding box
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns spanned by the bounding box
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// The distinct orientations of one shape, in generation order.
///
/// Holds between 1 and 8 members for a non-empty shape and none for an
/// empty one. No two members have the same cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrientationSet {
    orientations: Vec<Orientation>,
}

impl OrientationSet {
    pub fn generate(shape: &Shape) -> Self {
        Self::from_cells(shape.cells())
    }

    /// Enumerate orientations of `cells` (any order, any origin).
    ///
    /// Visits the four rotations of the input, then the four rotations of
    /// its mirror image, keeping each normalized set the first time it is seen.
    pub fn from_cells(cells: &[Point]) -> Self {
        if cells.is_empty() {
            return Self::default();
        }

        let mut seen: HashSet<Vec<Point>> = HashSet::new();
        let mut orientations = Vec::new();
        let mut base = cells.to_vec();

        for _ in 0..2 {
            let mut points = base.clone();
            for _ in 0..4 {
                let normalized = normalize(&points);
                if seen.insert(normalized.clone()) {
                    orientations.push(Orientation::from_normalized(normalized));
                }
                points = rotate(&points);
            }
            base = reflect(&base);
        }

        Self { orientations }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Orientation> {
        self.orientations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Orientation> {
        self.orientations.get(index)
    }

    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }

    /// Cells covered by any one orientation, or 0 for an empty shape
    pub fn cell_count(&self) -> usize {
        self.orientations.first().map_or(0, Orientation::cell_count)
    }
}

impl<'a> IntoIterator for &'a OrientationSet {
    type Item = &'a Orientation;
    type IntoIter = std::slice::Iter<'a, Orientation>;

    fn into_iter(self) -> Self::IntoIter {
        self.orientations.iter()
    }
}
