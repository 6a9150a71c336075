//! Backtracking feasibility search.

use thiserror::Error;
use tracing::trace;

use super::grid::OccupancyGrid;
use super::orientation::OrientationSet;
use super::shape::Shape;
use super::witness::{Packing, PlacedPiece};

/// A rectangular target area and how many copies of each shape it must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    /// Required copies, indexed by shape
    pub counts: Vec<usize>,
}

impl Region {
    pub fn new(width: usize, height: usize, counts: Vec<usize>) -> Self {
        Self {
            width,
            height,
            counts,
        }
    }

    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn total_pieces(&self) -> usize {
        self.counts.iter().copied().fold(0, usize::saturating_add)
    }
}

/// One committed piece: which orientation of which shape, anchored where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub shape: usize,
    /// Index into the shape's [`OrientationSet`]
    pub orientation: usize,
    pub row: usize,
    pub col: usize,
}

/// Optional ceiling on the work a single query may do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of tentative placements before giving up
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

/// Invalid feasibility queries, plus a search stopped by [`SearchLimits`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FitError {
    #[error("region lists {actual} shape counts but {expected} shapes are defined")]
    CountLengthMismatch { expected: usize, actual: usize },

    #[error("shape {shape} has no occupied cells but {count} copies are required")]
    EmptyShape { shape: usize, count: usize },

    #[error("a {width}x{height} region is too large to search")]
    RegionTooLarge { width: usize, height: usize },

    #[error("search gave up after {limit} placements")]
    NodeLimitExceeded { limit: u64 },
}

/// Result of one query with the work it took.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The first packing found in search order, if any
    pub packing: Option<Packing>,
    /// Tentative placements tried; 0 when the area check rejected the region
    pub nodes: u64,
}

impl SearchOutcome {
    pub fn fits(&self) -> bool {
        self.packing.is_some()
    }
}

/// Answers feasibility queries against a fixed list of shapes.
///
/// Orientation sets are computed once on construction and only read
/// afterwards, so one packer can serve queries from many threads.
#[derive(Debug, Clone)]
pub struct Packer {
    shapes: Vec<OrientationSet>,
    limits: SearchLimits,
}

impl Packer {
    pub fn new(shapes: &[Shape]) -> Self {
        Self::from_orientations(shapes.iter().map(OrientationSet::generate).collect())
    }

    pub fn from_orientations(shapes: Vec<OrientationSet>) -> Self {
        Self {
            shapes,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn shapes(&self) -> &[OrientationSet] {
        &self.shapes
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Cells the region's pieces cover in total, ignoring empty shapes.
    pub fn required_area(&self, region: &Region) -> usize {
        region
            .counts
            .iter()
            .zip(&self.shapes)
            .filter(|(count, set)| **count > 0 && !set.is_empty())
            .map(|(count, set)| count.saturating_mul(set.cell_count()))
            .fold(0, usize::saturating_add)
    }

    /// Whether every required piece fits in the region without overlap.
    pub fn fits(&self, region: &Region) -> Result<bool, FitError> {
        Ok(self.search(region)?.fits())
    }

    /// The first packing in search order, or `None` if the pieces cannot fit.
    pub fn find_packing(&self, region: &Region) -> Result<Option<Packing>, FitError> {
        Ok(self.search(region)?.packing)
    }

    /// Run one query and report the packing found together with its cost.
    ///
    /// Anchors are tried row-major and orientations in generation order, so
    /// the result is the same on every call. Leftover empty cells are allowed.
    pub fn search(&self, region: &Region) -> Result<SearchOutcome, FitError> {
        self.validate(region)?;

        if region.total_pieces() == 0 {
            return Ok(SearchOutcome {
                packing: Some(Packing::new(region.width, region.height, Vec::new())),
                nodes: 0,
            });
        }
        if self.required_area(region) > region.area() {
            return Ok(SearchOutcome {
                packing: None,
                nodes: 0,
            });
        }

        let grid = OccupancyGrid::new(region.width, region.height)?;
        let mut search = Search {
            shapes: &self.shapes,
            grid,
            remaining: region.counts.clone(),
            placements: Vec::with_capacity(region.total_pieces()),
            nodes: 0,
            max_nodes: self.limits.max_nodes,
        };

        let found = search.run(0)?;
        trace!(
            width = region.width,
            height = region.height,
            nodes = search.nodes,
            found,
            "search finished"
        );

        let packing = found.then(|| self.build_packing(region, &search.placements));
        Ok(SearchOutcome {
            packing,
            nodes: search.nodes,
        })
    }

    fn validate(&self, region: &Region) -> Result<(), FitError> {
        if region.counts.len() != self.shapes.len() {
            return Err(FitError::CountLengthMismatch {
                expected: self.shapes.len(),
                actual: region.counts.len(),
            });
        }
        match region
            .counts
            .iter()
            .zip(&self.shapes)
            .position(|(count, set)| *count > 0 && set.is_empty())
        {
            Some(shape) => Err(FitError::EmptyShape {
                shape,
                count: region.counts[shape],
            }),
            None => Ok(()),
        }
    }

    fn build_packing(&self, region: &Region, placements: &[Placement]) -> Packing {
        let pieces = placements
            .iter()
            .map(|&placement| {
                let cells = self
                    .shapes
                    .get(placement.shape)
                    .and_then(|set| set.get(placement.orientation))
                    .map(|orientation| {
                        orientation
                            .cells()
                            .iter()
                            .map(|&(dr, dc)| (placement.row + dr as usize, placement.col + dc as usize))
                            .collect()
                    })
                    .unwrap_or_default();
                PlacedPiece { placement, cells }
            })
            .collect();
        Packing::new(region.width, region.height, pieces)
    }
}

/// Mutable state of one query, owned by the call stack of [`Search::run`].
struct Search<'p> {
    shapes: &'p [OrientationSet],
    grid: OccupancyGrid,
    remaining: Vec<usize>,
    placements: Vec<Placement>,
    nodes: u64,
    max_nodes: Option<u64>,
}

impl Search<'_> {
    /// Place every remaining piece from shape `cursor` onward.
    ///
    /// On success the grid and `placements` hold the solution; on failure
    /// they are back to their state on entry.
    fn run(&mut self, cursor: usize) -> Result<bool, FitError> {
        let Some(shape) = (cursor..self.remaining.len()).find(|&i| self.remaining[i] > 0) else {
            return Ok(true);
        };

        let shapes = self.shapes;
        let orientations = &shapes[shape];

        for row in 0..self.grid.height() {
            for col in 0..self.grid.width() {
                for (index, orientation) in orientations.iter().enumerate() {
                    if !self.grid.can_place(orientation, row, col) {
                        continue;
                    }
                    self.count_node()?;

                    self.grid.place(orientation, row, col);
                    self.remaining[shape] -= 1;
                    self.placements.push(Placement {
                        shape,
                        orientation: index,
                        row,
                        col,
                    });

                    if self.run(shape)? {
                        return Ok(true);
                    }

                    self.placements.pop();
                    self.remaining[shape] += 1;
                    self.grid.remove(orientation, row, col);
                }
            }
        }

        Ok(false)
    }

    fn count_node(&mut self) -> Result<(), FitError> {
        self.nodes += 1;
        match self.max_nodes {
            Some(limit) if self.nodes > limit => Err(FitError::NodeLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}
