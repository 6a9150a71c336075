//! Witness packings returned by a successful search.

use thiserror::Error;

use super::search::Placement;

/// A placement with the region cells it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedPiece {
    pub placement: Placement,
    /// Covered cells as `(row, col)`
    pub cells: Vec<(usize, usize)>,
}

/// A packing whose cells do not add up.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackingError {
    #[error("piece {piece} covers ({row}, {col}) outside the region")]
    OutOfBounds { piece: usize, row: usize, col: usize },

    #[error("cell ({row}, {col}) is covered by pieces {first} and {second}")]
    Overlap {
        row: usize,
        col: usize,
        first: usize,
        second: usize,
    },

    #[error("a {width}x{height} region has too many cells to index")]
    RegionTooLarge { width: usize, height: usize },
}

/// Every piece placed by a successful search, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    width: usize,
    height: usize,
    pieces: Vec<PlacedPiece>,
}

impl Packing {
    pub(super) fn new(width: usize, height: usize, pieces: Vec<PlacedPiece>) -> Self {
        Self {
            width,
            height,
            pieces,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    /// Number of pieces placed of each shape, indexed by shape.
    pub fn shape_counts(&self, shape_count: usize) -> Vec<usize> {
        let mut counts = vec![0; shape_count];
        for piece in &self.pieces {
            if let Some(count) = counts.get_mut(piece.placement.shape) {
                *count += 1;
            }
        }
        counts
    }

    /// Rebuild the region cell by cell, recording which piece covers each.
    ///
    /// Row-major; `None` marks an empty cell. Fails if a piece leaves the
    /// region or two pieces share a cell.
    pub fn owners(&self) -> Result<Vec<Option<usize>>, PackingError> {
        let len = self
            .width
            .checked_mul(self.height)
            .ok_or(PackingError::RegionTooLarge {
                width: self.width,
                height: self.height,
            })?;
        let mut owners = vec![None; len];
        for (piece, placed) in self.pieces.iter().enumerate() {
            for &(row, col) in &placed.cells {
                if row >= self.height || col >= self.width {
                    return Err(PackingError::OutOfBounds { piece, row, col });
                }
                let slot = &mut owners[row * self.width + col];
                if let Some(first) = *slot {
                    return Err(PackingError::Overlap {
                        row,
                        col,
                        first,
                        second: piece,
                    });
                }
                *slot = Some(piece);
            }
        }
        Ok(owners)
    }

    /// Draw the packing, one line per row: `.` for empty cells and a letter
    /// per piece (`A`..`Z`, wrapping).
    pub fn render(&self) -> Result<String, PackingError> {
        let owners = self.owners()?;
        if self.width == 0 {
            return Ok("\n".repeat(self.height));
        }
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in owners.chunks(self.width) {
            out.extend(row.iter().map(|owner| match owner {
                Some(piece) => (b'A' + (piece % 26) as u8) as char,
                None => '.',
            }));
            out.push('\n');
        }
        Ok(out)
    }
}
