//! Polyomino Packing
//!
//! Decides whether a multiset of polyomino pieces can be placed inside a
//! rectangular region without overlap or overhang. Pieces may be rotated and
//! mirrored; cells left empty are fine.
//!
//! # Pieces
//!
//! - [`Shape`]: occupied cells, normalized to a zero origin
//! - [`OrientationSet`]: the distinct rotations/reflections of a shape (1 to 8)
//!
//! # Queries
//!
//! - [`Packer`]: owns the orientation sets and answers [`Region`] queries
//! - [`Packer::fits`]: yes/no answer
//! - [`Packer::find_packing`]: the first [`Packing`] found, for inspection
//! - [`Packer::search`]: the packing plus the number of placements tried
//!
//! # Warning: Exponential Search
//!
//! The search is plain backtracking with a total-area check up front. It is
//! fine for small pieces and regions. Use [`SearchLimits`] to bound the work
//! of a single query; an exhausted budget is reported as
//! [`FitError::NodeLimitExceeded`].
//!
//! # Example
//!
//! ```rust
//! use puzzle_solutions::utils::packing::{Packer, Region, Shape};
//!
//! let domino = Shape::from_grid(&[[true, true]]);
//! let packer = Packer::new(&[domino]);
//!
//! assert!(packer.fits(&Region::new(2, 2, vec![2])).unwrap());
//! assert!(!packer.fits(&Region::new(2, 2, vec![3])).unwrap());
//! ```
//!
//! # Example: Inspecting a Packing
//!
//! ```rust
//! use puzzle_solutions::utils::packing::{Packer, Region, Shape};
//!
//! let ell = Shape::from_cells([(0, 0), (1, 0), (1, 1)]);
//! let packer = Packer::new(&[ell]);
//!
//! let packing = packer
//!     .find_packing(&Region::new(3, 2, vec![2]))
//!     .unwrap()
//!     .expect("two L-trominoes fill a 3x2 box");
//!
//! assert_eq!(packing.pieces().len(), 2);
//! assert_eq!(packing.render().unwrap(), "ABB\nAAB\n");
//! ```

mod grid;
mod orientation;
mod search;
mod shape;
mod witness;

pub use grid::OccupancyGrid;
pub use orientation::{Orientation, OrientationSet};
pub use search::{FitError, Packer, Placement, Region, SearchLimits, SearchOutcome};
pub use shape::{Point, Shape, normalize, reflect, rotate};
pub use witness::{Packing, PackingError, PlacedPiece};
