//! Daily Puzzle Solver Library
//!
//! A small, type-safe framework for solving daily programming puzzles across
//! multiple years and days. Each puzzle is implemented as a solver with its
//! own input parsing and can produce answers for one or more parts.
//!
//! # Overview
//!
//! - [`PuzzleParser`] turns raw input into shared data
//! - [`PartSolver<N>`] solves part `N` against that shared data
//! - [`Solver`] ties the parts together (usually via `#[derive(PuzzleSolver)]`)
//! - [`SolverRegistry`] maps (year, day) to solver factories
//! - [`SolverPlugin`] + `#[derive(AutoRegisterSolver)]` register solvers at link time
//!
//! # Quick Example
//!
//! ```
//! use puzzle_solver::{
//!     ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError, SolverRegistryBuilder,
//! };
//!
//! #[derive(PuzzleSolver)]
//! #[puzzle_solver(max_parts = 2)]
//! struct Day1;
//!
//! impl PuzzleParser for Day1 {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i32>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Day1>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Plugin Registration
//!
//! ```ignore
//! #[derive(PuzzleSolver, AutoRegisterSolver)]
//! #[puzzle_solver(max_parts = 1)]
//! #[puzzle(year = 2025, day = 12, tags = ["packing"])]
//! pub struct Solver;
//! ```
//!
//! Linking the crate that defines the solver is enough for
//! [`SolverRegistryBuilder::register_all_plugins`] to find it.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{PartSolver, PuzzleParser, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use puzzle_solver_macros::{AutoRegisterSolver, PuzzleSolver};
