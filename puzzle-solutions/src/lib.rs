//! Daily puzzle solutions with automatic registration
//!
//! Puzzle solutions are organized by year under `my_solutions`. Each one
//! derives `AutoRegisterSolver`, so linking this crate is enough for the
//! registry to find it. Reusable algorithms live under [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
