//! Algorithms shared between puzzle solutions

pub mod packing;
