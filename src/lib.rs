//! Constructive Sudoku grid generation without backtracking search
//!
//! Complete, valid 9×9 grids are built directly: one box (or one row/column
//! pair) seeds the grid, digit availability propagates across the boxes
//! sharing its band and stack, and the four remaining diagonal boxes are
//! resolved through the digit-frequency structure of a 16-cell ring
//! configuration. A finished grid can then be multiplied into many
//! structurally independent grids through validity-preserving
//! transformations: band and stack permutations, reflections, rotations,
//! and digit relabeling.

#![forbid(unsafe_code)]

/// Propagation engines, the ring resolver, and generation orchestration
pub mod algorithm;
/// Grid arena, coordinate math, validation, and serialization
pub mod grid;
/// Command-line interface, error handling, and run reporting
pub mod io;
/// Symmetry-preserving grid rewrites and digit relabeling
pub mod transform;

pub use algorithm::{GeneratorConfig, GridGenerator, SeedKind};
pub use grid::Grid;
pub use io::error::{GridError, Result};
pub use transform::DigitMapping;
