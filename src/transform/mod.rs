//! Symmetry-preserving grid rewrites
//!
//! Every operator here is an automorphism of the Sudoku constraint system:
//! applied to a valid grid it yields another valid grid without re-running
//! propagation, which makes one seed grid worth many structurally
//! independent ones. Index parameters are range-checked; swapping a line or
//! segment with itself is a no-op that leaves the grid byte-identical.

/// Digit relabeling through random cycle partitions
pub mod relabel;

use crate::grid::coords;
use crate::grid::Grid;
use crate::io::error::Result;

pub use relabel::DigitMapping;

impl Grid {
    /// Exchange two whole bands of boxes
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfRange`] when either index exceeds 2.
    pub fn band_swap(&mut self, idx1: usize, idx2: usize) -> Result<()> {
        Self::check_segment_index("band", idx1)?;
        Self::check_segment_index("band", idx2)?;
        if idx1 == idx2 {
            return Ok(());
        }

        for local_row in 0..coords::SEGMENTS {
            self.swap_lines(
                coords::band_row_cells(idx1, local_row),
                coords::band_row_cells(idx2, local_row),
            );
        }
        Ok(())
    }

    /// Exchange two whole stacks of boxes
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfRange`] when either index exceeds 2.
    pub fn stack_swap(&mut self, idx1: usize, idx2: usize) -> Result<()> {
        Self::check_segment_index("stack", idx1)?;
        Self::check_segment_index("stack", idx2)?;
        if idx1 == idx2 {
            return Ok(());
        }

        for local_col in 0..coords::SEGMENTS {
            self.swap_lines(
                coords::stack_col_cells(idx1, local_col),
                coords::stack_col_cells(idx2, local_col),
            );
        }
        Ok(())
    }

    /// Exchange two box-local rows within one band
    ///
    /// Legal because rows inside a band are interchangeable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfRange`] when any index exceeds 2.
    pub fn band_row_swap(&mut self, band: usize, idx1: usize, idx2: usize) -> Result<()> {
        Self::check_segment_index("band", band)?;
        Self::check_segment_index("row", idx1)?;
        Self::check_segment_index("row", idx2)?;
        if idx1 == idx2 {
            return Ok(());
        }

        self.swap_lines(
            coords::band_row_cells(band, idx1),
            coords::band_row_cells(band, idx2),
        );
        Ok(())
    }

    /// Exchange two box-local columns within one stack
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfRange`] when any index exceeds 2.
    pub fn stack_col_swap(&mut self, stack: usize, idx1: usize, idx2: usize) -> Result<()> {
        Self::check_segment_index("stack", stack)?;
        Self::check_segment_index("column", idx1)?;
        Self::check_segment_index("column", idx2)?;
        if idx1 == idx2 {
            return Ok(());
        }

        self.swap_lines(
            coords::stack_col_cells(stack, idx1),
            coords::stack_col_cells(stack, idx2),
        );
        Ok(())
    }

    /// Cyclically relocate every box by band and stack offsets
    ///
    /// A no-op on fixed-frame grids and for zero offsets.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::OutOfRange`] when either offset exceeds 2.
    pub fn torus_shift(&mut self, band_shift: usize, stack_shift: usize) -> Result<()> {
        Self::check_segment_index("band shift", band_shift)?;
        Self::check_segment_index("stack shift", stack_shift)?;
        if !self.supports_torus_shift() || (band_shift == 0 && stack_shift == 0) {
            return Ok(());
        }

        let snapshot = self.clone();
        for pos in 0..coords::BOX_COUNT {
            let target = coords::box_at(
                (coords::box_band(pos) + band_shift) % coords::SEGMENTS,
                (coords::box_stack(pos) + stack_shift) % coords::SEGMENTS,
            );
            for (from, to) in coords::box_cells(pos)
                .into_iter()
                .zip(coords::box_cells(target))
            {
                self.put(to, snapshot.get(from));
            }
        }
        Ok(())
    }

    /// Mirror rows pairwise around the grid's horizontal center
    pub fn mirror_rows(&mut self) {
        for i in 0..coords::LINE_CELLS / 2 {
            self.swap_lines(
                coords::row_cells(i),
                coords::row_cells(coords::LINE_CELLS - (i + 1)),
            );
        }
    }

    /// Mirror columns pairwise around the grid's vertical center
    pub fn mirror_cols(&mut self) {
        for i in 0..coords::LINE_CELLS / 2 {
            self.swap_lines(
                coords::col_cells(i),
                coords::col_cells(coords::LINE_CELLS - (i + 1)),
            );
        }
    }

    /// Transpose the grid across its main diagonal
    pub fn transpose(&mut self) {
        for row in 0..coords::LINE_CELLS {
            for col in (row + 1)..coords::LINE_CELLS {
                self.swap_cells(coords::cell_at(row, col), coords::cell_at(col, row));
            }
        }
    }

    /// Transpose the grid across its anti-diagonal
    pub fn anti_transpose(&mut self) {
        self.counter_rotate();
        self.mirror_rows();
    }

    /// Rotate the grid a quarter turn counter-clockwise
    pub fn rotate(&mut self) {
        self.transpose();
        self.mirror_rows();
    }

    /// Rotate the grid a quarter turn clockwise
    pub fn counter_rotate(&mut self) {
        self.transpose();
        self.mirror_cols();
    }

    fn swap_lines(&mut self, line1: [usize; 9], line2: [usize; 9]) {
        for (a, b) in line1.into_iter().zip(line2) {
            self.swap_cells(a, b);
        }
    }
}
