//! Index arithmetic mapping boxes, lines, bands, and stacks onto the flat cell arena
//!
//! Rows, columns, and boxes are three overlapping partitions of the same 81
//! cells. Every view is a computed index list into one owned array, so no two
//! views ever need to borrow the storage at the same time.

/// Number of cells in a full grid
pub const GRID_CELLS: usize = 81;
/// Cells per row, column, or box
pub const LINE_CELLS: usize = 9;
/// Bands or stacks per grid, and cells per box edge
pub const SEGMENTS: usize = 3;
/// Number of boxes in a grid
pub const BOX_COUNT: usize = 9;

/// Band (horizontal third) of a box position
pub const fn box_band(pos: usize) -> usize {
    debug_assert!(pos < BOX_COUNT);
    pos / SEGMENTS
}

/// Stack (vertical third) of a box position
pub const fn box_stack(pos: usize) -> usize {
    debug_assert!(pos < BOX_COUNT);
    pos % SEGMENTS
}

/// Linear box position from band and stack indices
pub const fn box_at(band: usize, stack: usize) -> usize {
    debug_assert!(band < SEGMENTS && stack < SEGMENTS);
    SEGMENTS * band + stack
}

/// Flat cell index from global row and column
pub const fn cell_at(row: usize, col: usize) -> usize {
    debug_assert!(row < LINE_CELLS && col < LINE_CELLS);
    LINE_CELLS * row + col
}

/// Global row of a flat cell index
pub const fn cell_row(cell: usize) -> usize {
    debug_assert!(cell < GRID_CELLS);
    cell / LINE_CELLS
}

/// Global column of a flat cell index
pub const fn cell_col(cell: usize) -> usize {
    debug_assert!(cell < GRID_CELLS);
    cell % LINE_CELLS
}

/// Flat cell index of a box-local coordinate
pub const fn box_cell(pos: usize, local_row: usize, local_col: usize) -> usize {
    debug_assert!(local_row < SEGMENTS && local_col < SEGMENTS);
    cell_at(
        SEGMENTS * box_band(pos) + local_row,
        SEGMENTS * box_stack(pos) + local_col,
    )
}

/// The nine cells of a box in local row-major order
pub const fn box_cells(pos: usize) -> [usize; 9] {
    let first = box_cell(pos, 0, 0);
    [
        first,
        first + 1,
        first + 2,
        first + 9,
        first + 10,
        first + 11,
        first + 18,
        first + 19,
        first + 20,
    ]
}

/// The three cells of one box-local row
pub const fn box_row_cells(pos: usize, local_row: usize) -> [usize; 3] {
    let first = box_cell(pos, local_row, 0);
    [first, first + 1, first + 2]
}

/// The three cells of one box-local column
pub const fn box_col_cells(pos: usize, local_col: usize) -> [usize; 3] {
    let first = box_cell(pos, 0, local_col);
    [first, first + 9, first + 18]
}

/// The nine cells of a global row, left to right
pub const fn row_cells(row: usize) -> [usize; 9] {
    let first = cell_at(row, 0);
    [
        first,
        first + 1,
        first + 2,
        first + 3,
        first + 4,
        first + 5,
        first + 6,
        first + 7,
        first + 8,
    ]
}

/// The nine cells of a global column, top to bottom
pub const fn col_cells(col: usize) -> [usize; 9] {
    let first = cell_at(0, col);
    [
        first,
        first + 9,
        first + 18,
        first + 27,
        first + 36,
        first + 45,
        first + 54,
        first + 63,
        first + 72,
    ]
}

/// Global-row cells addressed as (band, box-local row)
pub const fn band_row_cells(band: usize, local_row: usize) -> [usize; 9] {
    row_cells(SEGMENTS * band + local_row)
}

/// Global-column cells addressed as (stack, box-local column)
pub const fn stack_col_cells(stack: usize, local_col: usize) -> [usize; 9] {
    col_cells(SEGMENTS * stack + local_col)
}

/// The three box positions of a band, left to right
pub const fn band_boxes(band: usize) -> [usize; 3] {
    let first = box_at(band, 0);
    [first, first + 1, first + 2]
}

/// The three box positions of a stack, top to bottom
pub const fn stack_boxes(stack: usize) -> [usize; 3] {
    let first = box_at(0, stack);
    [first, first + 3, first + 6]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_and_cell_round_trip() {
        for pos in 0..BOX_COUNT {
            assert_eq!(box_at(box_band(pos), box_stack(pos)), pos);
        }
        for cell in 0..GRID_CELLS {
            assert_eq!(cell_at(cell_row(cell), cell_col(cell)), cell);
        }
    }

    #[test]
    fn box_cells_cover_the_expected_square() {
        // Box 4 is the grid center: rows 3-5, columns 3-5
        let cells = box_cells(4);
        for (&cell, expected) in cells.iter().zip([30, 31, 32, 39, 40, 41, 48, 49, 50]) {
            assert_eq!(cell, expected);
        }
    }

    #[test]
    fn lines_intersect_once() {
        for row in 0..LINE_CELLS {
            for col in 0..LINE_CELLS {
                let shared: Vec<usize> = row_cells(row)
                    .iter()
                    .filter(|c| col_cells(col).contains(c))
                    .copied()
                    .collect();
                assert_eq!(shared, vec![cell_at(row, col)]);
            }
        }
    }

    #[test]
    fn band_rows_match_global_rows() {
        assert_eq!(band_row_cells(2, 1), row_cells(7));
        assert_eq!(stack_col_cells(1, 2), col_cells(5));
    }
}
