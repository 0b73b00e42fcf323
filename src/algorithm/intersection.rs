//! Intersection-seeded propagation engine
//!
//! Seeds generation from an arbitrary row and column candidate instead of a
//! box: the two permutations share exactly one digit, and any index pair
//! placing that digit on both lines at once is a legal intersection provided
//! the crossing box slices repeat nothing else. The box containing the
//! intersection becomes the root; from there the pass completes the root
//! band and stack and hands the diagonals to the ring resolver.
//!
//! Seed failures are reported without touching the grid, so a malformed
//! candidate is never confused with a pass that ran and produced an invalid
//! grid.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::algorithm::digit_set::DigitSet;
use crate::algorithm::resolver::{self, ResolverBudget};
use crate::algorithm::ring::RingMap;
use crate::grid::board::EMPTY;
use crate::grid::coords;
use crate::grid::Grid;
use crate::io::error::{GridError, Result};

/// Retry budget for the intersection search, passed by value
#[derive(Clone, Copy, Debug)]
pub(crate) struct IntersectionBudget {
    /// Random index trials before giving up on the seed pair
    pub attempts: usize,
}

/// Run one intersection-seeded propagation pass
///
/// # Errors
///
/// Returns [`GridError::SeedNotPermutation`] when either candidate line is
/// not a permutation of 1-9, and [`GridError::NoValidIntersection`] when no
/// legal intersection is found within the trial budget. The grid is left
/// untouched in both cases.
pub(crate) fn fill_from_intersection(
    grid: &mut Grid,
    row_seed: [u8; 9],
    col_seed: [u8; 9],
    rng: &mut StdRng,
    search: IntersectionBudget,
    resolver_budget: ResolverBudget,
) -> Result<()> {
    let mut row = row_seed;
    let mut col = col_seed;

    if row.iter().copied().collect::<DigitSet>() != DigitSet::FULL {
        return Err(GridError::SeedNotPermutation { which: "row" });
    }
    if col.iter().copied().collect::<DigitSet>() != DigitSet::FULL {
        return Err(GridError::SeedNotPermutation { which: "column" });
    }

    // Identical lines can never intersect legally; perturb one of them
    if row == col {
        if rng.random_range(0..2) == 0 {
            col.shuffle(rng);
        } else {
            row.shuffle(rng);
        }
    }

    for _ in 0..search.attempts {
        let row_pos = rng.random_range(0..coords::LINE_CELLS);
        let digit = row.get(row_pos).copied().unwrap_or(EMPTY);
        let Some(col_pos) = col.iter().position(|&d| d == digit) else {
            continue;
        };

        if slice_conflict(&row, &col, row_pos, col_pos) {
            continue;
        }

        seed_and_propagate(grid, &row, &col, row_pos, col_pos, rng, resolver_budget);
        return Ok(());
    }

    Err(GridError::NoValidIntersection {
        attempts: search.attempts,
    })
}

/// Whether the crossing box slices repeat a digit away from the intersection
fn slice_conflict(row: &[u8; 9], col: &[u8; 9], row_pos: usize, col_pos: usize) -> bool {
    let row_start = (row_pos / 3) * 3;
    let col_start = (col_pos / 3) * 3;

    for (r, &row_digit) in row.iter().enumerate().skip(row_start).take(3) {
        for (c, &col_digit) in col.iter().enumerate().skip(col_start).take(3) {
            if row_digit == col_digit && !(r == row_pos && c == col_pos) {
                return true;
            }
        }
    }
    false
}

/// Write the accepted seed lines and complete the grid around them
fn seed_and_propagate(
    grid: &mut Grid,
    row: &[u8; 9],
    col: &[u8; 9],
    row_pos: usize,
    col_pos: usize,
    rng: &mut StdRng,
    budget: ResolverBudget,
) {
    // The candidate row lands on the grid row holding the shared digit in
    // the column, and vice versa; the intersection cell agrees from both
    // sides by construction
    let grid_row = col_pos;
    let grid_col = row_pos;
    for (&cell, &digit) in coords::row_cells(grid_row).iter().zip(row.iter()) {
        grid.put(cell, digit);
    }
    for (&cell, &digit) in coords::col_cells(grid_col).iter().zip(col.iter()) {
        grid.put(cell, digit);
    }

    let root = coords::box_at(grid_row / 3, grid_col / 3);
    complete_root_box(grid, root, rng);

    let map = RingMap::around(root);
    complete_band_rows(grid, &map);
    complete_stack_cols(grid, &map);

    resolver::fill_non_adjacent(grid, &map, rng, budget);
}

/// Fill the root box's open cells from its availability pool
fn complete_root_box(grid: &mut Grid, root: usize, rng: &mut StdRng) {
    let mut avail = DigitSet::FULL;
    for cell in coords::box_cells(root) {
        avail.remove(grid.get(cell));
    }

    let pool = avail.shuffled(rng);
    let mut digits = pool.iter();
    for cell in coords::box_cells(root) {
        if grid.get(cell) == EMPTY {
            let digit = digits.next().copied().unwrap_or(EMPTY);
            grid.put(cell, digit);
        }
    }
}

/// Close the two open rows of the root band
///
/// The first open row takes the row's availability split between the two
/// band-neighbors, steering digits already seen in the far neighbor into
/// the near one; the second open row then closes with each neighbor's
/// missing digits.
fn complete_band_rows(grid: &mut Grid, map: &RingMap) {
    let band = coords::box_band(map.root);
    let near = map.band_neighbors.first().copied().unwrap_or(map.root);
    let far = map.band_neighbors.get(1).copied().unwrap_or(map.root);

    let open: Vec<usize> = (0..coords::SEGMENTS)
        .filter(|&lr| grid.first_empty_in_box_row(near, lr).is_some())
        .collect();
    let (Some(&first_row), Some(&second_row)) = (open.first(), open.get(1)) else {
        return;
    };

    complete_first_line(
        grid,
        coords::band_row_cells(band, first_row),
        near,
        far,
    );
    complete_second_line(grid, coords::band_row_cells(band, second_row), near, far);
}

/// Close the two open columns of the root stack
fn complete_stack_cols(grid: &mut Grid, map: &RingMap) {
    let stack = coords::box_stack(map.root);
    let near = map.stack_neighbors.first().copied().unwrap_or(map.root);
    let far = map.stack_neighbors.get(1).copied().unwrap_or(map.root);

    let open: Vec<usize> = (0..coords::SEGMENTS)
        .filter(|&lc| grid.first_empty_in_box_col(near, lc).is_some())
        .collect();
    let (Some(&first_col), Some(&second_col)) = (open.first(), open.get(1)) else {
        return;
    };

    complete_first_line(
        grid,
        coords::stack_col_cells(stack, first_col),
        near,
        far,
    );
    complete_second_line(grid, coords::stack_col_cells(stack, second_col), near, far);
}

/// Fill the first open line of a neighbor pair
///
/// The near box's slots come from the line availability minus the near
/// box's own digits, digits already present in the far box first so they
/// cannot collide there later; the far box's slots take whatever the line
/// still misses.
fn complete_first_line(grid: &mut Grid, cells: [usize; 9], near: usize, far: usize) {
    let slots: Vec<usize> = cells
        .iter()
        .copied()
        .filter(|&cell| grid.get(cell) == EMPTY)
        .collect();

    let mut avail = DigitSet::FULL;
    for &cell in &cells {
        avail.remove(grid.get(cell));
    }
    for digit in grid_box_digits(grid, near) {
        avail.remove(digit);
    }

    // Stable partition: digits the far box already holds go first
    let (mut pool, rest): (Vec<u8>, Vec<u8>) = avail
        .iter()
        .partition(|&digit| grid.box_contains(far, digit));
    pool.extend(rest);

    // The near box owns the first three slots of the scan order
    for (&cell, &digit) in slots.iter().take(coords::SEGMENTS).zip(pool.iter()) {
        grid.put(cell, digit);
    }

    let mut remaining = DigitSet::FULL;
    for &cell in &cells {
        remaining.remove(grid.get(cell));
    }
    for (&cell, digit) in slots
        .iter()
        .skip(coords::SEGMENTS)
        .zip(remaining.iter())
    {
        grid.put(cell, digit);
    }
}

/// Fill the second open line with each neighbor's missing digits
fn complete_second_line(grid: &mut Grid, cells: [usize; 9], near: usize, far: usize) {
    let slots: Vec<usize> = cells
        .iter()
        .copied()
        .filter(|&cell| grid.get(cell) == EMPTY)
        .collect();

    let mut near_missing = DigitSet::FULL;
    let mut far_missing = DigitSet::FULL;
    for digit in grid_box_digits(grid, near) {
        near_missing.remove(digit);
    }
    for digit in grid_box_digits(grid, far) {
        far_missing.remove(digit);
    }

    let pool: Vec<u8> = near_missing.iter().chain(far_missing.iter()).collect();
    for (&cell, &digit) in slots.iter().zip(pool.iter()) {
        grid.put(cell, digit);
    }
}

fn grid_box_digits(grid: &Grid, pos: usize) -> [u8; 9] {
    coords::box_cells(pos).map(|cell| grid.get(cell))
}
