//! Root-seeded propagation engine
//!
//! Fills the grid outward from one box: the root is seeded with a random
//! permutation (unless supplied pre-filled), the four neighbors sharing its
//! band or stack are completed from complementary digit pools, and the four
//! diagonal boxes are handed to the ring resolver. The pass is fast but not
//! certain; the caller validates and retries the whole generation on
//! failure.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::algorithm::digit_set::DigitSet;
use crate::algorithm::resolver::{self, ResolverBudget};
use crate::algorithm::ring::RingMap;
use crate::grid::board::EMPTY;
use crate::grid::coords;
use crate::grid::Grid;

/// Run one root-seeded propagation pass
///
/// With `prefilled` set the root box is taken as supplied; otherwise it is
/// seeded with a random permutation first.
pub(crate) fn fill_from_root(
    grid: &mut Grid,
    root: usize,
    prefilled: bool,
    rng: &mut StdRng,
    budget: ResolverBudget,
) {
    let map = RingMap::around(root);

    if !prefilled {
        seed_root_box(grid, root, rng);
    }

    fill_middle_lines(grid, &map, rng);
    fill_outer_lines(grid, &map, rng);

    resolver::fill_non_adjacent(grid, &map, rng, budget);
}

/// Seed the root box with a random permutation of 1-9
fn seed_root_box(grid: &mut Grid, root: usize, rng: &mut StdRng) {
    let pool = DigitSet::FULL.shuffled(rng);
    let mut digits = pool.iter();

    for local_row in 0..coords::SEGMENTS {
        let mut order = [0usize, 1, 2];
        order.shuffle(rng);
        for &local_col in &order {
            let digit = digits.next().copied().unwrap_or(EMPTY);
            grid.put(coords::box_cell(root, local_row, local_col), digit);
        }
    }
}

/// Fill the neighbors' middle lines from the root's complements
///
/// The six digits absent from the root's middle row split across the two
/// band-neighbors' middle rows; the middle-column complement splits across
/// the stack-neighbors' middle columns. Both distributions reuse one
/// randomized slot order per neighbor pair.
fn fill_middle_lines(grid: &mut Grid, map: &RingMap, rng: &mut StdRng) {
    let mut row_avail = DigitSet::FULL;
    let mut col_avail = DigitSet::FULL;
    for p in 0..coords::SEGMENTS {
        row_avail.remove(grid.get(coords::box_cell(map.root, 1, p)));
        col_avail.remove(grid.get(coords::box_cell(map.root, p, 1)));
    }
    let row_pool = row_avail.shuffled(rng);
    let col_pool = col_avail.shuffled(rng);

    let mut taken = 0usize;
    for (&band_box, &stack_box) in map.band_neighbors.iter().zip(map.stack_neighbors.iter()) {
        let mut order = [0usize, 1, 2];
        order.shuffle(rng);
        for &p in &order {
            let row_digit = row_pool.get(taken).copied().unwrap_or(EMPTY);
            let col_digit = col_pool.get(taken).copied().unwrap_or(EMPTY);
            grid.put(coords::box_cell(band_box, 1, p), row_digit);
            grid.put(coords::box_cell(stack_box, p, 1), col_digit);
            taken += 1;
        }
    }
}

/// Complete the neighbors' outer lines with the matching procedure
fn fill_outer_lines(grid: &mut Grid, map: &RingMap, rng: &mut StdRng) {
    // Availability per outer line, derived from the root's own lines: what
    // may appear alongside root row 0 is exactly the root's row 2, and so on
    let mut avails = [DigitSet::FULL; 4];
    for p in 0..coords::SEGMENTS {
        let mid_row = grid.get(coords::box_cell(map.root, 1, p));
        let mid_col = grid.get(coords::box_cell(map.root, p, 1));
        let top_row = grid.get(coords::box_cell(map.root, 0, p));
        let bottom_row = grid.get(coords::box_cell(map.root, 2, p));
        let left_col = grid.get(coords::box_cell(map.root, p, 0));
        let right_col = grid.get(coords::box_cell(map.root, p, 2));

        avails[0].remove(mid_row);
        avails[0].remove(top_row);
        avails[1].remove(mid_row);
        avails[1].remove(bottom_row);
        avails[2].remove(mid_col);
        avails[2].remove(left_col);
        avails[3].remove(mid_col);
        avails[3].remove(right_col);
    }

    let pools: [Vec<u8>; 4] = [
        avails[0].shuffled(rng),
        avails[1].shuffled(rng),
        avails[2].shuffled(rng),
        avails[3].shuffled(rng),
    ];

    let mut mid_row_digits: [u8; 3] =
        [0usize, 1, 2].map(|p| grid.get(coords::box_cell(map.root, 1, p)));
    let mut mid_col_digits: [u8; 3] =
        [0usize, 1, 2].map(|p| grid.get(coords::box_cell(map.root, p, 1)));
    mid_row_digits.shuffle(rng);
    mid_col_digits.shuffle(rng);

    let mut near_order = [0usize, 1, 2];
    let mut far_order = [0usize, 1, 2];
    near_order.shuffle(rng);
    far_order.shuffle(rng);

    fill_neighbor_pair(
        grid,
        map.band_neighbors,
        &pools[0],
        &pools[1],
        &mid_row_digits,
        near_order,
        far_order,
        true,
        rng,
    );
    fill_neighbor_pair(
        grid,
        map.stack_neighbors,
        &pools[2],
        &pools[3],
        &mid_col_digits,
        near_order,
        far_order,
        false,
        rng,
    );
}

/// Fill both outer lines of one neighbor pair
///
/// Pool digits land in whichever box of the pair does not already hold them
/// on its middle line; the root's shuffled middle digits then close the
/// remaining slots pairwise, each appearing once on the near line of one
/// box and once on the far line of the other.
fn fill_neighbor_pair(
    grid: &mut Grid,
    pair: [usize; 2],
    near_pool: &[u8],
    far_pool: &[u8],
    mid_digits: &[u8; 3],
    near_order: [usize; 3],
    far_order: [usize; 3],
    by_rows: bool,
    rng: &mut StdRng,
) {
    let (first, second) = if rng.random_range(0..2) == 0 {
        (pair[0], pair[1])
    } else {
        (pair[1], pair[0])
    };

    let outer_cell = |pos: usize, line: usize, slot: usize| {
        if by_rows {
            coords::box_cell(pos, line, slot)
        } else {
            coords::box_cell(pos, slot, line)
        }
    };
    let mid_holds = |grid: &Grid, pos: usize, digit: u8| {
        if by_rows {
            grid.box_row_contains(pos, 1, digit)
        } else {
            grid.box_col_contains(pos, 1, digit)
        }
    };

    for i in 0..coords::SEGMENTS {
        let near_digit = near_pool.get(i).copied().unwrap_or(EMPTY);
        let far_digit = far_pool.get(i).copied().unwrap_or(EMPTY);
        let near_slot = near_order.get(i).copied().unwrap_or(0);
        let far_slot = far_order.get(i).copied().unwrap_or(0);

        // A digit already on one middle line must land in the other box
        let near_target = if mid_holds(grid, first, near_digit) {
            second
        } else {
            first
        };
        let far_target = if mid_holds(grid, first, far_digit) {
            second
        } else {
            first
        };

        grid.put(outer_cell(near_target, 0, near_slot), near_digit);
        grid.put(outer_cell(far_target, 2, far_slot), far_digit);
    }

    // Close the remaining slots with the root's middle digits: one near-line
    // slot in one box pairs with the first open far-line slot in the other
    let mut taken = 0usize;
    for (a, b) in [(pair[0], pair[1]), (pair[1], pair[0])] {
        for slot in 0..coords::SEGMENTS {
            let cell = outer_cell(a, 0, slot);
            if grid.get(cell) != EMPTY {
                continue;
            }
            let digit = mid_digits.get(taken).copied().unwrap_or(EMPTY);
            grid.put(cell, digit);

            let partner = if by_rows {
                grid.first_empty_in_box_row(b, 2)
            } else {
                grid.first_empty_in_box_col(b, 2)
            };
            if let Some(partner_cell) = partner {
                grid.put(partner_cell, digit);
                taken += 1;
            }
        }
    }
}
