//! Non-adjacent box resolver driven by ring digit frequencies
//!
//! Once the root box and its four neighbors are complete, the four diagonal
//! boxes must reproduce the ring's digit multiset across their corner cells.
//! The resolver places the diagonal centers from pairwise-intersected
//! availability pools, assigns corners in digit-priority order, and closes
//! the remaining shared lines with an explicit conflict case analysis.
//! Every dead end is a named exit feeding a bounded retry; exhausting the
//! outer budget leaves the grid incomplete for the validator to reject.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::algorithm::digit_set::DigitSet;
use crate::algorithm::ring::RingMap;
use crate::grid::board::EMPTY;
use crate::grid::coords;
use crate::grid::Grid;

/// Why one resolver round had to be abandoned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoundFailure {
    /// A diagonal center had no digit left in its pool
    CenterPlacement,
    /// No corner assignment matched the ring frequencies within budget
    CornerPlacement,
    /// A shared line could not take its two remaining candidates
    LinePropagation,
}

/// Retry budgets for one resolver call, passed by value
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolverBudget {
    /// Full restarts from center placement
    pub outer_attempts: usize,
    /// Corner reassignments per round
    pub corner_attempts: usize,
}

/// One digit's placement demand derived from the ring tally
#[derive(Clone, Copy, Debug)]
struct DigitDemand {
    digit: u8,
    /// Ring occurrences, and therefore corner placements owed
    required: usize,
    /// Diagonal boxes already holding the digit after center placement
    ineligible: usize,
}

impl DigitDemand {
    const fn eligible(self) -> usize {
        4 - self.ineligible
    }

    const fn is_forced(self) -> bool {
        self.required == self.eligible()
    }

    const fn is_forced_pair(self) -> bool {
        self.is_forced() && self.required == 2
    }
}

/// Fill the four diagonal boxes and their shared lines
///
/// Returns whether the diagonal region was completed. `false` means every
/// retry budget ran out; the grid is left incomplete and the caller's
/// validator will reject it.
pub(crate) fn fill_non_adjacent(
    grid: &mut Grid,
    map: &RingMap,
    rng: &mut StdRng,
    budget: ResolverBudget,
) -> bool {
    for _ in 0..budget.outer_attempts {
        clear_diagonals(grid, map);
        match run_round(grid, map, rng, budget.corner_attempts) {
            Ok(()) => return true,
            Err(
                RoundFailure::CenterPlacement
                | RoundFailure::CornerPlacement
                | RoundFailure::LinePropagation,
            ) => {}
        }
    }
    clear_diagonals(grid, map);
    false
}

/// One complete attempt: centers, corners, then line completion
fn run_round(
    grid: &mut Grid,
    map: &RingMap,
    rng: &mut StdRng,
    corner_attempts: usize,
) -> Result<(), RoundFailure> {
    place_centers(grid, map, rng)?;

    let plan = placement_plan(grid, map);

    let mut corners_done = false;
    for _ in 0..corner_attempts {
        if place_corners(grid, map, &plan, rng) {
            corners_done = true;
            break;
        }
        clear_corners(grid, map);
    }
    if !corners_done {
        return Err(RoundFailure::CornerPlacement);
    }

    if complete_lines(grid, map, rng) {
        Ok(())
    } else {
        Err(RoundFailure::LinePropagation)
    }
}

fn clear_diagonals(grid: &mut Grid, map: &RingMap) {
    for &pos in &map.diagonals {
        for cell in coords::box_cells(pos) {
            grid.put(cell, EMPTY);
        }
    }
}

fn clear_corners(grid: &mut Grid, map: &RingMap) {
    for &cell in &map.corners {
        grid.put(cell, EMPTY);
    }
}

/// Place one digit into each diagonal center
///
/// Candidate pools intersect the availability of the band-neighbor middle
/// column and stack-neighbor middle row crossing each center. Picking a
/// digit removes it from the pools of diagonals sharing a center line, so
/// the same digit cannot land twice on a shared row or column of centers.
fn place_centers(grid: &mut Grid, map: &RingMap, rng: &mut StdRng) -> Result<(), RoundFailure> {
    let mut col_avails = [DigitSet::FULL; 2];
    let mut row_avails = [DigitSet::FULL; 2];
    for (avail, &pos) in col_avails.iter_mut().zip(map.band_neighbors.iter()) {
        for cell in coords::box_col_cells(pos, 1) {
            avail.remove(grid.get(cell));
        }
    }
    for (avail, &pos) in row_avails.iter_mut().zip(map.stack_neighbors.iter()) {
        for cell in coords::box_row_cells(pos, 1) {
            avail.remove(grid.get(cell));
        }
    }

    let mut pools: [Vec<u8>; 4] = [
        col_avails[0].intersection(row_avails[0]).shuffled(rng),
        col_avails[1].intersection(row_avails[0]).shuffled(rng),
        col_avails[0].intersection(row_avails[1]).shuffled(rng),
        col_avails[1].intersection(row_avails[1]).shuffled(rng),
    ];

    for k in 0..4 {
        let choice = pools
            .get(k)
            .and_then(|pool| pool.choose(rng))
            .copied()
            .ok_or(RoundFailure::CenterPlacement)?;

        // Drop the digit from pools of diagonals sharing a center line
        match k {
            0 => {
                pools[1].retain(|&d| d != choice);
                pools[2].retain(|&d| d != choice);
            }
            1 | 2 => pools[3].retain(|&d| d != choice),
            _ => {}
        }

        grid.put(coords::box_cell(map.diagonal_box(k), 1, 1), choice);
    }
    Ok(())
}

/// Derive the per-digit corner demands from the ring tally
///
/// The order decides placement priority: forced splits of two first, then
/// any digit whose demand equals its eligible boxes, then higher demand,
/// then scarcer placement options, then digit value.
fn placement_plan(grid: &Grid, map: &RingMap) -> Vec<DigitDemand> {
    let mut tally = [0usize; 10];
    for &cell in &map.ring {
        if let Some(count) = tally.get_mut(grid.get(cell) as usize) {
            *count += 1;
        }
    }

    let mut plan: Vec<DigitDemand> = (1..=9u8)
        .filter_map(|digit| {
            let required = tally.get(digit as usize).copied().unwrap_or(0);
            if required == 0 {
                return None;
            }
            let ineligible = map
                .diagonals
                .iter()
                .filter(|&&pos| grid.box_contains(pos, digit))
                .count();
            Some(DigitDemand {
                digit,
                required,
                ineligible,
            })
        })
        .collect();

    plan.sort_by(|a, b| {
        b.is_forced_pair()
            .cmp(&a.is_forced_pair())
            .then(b.is_forced().cmp(&a.is_forced()))
            .then(b.required.cmp(&a.required))
            .then(b.ineligible.cmp(&a.ineligible))
            .then(a.digit.cmp(&b.digit))
    });
    plan
}

/// Whether `digit` already sits on both center lines crossing diagonal `k`
///
/// Used to rank candidate boxes: a digit pinched on both its center row and
/// center column has the fewest legal corners left and must go first.
fn center_lines_hold(grid: &Grid, map: &RingMap, k: usize, digit: u8) -> bool {
    let col_hit = grid.box_col_contains(map.band_neighbor_box(k), 1, digit)
        || grid.box_col_contains(map.stack_partner_box(k), 1, digit);
    let row_hit = grid.box_row_contains(map.stack_neighbor_box(k), 1, digit)
        || grid.box_row_contains(map.band_partner_box(k), 1, digit);
    col_hit && row_hit
}

/// Whether corner `c` of diagonal `k` can legally take `digit`
fn corner_open(grid: &Grid, map: &RingMap, k: usize, c: usize, digit: u8) -> bool {
    if grid.get(map.corner_cell(k, c)) != EMPTY {
        return false;
    }

    // Local row/column half the corner sits on
    let row_half = if c < 2 { 0 } else { 2 };
    let col_half = if c % 2 == 0 { 0 } else { 2 };

    // The corner's grid row crosses the stack-neighbor and the band partner
    if grid.box_row_contains(map.stack_neighbor_box(k), row_half, digit)
        || grid.box_row_contains(map.band_partner_box(k), row_half, digit)
    {
        return false;
    }

    // The corner's grid column crosses the band-neighbor and the stack partner
    if grid.box_col_contains(map.band_neighbor_box(k), col_half, digit)
        || grid.box_col_contains(map.stack_partner_box(k), col_half, digit)
    {
        return false;
    }

    true
}

/// One corner assignment attempt over the whole demand plan
///
/// Each digit is offered to every eligible box in constraint order; the
/// attempt stands only if every digit lands exactly as many times as the
/// ring demands and no corner stays empty.
fn place_corners(grid: &mut Grid, map: &RingMap, plan: &[DigitDemand], rng: &mut StdRng) -> bool {
    for demand in plan {
        let digit = demand.digit;

        let mut boxes: Vec<usize> = (0..4)
            .filter(|&k| !grid.box_contains(map.diagonal_box(k), digit))
            .collect();
        boxes.shuffle(rng);
        // Stable: pinched boxes first, shuffle breaks the remaining ties
        boxes.sort_by_key(|&k| !center_lines_hold(grid, map, k, digit));

        let mut placed = 0;
        for &k in &boxes {
            let open: Vec<usize> = (0..4)
                .filter(|&c| corner_open(grid, map, k, c, digit))
                .collect();
            let Some(&corner) = open.choose(rng) else {
                continue;
            };
            grid.put(map.corner_cell(k, corner), digit);
            placed += 1;
        }

        if placed != demand.required {
            return false;
        }
    }

    verify_corners(grid, map, plan)
}

/// Confirm every corner is filled and the corner tally matches the plan
fn verify_corners(grid: &Grid, map: &RingMap, plan: &[DigitDemand]) -> bool {
    if map.corners.iter().any(|&cell| grid.get(cell) == EMPTY) {
        return false;
    }

    let mut tally = [0usize; 10];
    for &cell in &map.corners {
        if let Some(count) = tally.get_mut(grid.get(cell) as usize) {
            *count += 1;
        }
    }
    plan.iter()
        .all(|demand| tally.get(demand.digit as usize).copied() == Some(demand.required))
}

/// Close the four open rows and four open columns spanning the diagonals
fn complete_lines(grid: &mut Grid, map: &RingMap, rng: &mut StdRng) -> bool {
    let rows = [
        coords::band_row_cells(coords::box_band(map.diagonal_box(0)), 0),
        coords::band_row_cells(coords::box_band(map.diagonal_box(0)), 2),
        coords::band_row_cells(coords::box_band(map.diagonal_box(2)), 0),
        coords::band_row_cells(coords::box_band(map.diagonal_box(2)), 2),
    ];
    let cols = [
        coords::stack_col_cells(coords::box_stack(map.diagonal_box(0)), 0),
        coords::stack_col_cells(coords::box_stack(map.diagonal_box(0)), 2),
        coords::stack_col_cells(coords::box_stack(map.diagonal_box(1)), 0),
        coords::stack_col_cells(coords::box_stack(map.diagonal_box(1)), 2),
    ];

    for (i, (row, col)) in rows.iter().zip(cols.iter()).enumerate() {
        let row_boxes = if i < 2 {
            (map.diagonal_box(0), map.diagonal_box(1))
        } else {
            (map.diagonal_box(2), map.diagonal_box(3))
        };
        if !propagate_line(grid, row, true, row_boxes, rng) {
            return false;
        }

        let col_boxes = if i < 2 {
            (map.diagonal_box(0), map.diagonal_box(2))
        } else {
            (map.diagonal_box(1), map.diagonal_box(3))
        };
        if !propagate_line(grid, col, false, col_boxes, rng) {
            return false;
        }
    }
    true
}

/// Place a line's two remaining candidates into its two remaining slots
///
/// `boxes` are the diagonal boxes the slots fall in, in slot order. NAC
/// marks a candidate already present in a slot's box; EC marks a candidate
/// already present in the cross line through a slot. Both candidates
/// conflicting on the same side is unsatisfiable; a single conflict forces
/// the assignment; no conflict at all resolves by coin flip.
fn propagate_line(
    grid: &mut Grid,
    cells: &[usize; 9],
    is_row: bool,
    boxes: (usize, usize),
    rng: &mut StdRng,
) -> bool {
    let mut avail = DigitSet::FULL;
    for &cell in cells {
        avail.remove(grid.get(cell));
    }

    let empties: Vec<usize> = cells
        .iter()
        .copied()
        .filter(|&cell| grid.get(cell) == EMPTY)
        .collect();
    let (Some(&slot0), Some(&slot1)) = (empties.first(), empties.get(1)) else {
        return false;
    };

    let mut candidates = avail.iter();
    let (Some(cand1), Some(cand2)) = (candidates.next(), candidates.next()) else {
        return false;
    };

    let nac = [
        [
            grid.box_contains(boxes.0, cand1),
            grid.box_contains(boxes.1, cand1),
        ],
        [
            grid.box_contains(boxes.0, cand2),
            grid.box_contains(boxes.1, cand2),
        ],
    ];
    if (nac[0][0] && nac[0][1]) || (nac[1][0] && nac[1][1]) {
        return false;
    }

    let cross = |grid: &Grid, slot: usize, digit: u8| {
        if is_row {
            grid.col_contains(coords::cell_col(slot), digit)
        } else {
            grid.row_contains(coords::cell_row(slot), digit)
        }
    };
    let ec = [
        [cross(grid, slot0, cand1), cross(grid, slot1, cand1)],
        [cross(grid, slot0, cand2), cross(grid, slot1, cand2)],
    ];
    if (ec[0][0] && ec[0][1]) || (ec[1][0] && ec[1][1]) {
        return false;
    }

    if !nac[0][0] && !nac[0][1] {
        if !ec[0][0] && !ec[0][1] {
            if !nac[1][0] && !nac[1][1] {
                if !ec[1][0] && !ec[1][1] {
                    // Fully unconstrained: assign at random
                    if rng.random_range(0..2) == 0 {
                        grid.put(slot0, cand1);
                        grid.put(slot1, cand2);
                    } else {
                        grid.put(slot0, cand2);
                        grid.put(slot1, cand1);
                    }
                } else if !ec[1][0] {
                    grid.put(slot0, cand2);
                    grid.put(slot1, cand1);
                } else {
                    grid.put(slot1, cand2);
                    grid.put(slot0, cand1);
                }
            } else {
                if (!nac[1][0] && ec[1][0]) || (!nac[1][1] && ec[1][1]) {
                    return false;
                }
                if !nac[1][0] {
                    grid.put(slot0, cand2);
                    grid.put(slot1, cand1);
                } else {
                    grid.put(slot1, cand2);
                    grid.put(slot0, cand1);
                }
            }
        } else if !ec[0][0] {
            if ec[1][1] || nac[1][1] {
                return false;
            }
            grid.put(slot0, cand1);
            grid.put(slot1, cand2);
        } else {
            if ec[1][0] || nac[1][0] {
                return false;
            }
            grid.put(slot1, cand1);
            grid.put(slot0, cand2);
        }
    } else if !nac[0][0] {
        if ec[0][0] || ec[1][1] || nac[1][1] {
            return false;
        }
        grid.put(slot0, cand1);
        grid.put(slot1, cand2);
    } else {
        if ec[0][1] || ec[1][0] || nac[1][0] {
            return false;
        }
        grid.put(slot1, cand1);
        grid.put(slot0, cand2);
    }

    true
}
