//! Digit relabeling through random cycle partitions
//!
//! Relabeling renames digits without moving cells, so validity is preserved
//! by construction. The cycle structure comes from a random refinement of a
//! single digit block: each step either splits a singleton off the largest
//! part or moves one element into another part, decided by a coin once more
//! than one part exists. Digits land in the parts at random and every part
//! of two or more digits becomes one rotation cycle; the rest stay fixed.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::grid::board::EMPTY;
use crate::grid::coords;
use crate::grid::Grid;
use crate::io::error::{Result, invalid_parameter};

/// Maximum partition refinement steps
pub const MAX_SPLIT_STEPS: usize = 18;

/// A digit-to-digit relabeling built from rotation cycles
///
/// Slot `d` holds the image of digit `d`, or zero for a fixed point.
/// Applying a mapping and then its [`inverse`](Self::inverse) restores
/// every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitMapping {
    images: [u8; 10],
}

impl Default for DigitMapping {
    fn default() -> Self {
        Self::identity()
    }
}

impl DigitMapping {
    /// The mapping that fixes every digit
    pub const fn identity() -> Self {
        Self { images: [0; 10] }
    }

    /// The image of a digit under this mapping
    pub fn image(&self, digit: u8) -> u8 {
        self.images
            .get(digit as usize)
            .copied()
            .filter(|&to| to != EMPTY)
            .unwrap_or(digit)
    }

    /// The mapping undoing this one
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut images = [0u8; 10];
        for from in 1..=9u8 {
            let to = self.image(from);
            if to != from {
                if let Some(slot) = images.get_mut(to as usize) {
                    *slot = from;
                }
            }
        }
        Self { images }
    }

    /// Build a random cycle mapping over `init_part` digits
    ///
    /// `splits` refinement steps are applied to one starting part of
    /// `init_part` digits; the remaining digits never enter a cycle.
    pub(crate) fn random(splits: usize, init_part: usize, rng: &mut StdRng) -> Self {
        let mut parts: Vec<Vec<u8>> = vec![vec![0; init_part]];

        for _ in 0..splits {
            refine_partition(&mut parts, init_part, rng);
        }

        // Deal the digits into the partition slots at random
        let mut digits: Vec<u8> = (1..=9).collect();
        digits.shuffle(rng);
        let mut dealt = digits.into_iter();
        for part in &mut parts {
            for slot in part.iter_mut() {
                *slot = dealt.next().unwrap_or(EMPTY);
            }
        }

        // Each part of two or more digits rotates in shuffled order
        let mut images = [0u8; 10];
        for part in &mut parts {
            if part.len() < 2 {
                continue;
            }
            part.shuffle(rng);
            for (i, &from) in part.iter().enumerate() {
                let to = part.get((i + 1) % part.len()).copied().unwrap_or(EMPTY);
                if let Some(slot) = images.get_mut(from as usize) {
                    *slot = to;
                }
            }
        }
        Self { images }
    }
}

/// One refinement step: split off a singleton or move one element
fn refine_partition(parts: &mut Vec<Vec<u8>>, init_part: usize, rng: &mut StdRng) {
    if init_part <= 2 {
        return;
    }

    let (largest, max_size) = parts
        .iter()
        .enumerate()
        .map(|(i, part)| (i, part.len()))
        .max_by_key(|&(i, len)| (len, usize::MAX - i))
        .unwrap_or((0, 0));

    if max_size > 1 {
        let split = parts.len() == 1 || rng.random_range(0..2) == 1;
        if split {
            parts.push(vec![0]);
        } else {
            let mut target = rng.random_range(0..parts.len());
            while target == largest {
                target = rng.random_range(0..parts.len());
            }
            if let Some(part) = parts.get_mut(target) {
                part.push(0);
            }
        }
        if let Some(part) = parts.get_mut(largest) {
            part.pop();
        }
    } else {
        // Fully split: fold the last singleton back into the first part
        if let Some(first) = parts.first_mut() {
            first.push(0);
        }
        if parts.len() > 1 {
            parts.pop();
        }
    }
}

impl Grid {
    /// Relabel the grid's digits through a fresh random cycle mapping
    ///
    /// Returns the applied mapping so callers can reproduce or undo it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GridError::InvalidParameter`] when `splits` exceeds
    /// [`MAX_SPLIT_STEPS`] or `init_part` is outside 2-9.
    pub fn relabel_digits(
        &mut self,
        splits: usize,
        init_part: usize,
        rng: &mut StdRng,
    ) -> Result<DigitMapping> {
        if splits > MAX_SPLIT_STEPS {
            return Err(invalid_parameter(
                "splits",
                &splits,
                &format!("at most {MAX_SPLIT_STEPS} refinement steps are supported"),
            ));
        }
        if !(2..=9).contains(&init_part) {
            return Err(invalid_parameter(
                "init_part",
                &init_part,
                &"the starting part must hold between 2 and 9 digits",
            ));
        }

        let mapping = DigitMapping::random(splits, init_part, rng);
        self.apply_mapping(&mapping);
        Ok(mapping)
    }

    /// Rewrite every non-empty cell through a digit mapping
    pub fn apply_mapping(&mut self, mapping: &DigitMapping) {
        for cell in 0..coords::GRID_CELLS {
            let digit = self.get(cell);
            if digit != EMPTY {
                self.put(cell, mapping.image(digit));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::digit_set::DigitSet;
    use rand::SeedableRng;

    #[test]
    fn mappings_are_permutations() {
        let mut rng = StdRng::seed_from_u64(99);
        for splits in 0..=MAX_SPLIT_STEPS {
            for init_part in 2..=9 {
                let mapping = DigitMapping::random(splits, init_part, &mut rng);
                let images: DigitSet = (1..=9).map(|d| mapping.image(d)).collect();
                assert_eq!(images, DigitSet::FULL, "splits {splits} part {init_part}");
            }
        }
    }

    #[test]
    fn inverse_composes_to_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        let mapping = DigitMapping::random(6, 9, &mut rng);
        let inverse = mapping.inverse();
        for digit in 1..=9 {
            assert_eq!(inverse.image(mapping.image(digit)), digit);
        }
    }

    #[test]
    fn identity_fixes_every_digit() {
        let identity = DigitMapping::identity();
        for digit in 1..=9 {
            assert_eq!(identity.image(digit), digit);
        }
    }

    #[test]
    fn relabel_rejects_out_of_domain_parameters() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new();
        assert!(grid.relabel_digits(19, 5, &mut rng).is_err());
        assert!(grid.relabel_digits(3, 1, &mut rng).is_err());
        assert!(grid.relabel_digits(3, 10, &mut rng).is_err());
    }
}
