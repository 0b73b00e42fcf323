//! Digit availability sets and shuffled candidate pools
//!
//! An availability set ("avails") starts as the full digit domain and is
//! pruned as digits are observed in a line or box. A pool is the shuffled
//! list of whatever survived, consumed in randomized placement order.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const FULL_MASK: u16 = 0b1_1111_1111;

/// Set of digits 1-9 backed by a nine-bit mask
///
/// Out-of-domain digits (0 or above 9) are never members and inserting them
/// is ignored, so pruning by a cell value works whether or not the cell is
/// empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitSet(u16);

impl DigitSet {
    /// The empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// The full digit domain 1-9
    pub const FULL: Self = Self(FULL_MASK);

    const fn mask(digit: u8) -> u16 {
        match digit {
            1..=9 => 1 << (digit - 1),
            _ => 0,
        }
    }

    /// Add a digit; out-of-domain values are ignored
    pub const fn insert(&mut self, digit: u8) {
        self.0 |= Self::mask(digit);
    }

    /// Remove a digit; out-of-domain values are ignored
    pub const fn remove(&mut self, digit: u8) {
        self.0 &= !Self::mask(digit);
    }

    /// Test digit membership
    pub const fn contains(self, digit: u8) -> bool {
        let mask = Self::mask(digit);
        mask != 0 && self.0 & mask != 0
    }

    /// Number of digits in the set
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no digit is present
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Digits present in both sets
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Iterate over the digits in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&d| self.contains(d))
    }

    /// Extract the digits as an ascending vector
    pub fn to_vec(self) -> Vec<u8> {
        self.iter().collect()
    }

    /// Build a pool: the digits of the set in random order
    pub fn shuffled(self, rng: &mut StdRng) -> Vec<u8> {
        let mut pool = self.to_vec();
        pool.shuffle(rng);
        pool
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(digits: I) -> Self {
        let mut set = Self::new();
        for digit in digits {
            set.insert(digit);
        }
        set
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitSet({} digits: {:?})", self.len(), self.to_vec())
    }
}
