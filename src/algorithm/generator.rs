//! Generation orchestration and seeding modes
//!
//! A generator owns the random source and the retry budgets. One
//! propagation pass is fast but only likely to succeed; `generate` wraps it
//! in the validate-and-retry loop with an explicit overall cap so a
//! pathological seed surfaces as an error instead of spinning forever.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithm::intersection::{self, IntersectionBudget};
use crate::algorithm::resolver::ResolverBudget;
use crate::algorithm::root;
use crate::grid::board::EMPTY;
use crate::grid::coords;
use crate::grid::Grid;
use crate::io::configuration::{
    DEFAULT_GENERATION_ATTEMPTS, INTERSECTION_ATTEMPTS, RESOLVER_CORNER_ATTEMPTS,
    RESOLVER_OUTER_ATTEMPTS,
};
use crate::io::error::{GridError, Result, invalid_parameter};

/// How one propagation pass is seeded
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedKind {
    /// Root box at a random position, randomly filled
    RootBox,
    /// Root box at a fixed position 0-8, randomly filled
    RootBoxAt(usize),
    /// Supplied box contents at a fixed position
    ///
    /// A completely filled box is kept verbatim; a box with any empty cell
    /// is discarded and re-randomized.
    RootBoxWith {
        /// Box contents in local row-major order
        digits: [u8; 9],
        /// Box position 0-8
        pos: usize,
    },
    /// Candidate row and column, each a permutation of 1-9
    IntersectionLine {
        /// Candidate row digits
        row: [u8; 9],
        /// Candidate column digits
        col: [u8; 9],
    },
}

/// Retry budgets for generation, all bounded and validated
#[derive(Clone, Copy, Debug)]
pub struct GeneratorConfig {
    /// Full-grid generation attempts before reporting exhaustion
    pub max_generation_attempts: usize,
    /// Resolver restarts from center placement per pass
    pub outer_attempts: usize,
    /// Corner reassignments per resolver round
    pub corner_attempts: usize,
    /// Intersection trials per intersection-seeded pass
    pub intersection_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_generation_attempts: DEFAULT_GENERATION_ATTEMPTS,
            outer_attempts: RESOLVER_OUTER_ATTEMPTS,
            corner_attempts: RESOLVER_CORNER_ATTEMPTS,
            intersection_attempts: INTERSECTION_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    /// Check that every budget allows at least one attempt
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParameter`] for any zero budget.
    pub fn validated(self) -> Result<Self> {
        if self.max_generation_attempts == 0 {
            return Err(invalid_parameter(
                "max_generation_attempts",
                &self.max_generation_attempts,
                &"at least one generation attempt is required",
            ));
        }
        if self.outer_attempts == 0 || self.corner_attempts == 0 {
            return Err(invalid_parameter(
                "resolver budgets",
                &format!("{}/{}", self.outer_attempts, self.corner_attempts),
                &"resolver retry budgets must be non-zero",
            ));
        }
        if self.intersection_attempts == 0 {
            return Err(invalid_parameter(
                "intersection_attempts",
                &self.intersection_attempts,
                &"at least one intersection trial is required",
            ));
        }
        Ok(self)
    }

    const fn resolver_budget(&self) -> ResolverBudget {
        ResolverBudget {
            outer_attempts: self.outer_attempts,
            corner_attempts: self.corner_attempts,
        }
    }
}

/// Grid generator owning the retry budgets and the random source
///
/// Each generator holds its own [`StdRng`]; independent generators never
/// share state, so parallel callers simply construct one each. Seeding the
/// generator is the reproducibility seam: the same seed and seed kind
/// always produce the same grid.
#[derive(Debug)]
pub struct GridGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl GridGenerator {
    /// Create a generator with a fixed seed and default budgets
    pub fn seeded(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with explicit budgets
    ///
    /// `seed` fixes the random source; `None` seeds from entropy.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParameter`] when a budget is zero.
    pub fn with_config(config: GeneratorConfig, seed: Option<u64>) -> Result<Self> {
        let config = config.validated()?;
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Ok(Self { config, rng })
    }

    /// Run one propagation pass into a fresh grid
    ///
    /// The returned grid may be invalid; callers must check
    /// [`Grid::validate`] and discard failures. Use [`Self::generate`] for
    /// the retry-until-valid contract.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for a box position above 8, and
    /// the intersection-seed errors of
    /// [`GridError::SeedNotPermutation`] / [`GridError::NoValidIntersection`].
    pub fn propagate(&mut self, seed: &SeedKind) -> Result<Grid> {
        let mut grid = Grid::new();
        self.propagate_into(&mut grid, seed)?;
        Ok(grid)
    }

    /// Run one propagation pass into a caller-owned grid
    ///
    /// The grid is cleared first; its transformation capabilities are
    /// preserved, so a fixed-frame grid stays fixed-frame.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::propagate`].
    pub fn propagate_into(&mut self, grid: &mut Grid, seed: &SeedKind) -> Result<()> {
        grid.clear();

        match seed {
            SeedKind::RootBox => {
                let pos = self.rng.random_range(0..coords::BOX_COUNT);
                root::fill_from_root(grid, pos, false, &mut self.rng, self.config.resolver_budget());
            }
            SeedKind::RootBoxAt(pos) => {
                Grid::check_line_index("box", *pos)?;
                root::fill_from_root(
                    grid,
                    *pos,
                    false,
                    &mut self.rng,
                    self.config.resolver_budget(),
                );
            }
            SeedKind::RootBoxWith { digits, pos } => {
                Grid::check_line_index("box", *pos)?;
                let prefilled = !digits.contains(&EMPTY);
                if prefilled {
                    grid.set_box_digits(*pos, *digits)?;
                }
                root::fill_from_root(
                    grid,
                    *pos,
                    prefilled,
                    &mut self.rng,
                    self.config.resolver_budget(),
                );
            }
            SeedKind::IntersectionLine { row, col } => {
                intersection::fill_from_intersection(
                    grid,
                    *row,
                    *col,
                    &mut self.rng,
                    IntersectionBudget {
                        attempts: self.config.intersection_attempts,
                    },
                    self.config.resolver_budget(),
                )?;
            }
        }
        Ok(())
    }

    /// Generate a validated grid, retrying failed passes up to the cap
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GenerationExhausted`] when no pass validates
    /// within the configured attempts, [`GridError::SeedNotPermutation`]
    /// immediately for a malformed intersection seed, and
    /// [`GridError::OutOfRange`] for a box position above 8.
    pub fn generate(&mut self, seed: &SeedKind) -> Result<Grid> {
        let mut grid = Grid::new();
        self.generate_into(&mut grid, seed)?;
        Ok(grid)
    }

    /// Generate a validated grid into a caller-owned grid
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::generate`].
    pub fn generate_into(&mut self, grid: &mut Grid, seed: &SeedKind) -> Result<()> {
        for _ in 0..self.config.max_generation_attempts {
            match self.propagate_into(grid, seed) {
                Ok(()) => {
                    if grid.validate() {
                        return Ok(());
                    }
                }
                // A fruitless intersection search is retryable; everything
                // else is deterministic and reported straight away
                Err(GridError::NoValidIntersection { .. }) => {}
                Err(other) => return Err(other),
            }
        }

        grid.clear();
        Err(GridError::GenerationExhausted {
            attempts: self.config.max_generation_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budgets_are_rejected() {
        let config = GeneratorConfig {
            max_generation_attempts: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(GridError::InvalidParameter { .. })
        ));

        let config = GeneratorConfig {
            corner_attempts: 0,
            ..GeneratorConfig::default()
        };
        assert!(GridGenerator::with_config(config, Some(1)).is_err());
    }

    #[test]
    fn out_of_range_root_position_is_rejected() {
        let mut generator = GridGenerator::seeded(3);
        assert!(matches!(
            generator.propagate(&SeedKind::RootBoxAt(9)),
            Err(GridError::OutOfRange { .. })
        ));
    }
}
