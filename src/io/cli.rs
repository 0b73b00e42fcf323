//! Command-line interface for batch grid generation and transform runs

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Instant;

use crate::algorithm::generator::{GridGenerator, SeedKind};
use crate::grid::coords;
use crate::grid::Grid;
use crate::io::configuration::{DEFAULT_RUN_COUNT, PROGRESS_TEMPLATE};
use crate::io::error::{GridError, Result};
use crate::io::report::RunStats;

/// What a batch run measures
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Generate grids from scratch
    Default,
    /// Generate one grid, then multiply it through the transform battery
    Transform,
}

/// Which propagation engine seeds each grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Root-seeded propagation, chaining each grid's boxes into the next
    Root,
    /// Intersection-seeded propagation from random line permutations
    Line,
}

#[derive(Parser)]
#[command(name = "ringgrid")]
#[command(
    author,
    version,
    about = "Generate complete Sudoku grids constructively, without search"
)]
/// Command-line arguments for the batch generation tool
pub struct Cli {
    /// Number of grids (or transform applications) to produce
    #[arg(short, long, default_value_t = DEFAULT_RUN_COUNT)]
    pub count: usize,

    /// What the run measures
    #[arg(short, long, value_enum, default_value_t = RunMode::Default)]
    pub mode: RunMode,

    /// Propagation engine seeding each grid
    #[arg(short, long, value_enum, default_value_t = EngineKind::Root)]
    pub engine: EngineKind,

    /// Retry every grid until it validates instead of counting failures
    #[arg(short, long)]
    pub assured: bool,

    /// Random seed for reproducible runs (entropy-seeded when absent)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print every produced grid
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !self.verbose
    }
}

/// Orchestrates one batch run with progress tracking and statistics
pub struct BatchRunner {
    cli: Cli,
    generator: GridGenerator,
    rng: StdRng,
    stats: RunStats,
}

impl BatchRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let generator = cli
            .seed
            .map_or_else(GridGenerator::from_entropy, GridGenerator::seeded);
        // Shuffling seeds and the transform battery draw from their own
        // stream so generation stays reproducible either way
        let rng = cli
            .seed
            .map_or_else(StdRng::from_os_rng, |seed| {
                StdRng::seed_from_u64(seed.wrapping_add(1))
            });

        Self {
            cli,
            generator,
            rng,
            stats: RunStats::new(),
        }
    }

    /// Execute the batch run and print the summary
    ///
    /// # Errors
    ///
    /// Returns an error when generation fails for a reason retries cannot
    /// fix (malformed seed input or an exhausted generation cap in assured
    /// mode).
    // Summary and verbose grids are user-facing output
    #[allow(clippy::print_stderr, clippy::print_stdout)]
    pub fn run(&mut self) -> Result<()> {
        let started = Instant::now();
        let progress = self.make_progress_bar();

        let outcome = match self.cli.mode {
            RunMode::Default => self.run_generation(&progress),
            RunMode::Transform => self.run_transforms(&progress),
        };
        progress.finish_and_clear();

        let mode_name = match self.cli.mode {
            RunMode::Default => "default",
            RunMode::Transform => "transform",
        };
        eprintln!(
            "{}",
            self.stats
                .summary(mode_name, self.cli.assured, started.elapsed())
        );
        outcome
    }

    fn make_progress_bar(&self) -> ProgressBar {
        if !self.cli.should_show_progress() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(self.cli.count as u64);
        bar.set_style(
            ProgressStyle::with_template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    }

    #[allow(clippy::print_stdout)]
    fn run_generation(&mut self, progress: &ProgressBar) -> Result<()> {
        let mut last = Grid::new();

        for i in 0..self.cli.count {
            let seed_kind = self.next_seed(&last, i)?;

            if self.cli.assured {
                last = self.generator.generate(&seed_kind)?;
                self.stats.record(true);
                if self.cli.verbose {
                    println!("{last}");
                }
            } else {
                match self.generator.propagate(&seed_kind) {
                    Ok(grid) => {
                        let valid = grid.validate();
                        self.stats.record(valid);
                        if self.cli.verbose {
                            println!("{grid}");
                        }
                        if valid {
                            last = grid;
                        }
                    }
                    Err(GridError::NoValidIntersection { .. }) => self.stats.record(false),
                    Err(other) => return Err(other),
                }
            }
            progress.inc(1);
        }
        Ok(())
    }

    /// Seed the next pass, chaining a box of the previous grid into the new
    /// root so consecutive runs start from unrelated positions
    fn next_seed(&mut self, last: &Grid, iteration: usize) -> Result<SeedKind> {
        match self.cli.engine {
            EngineKind::Root => {
                let pos = iteration % coords::BOX_COUNT;
                Ok(SeedKind::RootBoxWith {
                    digits: last.box_digits(pos)?,
                    pos: coords::BOX_COUNT - 1 - pos,
                })
            }
            EngineKind::Line => {
                let mut row: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
                let mut col: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
                row.shuffle(&mut self.rng);
                col.shuffle(&mut self.rng);
                Ok(SeedKind::IntersectionLine { row, col })
            }
        }
    }

    /// Multiply one generated grid through the whole transform battery,
    /// counting an application as valid when it changed the grid and the
    /// result still validates
    #[allow(clippy::print_stdout)]
    fn run_transforms(&mut self, progress: &ProgressBar) -> Result<()> {
        let seed_kind = self.next_seed(&Grid::new(), 0)?;
        let mut grid = self.generator.generate(&seed_kind)?;
        let reference = grid.clone();

        while self.stats.total() < self.cli.count {
            self.transform_battery(&mut grid, &reference, progress)?;
        }
        Ok(())
    }

    #[allow(clippy::print_stdout)]
    fn transform_battery(
        &mut self,
        grid: &mut Grid,
        reference: &Grid,
        progress: &ProgressBar,
    ) -> Result<()> {
        let tally = |stats: &mut RunStats, grid: &Grid, progress: &ProgressBar| {
            stats.record(grid != reference && grid.validate());
            if self.cli.verbose {
                println!("{grid}");
            }
            progress.inc(1);
            stats.total() >= self.cli.count
        };

        for segment in 0..coords::SEGMENTS {
            for (a, b) in [(0, 1), (0, 2), (1, 2)] {
                grid.torus_shift(a, b)?;
                if tally(&mut self.stats, grid, progress) {
                    return Ok(());
                }

                grid.band_swap(a, b)?;
                if tally(&mut self.stats, grid, progress) {
                    return Ok(());
                }
                grid.stack_swap(a, b)?;
                if tally(&mut self.stats, grid, progress) {
                    return Ok(());
                }
                grid.band_row_swap(segment, a, b)?;
                if tally(&mut self.stats, grid, progress) {
                    return Ok(());
                }
                grid.stack_col_swap(segment, a, b)?;
                if tally(&mut self.stats, grid, progress) {
                    return Ok(());
                }
            }
        }

        grid.transpose();
        if tally(&mut self.stats, grid, progress) {
            return Ok(());
        }
        grid.anti_transpose();
        if tally(&mut self.stats, grid, progress) {
            return Ok(());
        }
        grid.mirror_rows();
        if tally(&mut self.stats, grid, progress) {
            return Ok(());
        }

        for _ in 0..coords::SEGMENTS {
            grid.rotate();
            if tally(&mut self.stats, grid, progress) {
                return Ok(());
            }
        }
        for _ in 0..coords::SEGMENTS {
            grid.counter_rotate();
            if tally(&mut self.stats, grid, progress) {
                return Ok(());
            }
        }

        grid.mirror_cols();
        if tally(&mut self.stats, grid, progress) {
            return Ok(());
        }

        for splits in 0..=crate::transform::relabel::MAX_SPLIT_STEPS {
            for init_part in 2..=9 {
                grid.relabel_digits(splits, init_part, &mut self.rng)?;
                if tally(&mut self.stats, grid, progress) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }
}
