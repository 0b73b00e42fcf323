//! CLI entry point for the ring-based Sudoku grid generator

use clap::Parser;
use ringgrid::io::cli::{BatchRunner, Cli};

fn main() -> ringgrid::Result<()> {
    let cli = Cli::parse();
    let mut runner = BatchRunner::new(cli);
    runner.run()
}
