//! Command-line interface, error handling, and run reporting

/// Command-line interface for batch generation runs
pub mod cli;
/// Retry budgets and runtime configuration defaults
pub mod configuration;
/// Error types and the crate result alias
pub mod error;
/// Run statistics and summary formatting
pub mod report;

pub use error::{GridError, Result};
