//! Retry budgets and runtime configuration defaults

// Propagation retry budgets
/// Resolver restarts from center placement per propagation pass
pub const RESOLVER_OUTER_ATTEMPTS: usize = 100;
/// Corner reassignments per resolver round
pub const RESOLVER_CORNER_ATTEMPTS: usize = 200;
/// Random index trials per intersection-seeded pass
pub const INTERSECTION_ATTEMPTS: usize = 20;

// Generation caps an empirically convergent retry loop; the bound exists so
// a pathological seed reports failure instead of spinning
/// Full-grid attempts before generation reports exhaustion
pub const DEFAULT_GENERATION_ATTEMPTS: usize = 50;

// Default values for configurable CLI parameters
/// Grids (or transform applications) per batch run
pub const DEFAULT_RUN_COUNT: usize = 999;

// Progress bar display settings
/// Template for the batch progress bar
pub const PROGRESS_TEMPLATE: &str = "{bar:40.cyan/blue} {pos}/{len} {msg}";
