//! Error types for grid construction and transformation

use std::fmt;

/// Main error type for all grid operations
#[derive(Debug)]
pub enum GridError {
    /// Index outside its documented domain
    OutOfRange {
        /// What kind of index was given
        what: &'static str,
        /// Offending value
        index: usize,
        /// Largest acceptable value
        limit: usize,
    },

    /// An intersection-seed line is not a permutation of 1-9
    SeedNotPermutation {
        /// Which seed line was malformed
        which: &'static str,
    },

    /// No legal intersection found within the trial budget
    ///
    /// The seed lines were well-formed but every sampled index pair put a
    /// duplicate digit into one of the crossing box slices.
    NoValidIntersection {
        /// Trials consumed before giving up
        attempts: usize,
    },

    /// No propagation pass validated within the generation cap
    GenerationExhausted {
        /// Full passes attempted
        attempts: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A linear grid string did not hold exactly 81 cells
    MalformedGridString {
        /// Number of characters received
        length: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { what, index, limit } => {
                write!(f, "{what} index {index} is out of range (max: {limit})")
            }
            Self::SeedNotPermutation { which } => {
                write!(f, "Seed {which} is not a permutation of 1-9")
            }
            Self::NoValidIntersection { attempts } => {
                write!(f, "No valid intersection found in {attempts} trials")
            }
            Self::GenerationExhausted { attempts } => {
                write!(f, "No valid grid produced in {attempts} generation attempts")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedGridString { length } => {
                write!(f, "Grid string holds {length} cells, expected 81")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Create an out-of-range error
pub const fn out_of_range(what: &'static str, index: usize, limit: usize) -> GridError {
    GridError::OutOfRange { what, index, limit }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_index() {
        let message = out_of_range("band", 7, 2).to_string();
        assert!(message.contains("band"));
        assert!(message.contains('7'));
        assert!(message.contains('2'));
    }

    #[test]
    fn display_distinguishes_seed_failures() {
        let malformed = GridError::SeedNotPermutation { which: "row" }.to_string();
        let fruitless = GridError::NoValidIntersection { attempts: 20 }.to_string();
        assert!(malformed.contains("permutation"));
        assert!(fruitless.contains("20"));
        assert_ne!(malformed, fruitless);
    }

    #[test]
    fn invalid_parameter_reports_value_and_reason() {
        let err = invalid_parameter("splits", &42, &"too many");
        let message = err.to_string();
        assert!(message.contains("splits"));
        assert!(message.contains("42"));
        assert!(message.contains("too many"));
    }
}
