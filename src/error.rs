//! Error types for the sounding-qc crate.
//!
//! A check failing is not an error, it is a result recorded in the flags. These errors are for
//! configuration mistakes and broken preconditions, which stop processing.
use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum QcError {
    /// A configured check name has no entry in the registry.
    #[error("configuration error: unknown check '{0}'")]
    UnknownCheck(String),

    /// A check name was registered more than once.
    #[error("configuration error: check '{0}' is already registered")]
    DuplicateCheck(String),

    /// An option value is out of range or inconsistent with another option.
    #[error("configuration error: {0}")]
    InvalidOption(String),

    /// Two reported variables in one profile have a different number of levels.
    #[error("profile variable '{variable}' has {found} levels, expected {expected}")]
    LengthMismatch {
        /// Name of the offending variable.
        variable: &'static str,
        /// Number of levels of the other reported variables.
        expected: usize,
        /// Number of levels found for `variable`.
        found: usize,
    },

    /// A flag vector is present but too short for the levels being checked.
    #[error("{variable} flags have {found} levels but {required} levels are checked")]
    FlagsTooShort {
        /// Name of the flagged variable.
        variable: &'static str,
        /// Number of levels that will be checked.
        required: usize,
        /// Length of the flag vector.
        found: usize,
    },
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, QcError>;
