//! The final flags and counters of a profile, as reported by the checks.
//!
//! After every check has run, each one pushes the flag vectors and counters it is responsible for
//! into a `ProfileCheckValidator`. The record can then be persisted or compared against a
//! reference, for instance the output of another QC system for the same profile.
use crate::keys::{FlagVariable, QcFlag};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};
use strum::IntoEnumIterator;
use tracing::warn;

/// Final flags and counters for one profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCheckValidator {
    flags: BTreeMap<FlagVariable, Vec<u32>>,
    counters: BTreeMap<String, u32>,
}

/// A difference between a validator record and its reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationMismatch {
    /// The reference has flags for a variable that were never reported.
    MissingFlags(FlagVariable),
    /// Flags were reported for a variable the reference does not have.
    UnexpectedFlags(FlagVariable),
    /// The flag vectors have different lengths.
    FlagLength {
        /// Variable compared
        variable: FlagVariable,
        /// Length in the reference
        expected: usize,
        /// Length reported
        actual: usize,
    },
    /// The flag words differ at one level.
    Flag {
        /// Variable compared
        variable: FlagVariable,
        /// Level index
        level: usize,
        /// Word in the reference
        expected: u32,
        /// Word reported
        actual: u32,
    },
    /// A counter in the reference differs, `actual` is `None` if it was never reported.
    Counter {
        /// Counter name
        name: String,
        /// Value in the reference
        expected: u32,
        /// Value reported
        actual: Option<u32>,
    },
}

impl Display for ValidationMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ValidationMismatch::*;

        match self {
            MissingFlags(var) => write!(f, "{} flags missing", var),
            UnexpectedFlags(var) => write!(f, "unexpected {} flags", var),
            FlagLength {
                variable,
                expected,
                actual,
            } => write!(
                f,
                "{} flags have {} levels, expected {}",
                variable, actual, expected
            ),
            Flag {
                variable,
                level,
                expected,
                actual,
            } => write!(
                f,
                "{} flags at level {}: {:?}, expected {:?}",
                variable,
                level,
                QcFlag::decode(*actual),
                QcFlag::decode(*expected)
            ),
            Counter {
                name,
                expected,
                actual: Some(actual),
            } => write!(f, "counter {} is {}, expected {}", name, actual, expected),
            Counter {
                name,
                expected,
                actual: None,
            } => write!(f, "counter {} missing, expected {}", name, expected),
        }
    }
}

impl ProfileCheckValidator {
    /// Create an empty record.
    #[inline]
    pub fn new() -> Self {
        ProfileCheckValidator::default()
    }

    /// Record the final flags for a variable, replacing anything recorded before.
    pub fn set_flags(&mut self, var: FlagVariable, flags: &[u32]) {
        self.flags.insert(var, flags.to_vec());
    }

    /// Record the final value of a counter.
    pub fn set_counter(&mut self, name: &str, value: u32) {
        self.counters.insert(name.to_owned(), value);
    }

    /// Get the recorded flags for a variable.
    #[inline]
    pub fn flags(&self, var: FlagVariable) -> Option<&[u32]> {
        self.flags.get(&var).map(Vec::as_slice)
    }

    /// Get a recorded counter.
    #[inline]
    pub fn counter(&self, name: &str) -> Option<u32> {
        self.counters.get(name).copied()
    }

    /// All recorded counters.
    #[inline]
    pub fn counters(&self) -> &BTreeMap<String, u32> {
        &self.counters
    }

    /// True if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.counters.is_empty()
    }

    /// Forget everything, ready for the next profile.
    pub fn clear(&mut self) {
        self.flags.clear();
        self.counters.clear();
    }

    /// Compare this record against a reference.
    ///
    /// Every flag vector is compared level by level. Only counters present in the reference are
    /// compared, so a reference may track a subset of the counters. Each mismatch is logged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::{FlagVariable, ProfileCheckValidator, ValidationMismatch};
    ///
    /// let mut actual = ProfileCheckValidator::new();
    /// actual.set_flags(FlagVariable::Height, &[0, 8]);
    /// actual.set_counter("NumAnyErrors", 0);
    ///
    /// let mut reference = actual.clone();
    /// assert!(actual.compare(&reference).is_empty());
    ///
    /// reference.set_counter("NumAnyErrors", 1);
    /// assert_eq!(
    ///     actual.compare(&reference),
    ///     vec![ValidationMismatch::Counter {
    ///         name: "NumAnyErrors".to_owned(),
    ///         expected: 1,
    ///         actual: Some(0),
    ///     }]
    /// );
    /// ```
    pub fn compare(&self, reference: &ProfileCheckValidator) -> Vec<ValidationMismatch> {
        let mut mismatches = vec![];

        for var in FlagVariable::iter() {
            match (self.flags(var), reference.flags(var)) {
                (None, None) => {}
                (None, Some(_)) => mismatches.push(ValidationMismatch::MissingFlags(var)),
                (Some(_), None) => mismatches.push(ValidationMismatch::UnexpectedFlags(var)),
                (Some(actual), Some(expected)) if actual.len() != expected.len() => {
                    mismatches.push(ValidationMismatch::FlagLength {
                        variable: var,
                        expected: expected.len(),
                        actual: actual.len(),
                    })
                }
                (Some(actual), Some(expected)) => mismatches.extend(
                    actual
                        .iter()
                        .zip(expected)
                        .enumerate()
                        .filter(|(_, (a, e))| a != e)
                        .map(|(level, (&actual, &expected))| ValidationMismatch::Flag {
                            variable: var,
                            level,
                            expected,
                            actual,
                        }),
                ),
            }
        }

        for (name, &expected) in reference.counters() {
            let actual = self.counter(name);
            if actual != Some(expected) {
                mismatches.push(ValidationMismatch::Counter {
                    name: name.clone(),
                    expected,
                    actual,
                });
            }
        }

        for mismatch in &mismatches {
            warn!("validation mismatch: {}", mismatch);
        }

        mismatches
    }
}
