#![warn(missing_docs)]
//! Consistency checks for the quality control of vertical profiles from weather soundings.
//!
//! A profile is a set of parallel per level vectors: pressure, temperature, height and the wind
//! components. Quality control runs a configured sequence of checks on each profile. The checks
//! share a set of per level flag words and named counters, so a check can react to what the
//! checks before it found. The basic check guards the others: if the pressures are not usable,
//! every later check is not applied.
//!
//! ```rust
//! use sounding_qc::{
//!     CheckOrchestrator, CheckRegistry, FlagVariable, Profile, ProfileCheckOptions, QcFlag,
//! };
//! # use sounding_qc::doctest::make_test_profile;
//!
//! let registry = CheckRegistry::with_builtin_checks().unwrap();
//! let opts = ProfileCheckOptions::default()
//!     .with_checks(vec!["Basic", "SamePDiffT", "UnstableLayer", "WindConsistency"]);
//! let orchestrator = CheckOrchestrator::new(&registry, opts).unwrap();
//!
//! let mut profile = Profile::new(make_test_profile());
//! let outcome = orchestrator.run(0, &mut profile).unwrap();
//!
//! assert!(outcome.report.all_passed());
//! assert!(!profile
//!     .flags()
//!     .has_flag(FlagVariable::Temperature, 0, QcFlag::FinalReject));
//! ```
//!
//! Errors are reserved for bad configuration and inconsistent inputs. A check that fails is a
//! normal outcome, reported in the `ProfileCheckReport`.
//!
//! Progress is logged with `tracing`. This crate never installs a subscriber, that is up to the
//! application.

//
// API
//
pub use crate::{
    checks::{
        BasicCheck, CheckContext, ProfileCheck, SamePDiffTCheck, UnstableLayerCheck,
        WindConsistencyCheck,
    },
    error::{QcError, Result},
    keys::{counters, FlagVariable, QcFlag},
    options::ProfileCheckOptions,
    orchestrator::{CheckOrchestrator, ProfileCheckReport, ProfileOutcome},
    profile::Profile,
    profile_data::ProfileData,
    profile_flags::ProfileFlags,
    profile_indices::ProfileIndices,
    registry::{CheckMaker, CheckRegistry},
    validator::{ProfileCheckValidator, ValidationMismatch},
};

#[doc(hidden)]
pub use crate::profile_data::doctest;

//
// Internal use only
//
mod checks;
mod error;
mod keys;
mod options;
mod orchestrator;
mod profile;
mod profile_data;
mod profile_flags;
mod profile_indices;
mod registry;
mod validator;
