//! Run a configured sequence of checks on profiles.
//!
//! Checks run strictly in the configured order on one profile, because later checks may depend on
//! the flags set by earlier ones. A failing check does not stop the sequence, its result is
//! reported and the next check runs. Only an error, a broken precondition or a check that cannot
//! run at all, stops the profile.
//!
//! Different profiles share nothing, so one orchestrator can serve any number of threads each
//! working on its own profiles.
use crate::{
    checks::{CheckContext, ProfileCheck},
    error::{QcError, Result},
    options::ProfileCheckOptions,
    profile::Profile,
    profile_data::ProfileData,
    profile_flags::ProfileFlags,
    profile_indices::ProfileIndices,
    registry::CheckRegistry,
    validator::ProfileCheckValidator,
};
use tracing::{debug, debug_span, info, warn};

/// The result of each check run on a profile, in the order they ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCheckReport {
    profile_number: usize,
    results: Vec<(String, bool)>,
}

impl ProfileCheckReport {
    /// Position of the profile in its batch.
    #[inline]
    pub fn profile_number(&self) -> usize {
        self.profile_number
    }

    /// The result of a check, `None` if it did not run.
    pub fn passed(&self, check: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|(name, _)| name == check)
            .map(|&(_, passed)| passed)
    }

    /// Did every check pass?
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|&(_, passed)| passed)
    }

    /// Iterate over the check names and results in the order the checks ran.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.results
            .iter()
            .map(|(name, passed)| (name.as_str(), *passed))
    }
}

/// The report and validator record for one profile of a batch.
#[derive(Debug, Clone)]
pub struct ProfileOutcome {
    /// Result of each check.
    pub report: ProfileCheckReport,
    /// Final flags and counters.
    pub validator: ProfileCheckValidator,
}

/// Runs the configured checks on profiles.
#[derive(Debug, Clone)]
pub struct CheckOrchestrator<'r> {
    registry: &'r CheckRegistry,
    options: ProfileCheckOptions,
}

impl<'r> CheckOrchestrator<'r> {
    /// Validate the options and make sure every configured check is registered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::{CheckOrchestrator, CheckRegistry, ProfileCheckOptions, QcError};
    ///
    /// let registry = CheckRegistry::with_builtin_checks().unwrap();
    ///
    /// let opts = ProfileCheckOptions::default().with_checks(vec!["Basic", "SamePDiffT"]);
    /// assert!(CheckOrchestrator::new(&registry, opts).is_ok());
    ///
    /// let opts = ProfileCheckOptions::default().with_checks(vec!["Basic", "NoSuchCheck"]);
    /// assert_eq!(
    ///     CheckOrchestrator::new(&registry, opts).err(),
    ///     Some(QcError::UnknownCheck("NoSuchCheck".to_owned()))
    /// );
    /// ```
    pub fn new(registry: &'r CheckRegistry, options: ProfileCheckOptions) -> Result<Self> {
        options.validate()?;

        if let Some(name) = options.checks.iter().find(|name| !registry.contains(name)) {
            return Err(QcError::UnknownCheck(name.clone()));
        }

        if options.checks.is_empty() {
            warn!("no checks configured");
        }

        Ok(CheckOrchestrator { registry, options })
    }

    /// Get the options.
    #[inline]
    pub fn options(&self) -> &ProfileCheckOptions {
        &self.options
    }

    /// Run every configured check on one profile.
    ///
    /// The checks update `flags` in order, then each check that ran fills `validator`. Check
    /// failures are in the returned report. An `Err` means the profile could not be checked, in
    /// which case `validator` is left as it was.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::{
    ///     CheckOrchestrator, CheckRegistry, FlagVariable, ProfileCheckOptions,
    ///     ProfileCheckValidator, ProfileFlags,
    /// };
    /// # use sounding_qc::doctest::make_test_profile;
    ///
    /// let registry = CheckRegistry::with_builtin_checks().unwrap();
    /// let orchestrator = CheckOrchestrator::new(&registry, ProfileCheckOptions::default()).unwrap();
    ///
    /// let data = make_test_profile();
    /// let mut flags = ProfileFlags::from_data(&data);
    /// let mut validator = ProfileCheckValidator::new();
    ///
    /// let report = orchestrator.run_profile(0, &data, &mut flags, &mut validator).unwrap();
    ///
    /// assert_eq!(report.passed("Basic"), Some(true));
    /// assert_eq!(validator.flags(FlagVariable::Temperature), Some(&[0, 0, 0, 0][..]));
    /// assert_eq!(validator.counter("NumAnyErrors"), Some(0));
    /// ```
    pub fn run_profile(
        &self,
        profile_number: usize,
        data: &ProfileData,
        flags: &mut ProfileFlags,
        validator: &mut ProfileCheckValidator,
    ) -> Result<ProfileCheckReport> {
        let span = debug_span!(
            "profile",
            number = profile_number,
            station = data.station_id().unwrap_or("unknown")
        );
        let _enter = span.enter();

        if let Some(valid_time) = data.valid_time() {
            debug!("valid time {}", valid_time);
        }

        data.validate()?;
        let indices = ProfileIndices::new(profile_number, data, &self.options);
        flags.verify_lengths(indices.num_levels_to_check())?;

        debug!(
            "{} levels, checking {}",
            indices.num_levels(),
            indices.num_levels_to_check()
        );

        let mut checks = self
            .options
            .checks
            .iter()
            .map(|name| {
                self.registry
                    .create(name, &self.options)
                    .map(|check| (name, check))
            })
            .collect::<Result<Vec<(&String, Box<dyn ProfileCheck>)>>>()?;

        let mut ctx = CheckContext {
            indices: &indices,
            data,
            flags: &mut *flags,
        };

        for (name, check) in checks.iter_mut() {
            if let Err(err) = check.run_check(&mut ctx) {
                warn!("check {} could not run: {}", name, err);
                return Err(err);
            }
            debug!("check {} passed: {}", name, check.result());
        }

        for (_, check) in &checks {
            check.fill_validator(flags, validator);
        }

        let report = ProfileCheckReport {
            profile_number,
            results: checks
                .iter()
                .map(|(name, check)| ((*name).clone(), check.result()))
                .collect(),
        };

        info!(
            passed = report.all_passed(),
            basic = flags.basic_check_result(),
            "profile checked"
        );

        Ok(report)
    }

    /// Run the checks on a profile, collecting its validator record.
    pub fn run(&self, profile_number: usize, profile: &mut Profile) -> Result<ProfileOutcome> {
        let (data, flags) = profile.split_mut();
        let mut validator = ProfileCheckValidator::new();

        let report = self.run_profile(profile_number, data, flags, &mut validator)?;

        Ok(ProfileOutcome { report, validator })
    }

    /// Run the checks on each profile of a batch in turn.
    ///
    /// Profiles are numbered by their position in the batch. An error in one profile does not
    /// prevent the others from being checked.
    pub fn run_profiles(&self, profiles: &mut [Profile]) -> Vec<Result<ProfileOutcome>> {
        profiles
            .iter_mut()
            .enumerate()
            .map(|(profile_number, profile)| self.run(profile_number, profile))
            .collect()
    }
}
