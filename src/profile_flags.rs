//! QC flags and counters shared by the checks run on one profile.
//!
//! Every check in a sequence reads and writes the same `ProfileFlags`, so a later check can react
//! to what an earlier one found. Flags only accumulate: bits are OR'ed in and there is no way to
//! clear one or to shrink a flag vector. Counters only go up.
use crate::{
    error::{QcError, Result},
    keys::{FlagVariable, QcFlag},
    profile_data::ProfileData,
};
use std::collections::BTreeMap;

/// Per level flag words for each variable, plus named counters.
///
/// A variable that was not reported has no flag vector at all, as opposed to a vector of zeros.
/// Checks must test for presence before flagging, `set_flag` does that for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFlags {
    temperature: Option<Vec<u32>>,
    height: Option<Vec<u32>>,
    wind: Option<Vec<u32>>,

    counters: BTreeMap<String, u32>,

    // Stored inverted so the default is a pass.
    basic_check_failed: bool,
}

impl ProfileFlags {
    /// Create flags with no variables present and no counters.
    #[inline]
    pub fn new() -> Self {
        ProfileFlags::default()
    }

    /// Create zeroed flag vectors for the variables reported in `data`.
    ///
    /// The wind flags are present if either wind component was reported.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::{FlagVariable, ProfileFlags};
    /// # use sounding_qc::doctest::make_test_profile;
    ///
    /// let flags = ProfileFlags::from_data(&make_test_profile());
    ///
    /// assert_eq!(flags.flags(FlagVariable::Temperature), Some(&[0, 0, 0, 0][..]));
    /// assert!(flags.is_present(FlagVariable::Height));
    /// assert!(flags.flags(FlagVariable::Wind).is_none());
    /// ```
    pub fn from_data(data: &ProfileData) -> Self {
        let zeros = |reported: bool| {
            if reported {
                Some(vec![0; data.num_levels()])
            } else {
                None
            }
        };

        ProfileFlags {
            temperature: zeros(!data.temperature_profile().is_empty()),
            height: zeros(!data.height_profile().is_empty()),
            wind: zeros(!data.u_wind_profile().is_empty() || !data.v_wind_profile().is_empty()),
            ..ProfileFlags::default()
        }
    }

    /// Builder method to supply the initial flags of a variable, e.g. from an earlier QC stage.
    ///
    /// An empty vector means the variable is not present.
    pub fn with_flags(mut self, var: FlagVariable, flags: Vec<u32>) -> Self {
        *self.slot_mut(var) = if flags.is_empty() { None } else { Some(flags) };
        self
    }

    #[inline]
    fn slot(&self, var: FlagVariable) -> &Option<Vec<u32>> {
        match var {
            FlagVariable::Temperature => &self.temperature,
            FlagVariable::Height => &self.height,
            FlagVariable::Wind => &self.wind,
        }
    }

    #[inline]
    fn slot_mut(&mut self, var: FlagVariable) -> &mut Option<Vec<u32>> {
        match var {
            FlagVariable::Temperature => &mut self.temperature,
            FlagVariable::Height => &mut self.height,
            FlagVariable::Wind => &mut self.wind,
        }
    }

    /// Get the flags for a variable, `None` if the variable is not present.
    #[inline]
    pub fn flags(&self, var: FlagVariable) -> Option<&[u32]> {
        self.slot(var).as_deref()
    }

    /// Does this profile have flags for the variable?
    #[inline]
    pub fn is_present(&self, var: FlagVariable) -> bool {
        self.slot(var).is_some()
    }

    /// OR a flag into the word for `var` at `level`.
    ///
    /// Returns `false` without doing anything if the variable is not present.
    ///
    /// # Panics
    ///
    /// If the variable is present and `level` is beyond the end of its flags. The orchestrator
    /// verifies the lengths before any check runs, so this is a bug in the calling check.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::{FlagVariable, ProfileFlags, QcFlag};
    ///
    /// let mut flags = ProfileFlags::new().with_flags(FlagVariable::Height, vec![0, 0]);
    ///
    /// assert!(flags.set_flag(FlagVariable::Height, 1, QcFlag::FinalReject));
    /// assert!(!flags.set_flag(FlagVariable::Wind, 1, QcFlag::FinalReject));
    /// assert!(flags.has_flag(FlagVariable::Height, 1, QcFlag::FinalReject));
    /// assert!(!flags.has_flag(FlagVariable::Height, 0, QcFlag::FinalReject));
    /// ```
    pub fn set_flag(&mut self, var: FlagVariable, level: usize, flag: QcFlag) -> bool {
        match self.slot_mut(var) {
            Some(words) => {
                assert!(
                    level < words.len(),
                    "level {} is beyond the {} {} flags",
                    level,
                    words.len(),
                    var
                );
                words[level] |= flag.bits();
                true
            }
            None => false,
        }
    }

    /// Is `flag` set for `var` at `level`? Absent variables and levels have no flags set.
    #[inline]
    pub fn has_flag(&self, var: FlagVariable, level: usize, flag: QcFlag) -> bool {
        self.flags(var)
            .and_then(|words| words.get(level))
            .map_or(false, |&word| flag.is_set_in(word))
    }

    /// Get the value of a counter, zero if it has never been incremented.
    #[inline]
    pub fn counter(&self, name: &str) -> u32 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Add one to a counter.
    pub fn increment_counter(&mut self, name: &str) {
        *self.counters.entry(name.to_owned()).or_insert(0) += 1;
    }

    /// All the counters that have been incremented.
    #[inline]
    pub fn counters(&self) -> &BTreeMap<String, u32> {
        &self.counters
    }

    /// Record the outcome of the basic checks.
    #[inline]
    pub fn set_basic_check_result(&mut self, passed: bool) {
        self.basic_check_failed = !passed;
    }

    /// Did the basic checks pass? True until the basic check records otherwise.
    #[inline]
    pub fn basic_check_result(&self) -> bool {
        !self.basic_check_failed
    }

    /// Verify every present flag vector covers the levels that will be checked.
    pub fn verify_lengths(&self, num_levels_to_check: usize) -> Result<()> {
        use strum::IntoEnumIterator;

        for var in FlagVariable::iter() {
            if let Some(words) = self.flags(var) {
                if words.len() < num_levels_to_check {
                    return Err(QcError::FlagsTooShort {
                        variable: var.name(),
                        required: num_levels_to_check,
                        found: words.len(),
                    });
                }
            }
        }

        Ok(())
    }
}
