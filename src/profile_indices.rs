//! Level bookkeeping for a profile.
use crate::{options::ProfileCheckOptions, profile_data::ProfileData};

/// Indices derived once per profile from its size and the options.
///
/// `num_levels_to_check` never exceeds the number of levels in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileIndices {
    profile_number: usize,
    num_levels: usize,
    num_levels_to_check: usize,
}

impl ProfileIndices {
    /// Work out the levels to check in a profile.
    ///
    /// `profile_number` is the position of the profile in the batch being processed and is only
    /// used for labelling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::{ProfileCheckOptions, ProfileIndices};
    /// # use sounding_qc::doctest::make_test_profile;
    ///
    /// let data = make_test_profile();
    /// let opts = ProfileCheckOptions {
    ///     max_levels: Some(2),
    ///     ..ProfileCheckOptions::default()
    /// };
    ///
    /// let indices = ProfileIndices::new(0, &data, &opts);
    /// assert_eq!(indices.num_levels(), 4);
    /// assert_eq!(indices.num_levels_to_check(), 2);
    /// ```
    pub fn new(profile_number: usize, data: &ProfileData, options: &ProfileCheckOptions) -> Self {
        let num_levels = data.num_levels();
        let num_levels_to_check = options
            .max_levels
            .map_or(num_levels, |max_levels| max_levels.min(num_levels));

        ProfileIndices {
            profile_number,
            num_levels,
            num_levels_to_check,
        }
    }

    /// Position of this profile in the batch.
    #[inline]
    pub fn profile_number(&self) -> usize {
        self.profile_number
    }

    /// Number of levels reported in the profile.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// Number of levels, starting from the first, that the checks look at.
    #[inline]
    pub fn num_levels_to_check(&self) -> usize {
        self.num_levels_to_check
    }
}
