//! Options controlling which checks run and how they judge a profile.
//!
//! The field names used in configuration files are the long standing names of the profile
//! consistency checks, e.g. `BChecks_maxValidP`, so existing configurations deserialize as they
//! are. Reading the configuration from disk is left to the caller, any serde format will do.
use crate::error::{QcError, Result};
use serde::{Deserialize, Serialize};

/// Options for the profile consistency checks.
///
/// Every field has a default, so a configuration only needs to mention what it changes.
///
/// # Examples
///
/// ```rust
/// use sounding_qc::ProfileCheckOptions;
///
/// let opts = ProfileCheckOptions::default();
/// assert_eq!(opts.checks, vec!["Basic".to_owned()]);
/// assert!(opts.flag_basic_checks_fail);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCheckOptions {
    /// Names of the checks to run, in the order they run.
    #[serde(rename = "Checks")]
    pub checks: Vec<String>,

    /// Maximum number of levels to check in a profile, `None` checks every level.
    #[serde(rename = "maxlev")]
    pub max_levels: Option<usize>,

    /// Skip the basic checks.
    #[serde(rename = "BChecks_Skip")]
    pub bchecks_skip: bool,
    /// Maximum valid pressure (hPa) at the first level.
    #[serde(rename = "BChecks_maxValidP")]
    pub bchecks_max_valid_p: f64,
    /// The pressure (hPa) at the last level must be above this value.
    #[serde(rename = "BChecks_minValidP")]
    pub bchecks_min_valid_p: f64,
    /// Set the final reject flag on every checked level when the basic checks fail.
    #[serde(rename = "flagBasicChecksFail")]
    pub flag_basic_checks_fail: bool,

    /// Skip the same pressure, different temperature check.
    #[serde(rename = "SPDTCheck_Skip")]
    pub spdt_skip: bool,
    /// Temperature difference (K) above which two reports at the same pressure disagree.
    #[serde(rename = "SPDTCheck_TThresh")]
    pub spdt_t_thresh: f64,

    /// Skip the unstable layer check.
    #[serde(rename = "ULCheck_Skip")]
    pub ul_skip: bool,
    /// Change in potential temperature (K) between levels below which a layer is superadiabatic.
    #[serde(rename = "ULCheck_SuperadiabatTol")]
    pub ul_superadiabat_tol: f64,
    /// Depth (hPa) above the first level treated as boundary layer and not checked.
    #[serde(rename = "ULCheck_PBThresh")]
    pub ul_pb_thresh: f64,

    /// Skip the wind consistency check.
    #[serde(rename = "WCheck_Skip")]
    pub wind_skip: bool,
    /// Maximum plausible wind speed (m/s).
    #[serde(rename = "WCheck_MaxSpeed")]
    pub wind_max_speed: f64,
}

impl Default for ProfileCheckOptions {
    fn default() -> Self {
        ProfileCheckOptions {
            checks: vec!["Basic".to_owned()],
            max_levels: None,

            bchecks_skip: false,
            bchecks_max_valid_p: 1100.0,
            bchecks_min_valid_p: 0.0,
            flag_basic_checks_fail: true,

            spdt_skip: false,
            spdt_t_thresh: 1.0,

            ul_skip: false,
            ul_superadiabat_tol: -1.0,
            ul_pb_thresh: 50.0,

            wind_skip: false,
            wind_max_speed: 150.0,
        }
    }
}

impl ProfileCheckOptions {
    /// Builder method for the list of checks to run.
    pub fn with_checks<I, S>(mut self, checks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checks = checks.into_iter().map(Into::into).collect();
        self
    }

    /// Look for thresholds that can never be satisfied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::ProfileCheckOptions;
    ///
    /// let opts = ProfileCheckOptions {
    ///     bchecks_max_valid_p: 50.0,
    ///     bchecks_min_valid_p: 100.0,
    ///     ..ProfileCheckOptions::default()
    /// };
    /// assert!(opts.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !(self.bchecks_min_valid_p < self.bchecks_max_valid_p) {
            return Err(QcError::InvalidOption(format!(
                "BChecks_minValidP ({}) must be less than BChecks_maxValidP ({})",
                self.bchecks_min_valid_p, self.bchecks_max_valid_p
            )));
        }

        if !(self.spdt_t_thresh >= 0.0) {
            return Err(QcError::InvalidOption(format!(
                "SPDTCheck_TThresh ({}) must not be negative",
                self.spdt_t_thresh
            )));
        }

        if !(self.ul_pb_thresh >= 0.0) {
            return Err(QcError::InvalidOption(format!(
                "ULCheck_PBThresh ({}) must not be negative",
                self.ul_pb_thresh
            )));
        }

        if !(self.wind_max_speed > 0.0) {
            return Err(QcError::InvalidOption(format!(
                "WCheck_MaxSpeed ({}) must be positive",
                self.wind_max_speed
            )));
        }

        Ok(())
    }
}
