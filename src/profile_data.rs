//! Data type and methods to store the measurements of a single profile.

use crate::error::{QcError, Result};
use chrono::NaiveDateTime;
use metfor::{Celsius, HectoPascal, Meters, MetersPSec};
use optional::Optioned;

/// The measurements reported at each level of one profile.
///
/// The profile variables are stored in parallel vectors indexed by level, with the first level
/// lowest in the atmosphere. If a profile lacks a certain variable, e.g. wind, that whole vector
/// has length 0 instead of being full of missing values. Every variable that was reported has the
/// same number of levels, see `validate`.
///
/// The data is only read by the checks, never modified.
#[derive(Clone, Debug, Default)]
pub struct ProfileData {
    // Station identifier, used to label log messages
    station_id: Option<String>,

    // Valid time of the profile
    valid_time: Option<NaiveDateTime>,

    // Profiles
    pressure: Vec<Optioned<HectoPascal>>,
    temperature: Vec<Optioned<Celsius>>,
    height: Vec<Optioned<Meters>>,
    u_wind: Vec<Optioned<MetersPSec>>,
    v_wind: Vec<Optioned<MetersPSec>>,
}

macro_rules! make_profile_setter {
    ($(#[$attr:meta])* => $name:tt, $inner_type:tt, $p_var:ident) => {
        $(#[$attr])*
        pub fn $name(self, profile: Vec<Optioned<$inner_type>>) -> Self {
            Self {$p_var: profile, ..self}
        }
    };
}

impl ProfileData {
    /// Create a new profile with no data. This is a proxy for default with a clearer name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::ProfileData;
    ///
    /// let data = ProfileData::new();
    /// assert_eq!(data.num_levels(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        ProfileData::default()
    }

    /// Builder method for the station identifier.
    #[inline]
    pub fn with_station_id<S>(mut self, id: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.station_id = Option::from(id);
        self
    }

    /// Get the station identifier.
    #[inline]
    pub fn station_id(&self) -> Option<&str> {
        self.station_id.as_deref()
    }

    /// Builder method for the valid time.
    #[inline]
    pub fn with_valid_time<T>(mut self, valid_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.valid_time = Option::from(valid_time);
        self
    }

    /// Get the valid time.
    #[inline]
    pub fn valid_time(&self) -> Option<NaiveDateTime> {
        self.valid_time
    }

    make_profile_setter!(
        /// Builder method for the pressure profile.
        ///
        /// # Examples
        /// ```rust
        /// use sounding_qc::ProfileData;
        /// use metfor::HectoPascal;
        /// use optional::{some, Optioned};
        ///
        /// let data = vec![1000.0, 925.0, 850.0, 700.0, 500.0, 300.0, 250.0, 200.0, 150.0, 100.0];
        /// let pressure_data: Vec<Optioned<HectoPascal>> = data.into_iter()
        ///     .map(HectoPascal)
        ///     .map(some)
        ///     .collect();
        ///
        /// let data = ProfileData::new().with_pressure_profile(pressure_data);
        /// assert_eq!(data.num_levels(), 10);
        /// ```
        #[inline]
        => with_pressure_profile, HectoPascal, pressure
    );

    /// Get the pressure profile.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::ProfileData;
    /// # use sounding_qc::doctest::make_test_profile;
    ///
    /// let data = make_test_profile();
    ///
    /// for p in data.pressure_profile() {
    ///     if let Some(p) = p.into_option() {
    ///         println!("{:?}", p);
    ///     } else {
    ///         println!("missing value!");
    ///     }
    /// }
    ///
    /// // Variables that were not reported are empty.
    /// let data = ProfileData::new();
    /// assert!(data.pressure_profile().is_empty());
    /// ```
    #[inline]
    pub fn pressure_profile(&self) -> &[Optioned<HectoPascal>] {
        &self.pressure
    }

    make_profile_setter!(
        /// Builder method for the temperature profile.
        ///
        /// See `with_pressure_profile` for an example of usage, keeping in mind the units type may
        /// be different.
        #[inline]
        => with_temperature_profile, Celsius, temperature
    );

    /// Get the temperature profile.
    #[inline]
    pub fn temperature_profile(&self) -> &[Optioned<Celsius>] {
        &self.temperature
    }

    make_profile_setter!(
        /// Builder method for the geopotential height profile.
        #[inline]
        => with_height_profile, Meters, height
    );

    /// Get the geopotential height profile.
    #[inline]
    pub fn height_profile(&self) -> &[Optioned<Meters>] {
        &self.height
    }

    make_profile_setter!(
        /// Builder method for the eastward wind component profile.
        #[inline]
        => with_u_wind_profile, MetersPSec, u_wind
    );

    /// Get the eastward wind component profile.
    #[inline]
    pub fn u_wind_profile(&self) -> &[Optioned<MetersPSec>] {
        &self.u_wind
    }

    make_profile_setter!(
        /// Builder method for the northward wind component profile.
        #[inline]
        => with_v_wind_profile, MetersPSec, v_wind
    );

    /// Get the northward wind component profile.
    #[inline]
    pub fn v_wind_profile(&self) -> &[Optioned<MetersPSec>] {
        &self.v_wind
    }

    /// Lengths of each profile variable, in a fixed order.
    fn profile_lengths(&self) -> [(&'static str, usize); 5] {
        [
            ("pressure", self.pressure.len()),
            ("temperature", self.temperature.len()),
            ("height", self.height.len()),
            ("u_wind", self.u_wind.len()),
            ("v_wind", self.v_wind.len()),
        ]
    }

    /// The number of levels in the profile, zero if nothing was reported.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.profile_lengths()
            .iter()
            .map(|&(_, len)| len)
            .find(|&len| len > 0)
            .unwrap_or(0)
    }

    /// Check that every reported variable has the same number of levels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::ProfileData;
    /// use metfor::{Celsius, HectoPascal};
    /// use optional::some;
    ///
    /// let data = ProfileData::new()
    ///     .with_pressure_profile(vec![some(HectoPascal(1000.0)), some(HectoPascal(900.0))])
    ///     .with_temperature_profile(vec![some(Celsius(15.0))]);
    ///
    /// assert!(data.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let expected = self.num_levels();

        match self
            .profile_lengths()
            .iter()
            .find(|&&(_, len)| len > 0 && len != expected)
        {
            Some(&(variable, found)) => Err(QcError::LengthMismatch {
                variable,
                expected,
                found,
            }),
            None => Ok(()),
        }
    }
}

// FIXME: only configure for test and doc tests, not possible as of 1.41
#[doc(hidden)]
pub mod doctest {
    use super::*;

    pub fn make_test_profile() -> ProfileData {
        use optional::some;

        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(925.0)),
            some(HectoPascal(850.0)),
            some(HectoPascal(700.0)),
        ];
        let t = vec![
            some(Celsius(20.0)),
            some(Celsius(18.0)),
            some(Celsius(12.0)),
            some(Celsius(2.0)),
        ];
        let z = vec![
            some(Meters(110.0)),
            some(Meters(780.0)),
            some(Meters(1_500.0)),
            some(Meters(3_100.0)),
        ];

        ProfileData::new()
            .with_station_id("03743".to_owned())
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_height_profile(z)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use optional::{none, some};

    #[test]
    fn test_num_levels() {
        let data = doctest::make_test_profile();
        assert_eq!(data.num_levels(), 4);
        assert!(data.validate().is_ok());

        // Pressure is not required to count the levels.
        let data = ProfileData::new().with_height_profile(vec![some(Meters(0.0)); 3]);
        assert_eq!(data.num_levels(), 3);
        assert!(data.validate().is_ok());

        assert_eq!(ProfileData::new().num_levels(), 0);
        assert!(ProfileData::new().validate().is_ok());
    }

    #[test]
    fn test_missing_values_count_as_levels() {
        let data = ProfileData::new()
            .with_pressure_profile(vec![some(HectoPascal(1000.0)), none(), some(HectoPascal(800.0))])
            .with_u_wind_profile(vec![none(), none(), none()]);

        assert_eq!(data.num_levels(), 3);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_length_mismatch() {
        let data = doctest::make_test_profile()
            .with_v_wind_profile(vec![some(MetersPSec(1.0)), some(MetersPSec(2.0))]);

        assert_eq!(
            data.validate(),
            Err(QcError::LengthMismatch {
                variable: "v_wind",
                expected: 4,
                found: 2
            })
        );
    }
}
