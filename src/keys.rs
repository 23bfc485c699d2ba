//! Enums and names used as keys for QC flags and counters.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The variables that carry a flag word at each level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FlagVariable {
    /// Air temperature
    Temperature,
    /// Geopotential height
    Height,
    /// Both wind components share one flag word.
    Wind,
}

impl FlagVariable {
    /// Name used in log messages and errors.
    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Bits that may be set in a level's flag word.
///
/// A word is a plain `u32` so flags received from elsewhere can be carried through untouched,
/// bits without a variant here are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[repr(u32)]
pub enum QcFlag {
    /// The value at this level must not be used downstream.
    FinalReject = 1 << 3,
    /// Two reports at the same pressure have different temperatures.
    SamePDiffT = 1 << 8,
    /// The layer ending at this level is superadiabatic.
    Superadiabat = 1 << 9,
    /// Wind components are incomplete or the speed is implausible.
    InconsistentWind = 1 << 10,
}

impl QcFlag {
    /// The bit mask for this flag.
    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Is this flag set in the word?
    #[inline]
    pub fn is_set_in(self, word: u32) -> bool {
        word & self.bits() != 0
    }

    /// List the known flags set in a word.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::QcFlag;
    ///
    /// let word = QcFlag::FinalReject.bits() | QcFlag::SamePDiffT.bits();
    /// assert_eq!(QcFlag::decode(word), vec![QcFlag::FinalReject, QcFlag::SamePDiffT]);
    /// assert!(QcFlag::decode(0).is_empty());
    /// ```
    pub fn decode(word: u32) -> Vec<QcFlag> {
        use strum::IntoEnumIterator;

        QcFlag::iter().filter(|flag| flag.is_set_in(word)).collect()
    }
}

/// Names of the counters kept in the profile flags.
///
/// Checks may use any name, these are the ones used by the checks in this crate.
pub mod counters {
    /// Total errors of any kind found in the profile.
    pub const NUM_ANY_ERRORS: &str = "NumAnyErrors";
    /// Pairs of levels with the same pressure and different temperatures.
    pub const NUM_SAME_P_ERR_OBS: &str = "NumSamePErrObs";
    /// Superadiabatic layers.
    pub const NUM_SUPERADIABAT: &str = "NumSuperadiabat";
    /// Levels with inconsistent wind.
    pub const NUM_INCONSISTENT_WIND: &str = "NumInconsistentWind";
}
