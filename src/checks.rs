//! The profile check contract and the checks provided by this crate.
//!
//! A check inspects one profile, decides whether it passes, and may flag levels it judges bad.
//! Checks are run one after another on the same `ProfileFlags`, in the order given by the
//! configuration, so a check can rely on what the checks before it flagged.
//!
//! Failing is a normal outcome and is reported through `result`, not as an error. A check only
//! returns `Err` when it cannot make sense of its inputs at all.
use crate::{
    error::Result,
    keys::{FlagVariable, QcFlag},
    profile_data::ProfileData,
    profile_flags::ProfileFlags,
    profile_indices::ProfileIndices,
    validator::ProfileCheckValidator,
};
use itertools::izip;
use metfor::{Celsius, HectoPascal};

mod basic;
pub use basic::BasicCheck;
mod same_p_diff_t;
pub use same_p_diff_t::SamePDiffTCheck;
mod unstable_layer;
pub use unstable_layer::UnstableLayerCheck;
mod wind_consistency;
pub use wind_consistency::WindConsistencyCheck;

/// Everything a check can see while it runs: read only data and indices, mutable flags.
#[derive(Debug)]
pub struct CheckContext<'a> {
    /// Level bookkeeping for the profile.
    pub indices: &'a ProfileIndices,
    /// The measurements.
    pub data: &'a ProfileData,
    /// Flags and counters shared with the other checks.
    pub flags: &'a mut ProfileFlags,
}

/// A single consistency check on a profile.
///
/// Implementations must cope with zero levels to check and with any flag vector being absent,
/// and must never flag a level at or beyond `num_levels_to_check`. A check that is skipped by its
/// options passes and leaves the flags and counters as it found them.
pub trait ProfileCheck: Send {
    /// The name this check is registered under.
    fn name(&self) -> &'static str;

    /// Run the check, storing the result and updating the flags.
    fn run_check(&mut self, ctx: &mut CheckContext<'_>) -> Result<()>;

    /// Did the profile pass the last run of this check? True before the first run.
    fn result(&self) -> bool;

    /// Push the final flags and counters this check is responsible for into the validator.
    fn fill_validator(&self, flags: &ProfileFlags, validator: &mut ProfileCheckValidator);
}

/// Checked levels with both pressure and temperature, leaving out temperatures already rejected.
///
/// Empty if either profile is absent.
fn usable_temperature_levels(ctx: &CheckContext<'_>) -> Vec<(usize, HectoPascal, Celsius)> {
    let flags = &*ctx.flags;

    izip!(
        0usize..,
        ctx.data.pressure_profile(),
        ctx.data.temperature_profile()
    )
    .take(ctx.indices.num_levels_to_check())
    .filter(|&(lvl, _, _)| !flags.has_flag(FlagVariable::Temperature, lvl, QcFlag::FinalReject))
    .filter_map(|(lvl, p, t)| {
        if p.is_some() && t.is_some() {
            Some((lvl, p.unpack(), t.unpack()))
        } else {
            None
        }
    })
    .collect()
}
