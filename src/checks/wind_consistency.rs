//! Wind reports that cannot be used as a vector.
//!
//! A level with only one of the two wind components, or with a speed no real wind reaches, is
//! rejected.
use super::{CheckContext, ProfileCheck};
use crate::{
    error::Result,
    keys::{
        counters::{NUM_ANY_ERRORS, NUM_INCONSISTENT_WIND},
        FlagVariable, QcFlag,
    },
    options::ProfileCheckOptions,
    profile_flags::ProfileFlags,
    validator::ProfileCheckValidator,
};
use metfor::{MetersPSec, Quantity};
use optional::Optioned;
use tracing::{debug, warn};

/// Wind consistency check, registered as "WindConsistency".
#[derive(Debug, Clone)]
pub struct WindConsistencyCheck {
    skip: bool,
    max_speed: MetersPSec,
    result: bool,
}

impl WindConsistencyCheck {
    /// Name the check is registered under.
    pub const NAME: &'static str = "WindConsistency";

    /// Create the check from the `WCheck_*` options.
    pub fn new(options: &ProfileCheckOptions) -> Self {
        WindConsistencyCheck {
            skip: options.wind_skip,
            max_speed: MetersPSec(options.wind_max_speed),
            result: true,
        }
    }

    /// Boxed constructor for the registry.
    pub fn make(options: &ProfileCheckOptions) -> Box<dyn ProfileCheck> {
        Box::new(Self::new(options))
    }

    fn is_inconsistent(&self, u: Option<MetersPSec>, v: Option<MetersPSec>) -> bool {
        match (u, v) {
            (Some(u), Some(v)) => u.unpack().hypot(v.unpack()) > self.max_speed.unpack(),
            (None, None) => false,
            _ => true,
        }
    }
}

// Value at a level, treating a short or absent profile as missing.
fn component(profile: &[Optioned<MetersPSec>], lvl: usize) -> Option<MetersPSec> {
    profile.get(lvl).and_then(|val| val.into_option())
}

impl ProfileCheck for WindConsistencyCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run_check(&mut self, ctx: &mut CheckContext<'_>) -> Result<()> {
        debug!("wind consistency check");

        self.result = true;

        if self.skip {
            warn!("skipping wind consistency check");
            return Ok(());
        }

        if !ctx.flags.basic_check_result() {
            debug!(" -> basic checks failed, not applied");
            return Ok(());
        }

        let u_wind = ctx.data.u_wind_profile();
        let v_wind = ctx.data.v_wind_profile();

        if u_wind.is_empty() && v_wind.is_empty() {
            debug!(" -> no wind, not applied");
            return Ok(());
        }

        if u_wind.is_empty() || v_wind.is_empty() {
            warn!("only one wind component reported");
        }

        let bad_levels: Vec<usize> = (0..ctx.indices.num_levels_to_check())
            .filter(|&lvl| self.is_inconsistent(component(u_wind, lvl), component(v_wind, lvl)))
            .collect();

        for lvl in bad_levels {
            debug!(" -> inconsistent wind at level {}", lvl);

            ctx.flags
                .set_flag(FlagVariable::Wind, lvl, QcFlag::InconsistentWind);
            ctx.flags
                .set_flag(FlagVariable::Wind, lvl, QcFlag::FinalReject);
            ctx.flags.increment_counter(NUM_INCONSISTENT_WIND);
            ctx.flags.increment_counter(NUM_ANY_ERRORS);
            self.result = false;
        }

        debug!(" -> windConsistencyResult: {}", self.result);

        Ok(())
    }

    fn result(&self) -> bool {
        self.result
    }

    fn fill_validator(&self, flags: &ProfileFlags, validator: &mut ProfileCheckValidator) {
        if let Some(words) = flags.flags(FlagVariable::Wind) {
            validator.set_flags(FlagVariable::Wind, words);
        }
        validator.set_counter(NUM_INCONSISTENT_WIND, flags.counter(NUM_INCONSISTENT_WIND));
        validator.set_counter(NUM_ANY_ERRORS, flags.counter(NUM_ANY_ERRORS));
    }
}
