//! Basic plausibility of the pressure coordinate.
//!
//! A profile passes when there is at least one level to check, the pressure never increases going
//! up the profile, the first pressure is not above a maximum and the last pressure is above a
//! minimum. A single out of order pair fails the whole profile, since once the levels are out of
//! order none of the level to level comparisons made by other checks can be trusted.
use super::{CheckContext, ProfileCheck};
use crate::{
    error::Result,
    keys::{counters::NUM_ANY_ERRORS, FlagVariable, QcFlag},
    options::ProfileCheckOptions,
    profile_flags::ProfileFlags,
    validator::ProfileCheckValidator,
};
use itertools::Itertools;
use metfor::HectoPascal;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// The basic checks, registered as "Basic".
#[derive(Debug, Clone)]
pub struct BasicCheck {
    skip: bool,
    max_valid_p: HectoPascal,
    min_valid_p: HectoPascal,
    flag_failures: bool,
    result: bool,
}

impl BasicCheck {
    /// Name the check is registered under.
    pub const NAME: &'static str = "Basic";

    /// Create the check from the `BChecks_*` and `flagBasicChecksFail` options.
    pub fn new(options: &ProfileCheckOptions) -> Self {
        BasicCheck {
            skip: options.bchecks_skip,
            max_valid_p: HectoPascal(options.bchecks_max_valid_p),
            min_valid_p: HectoPascal(options.bchecks_min_valid_p),
            flag_failures: options.flag_basic_checks_fail,
            result: true,
        }
    }

    /// Boxed constructor for the registry.
    pub fn make(options: &ProfileCheckOptions) -> Box<dyn ProfileCheck> {
        Box::new(Self::new(options))
    }

    fn set_result(&mut self, result: bool, flags: &mut ProfileFlags) {
        self.result = result;
        flags.set_basic_check_result(result);
    }
}

impl ProfileCheck for BasicCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run_check(&mut self, ctx: &mut CheckContext<'_>) -> Result<()> {
        debug!("basic checks");

        self.set_result(true, ctx.flags);

        if self.skip {
            warn!("skipping basic checks");
            return Ok(());
        }

        let num_levels_to_check = ctx.indices.num_levels_to_check();
        let pressures = ctx.data.pressure_profile();

        if pressures.is_empty() {
            self.set_result(false, ctx.flags);
            warn!("pressure profile is empty");
            return Ok(());
        }

        let num_levels_to_check_ok = num_levels_to_check > 0;

        // A missing pressure breaks the order as surely as a wrong one.
        let press_order_ok = pressures
            .iter()
            .take(num_levels_to_check)
            .tuple_windows::<(_, _)>()
            .all(
                |(p0, p1)| match (p0.into_option(), p1.into_option()) {
                    (Some(p0), Some(p1)) => p0 >= p1,
                    _ => false,
                },
            );

        let max_press_ok = pressures
            .first()
            .and_then(|p| p.into_option())
            .map_or(false, |p| p <= self.max_valid_p);

        let min_press_ok = pressures
            .last()
            .and_then(|p| p.into_option())
            .map_or(false, |p| p > self.min_valid_p);

        debug!(" -> numLevelsToCheckOK: {}", num_levels_to_check_ok);
        debug!(" -> pressOrderOK: {}", press_order_ok);
        debug!(" -> maxPressOK: {}", max_press_ok);
        debug!(" -> minPressOK: {}", min_press_ok);

        let result = num_levels_to_check_ok && press_order_ok && max_press_ok && min_press_ok;
        self.set_result(result, ctx.flags);
        debug!(" -> basicResult: {}", result);

        if self.flag_failures && !result {
            for lvl in 0..num_levels_to_check {
                for var in FlagVariable::iter() {
                    ctx.flags.set_flag(var, lvl, QcFlag::FinalReject);
                }
            }
        }

        Ok(())
    }

    fn result(&self) -> bool {
        self.result
    }

    fn fill_validator(&self, flags: &ProfileFlags, validator: &mut ProfileCheckValidator) {
        for var in FlagVariable::iter() {
            if let Some(words) = flags.flags(var) {
                validator.set_flags(var, words);
            }
        }
        validator.set_counter(NUM_ANY_ERRORS, flags.counter(NUM_ANY_ERRORS));
    }
}
