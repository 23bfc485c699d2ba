//! Superadiabatic layers above the boundary layer.
//!
//! Potential temperature should not fall with height outside the boundary layer. Where it falls
//! by more than a tolerance between two consecutive usable levels, both levels are flagged. The
//! flag is informative, the levels are not rejected.
use super::{usable_temperature_levels, CheckContext, ProfileCheck};
use crate::{
    error::Result,
    keys::{
        counters::{NUM_ANY_ERRORS, NUM_SUPERADIABAT},
        FlagVariable, QcFlag,
    },
    options::ProfileCheckOptions,
    profile_flags::ProfileFlags,
    validator::ProfileCheckValidator,
};
use itertools::Itertools;
use metfor::Quantity;
use tracing::{debug, warn};

/// Unstable layer check, registered as "UnstableLayer".
#[derive(Debug, Clone)]
pub struct UnstableLayerCheck {
    skip: bool,
    superadiabat_tol: f64,
    pb_thresh: f64,
    result: bool,
}

impl UnstableLayerCheck {
    /// Name the check is registered under.
    pub const NAME: &'static str = "UnstableLayer";

    /// Create the check from the `ULCheck_*` options.
    pub fn new(options: &ProfileCheckOptions) -> Self {
        UnstableLayerCheck {
            skip: options.ul_skip,
            superadiabat_tol: options.ul_superadiabat_tol,
            pb_thresh: options.ul_pb_thresh,
            result: true,
        }
    }

    /// Boxed constructor for the registry.
    pub fn make(options: &ProfileCheckOptions) -> Box<dyn ProfileCheck> {
        Box::new(Self::new(options))
    }
}

impl ProfileCheck for UnstableLayerCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run_check(&mut self, ctx: &mut CheckContext<'_>) -> Result<()> {
        debug!("unstable layer check");

        self.result = true;

        if self.skip {
            warn!("skipping unstable layer check");
            return Ok(());
        }

        if !ctx.flags.basic_check_result() {
            debug!(" -> basic checks failed, not applied");
            return Ok(());
        }

        let levels = usable_temperature_levels(ctx);
        let p_base = match levels.first() {
            Some(&(_, p, _)) => p.unpack(),
            None => {
                debug!(" -> no temperatures, not applied");
                return Ok(());
            }
        };

        let superadiabats: Vec<(usize, usize)> = levels
            .into_iter()
            .map(|(lvl, p, t)| (lvl, p, metfor::potential_temperature(p, t)))
            .tuple_windows::<(_, _)>()
            .filter(|&((_, _, theta0), (_, p1, theta1))| {
                theta1.unpack() - theta0.unpack() < self.superadiabat_tol
                    && p_base - p1.unpack() > self.pb_thresh
            })
            .map(|((lvl0, _, _), (lvl1, _, _))| (lvl0, lvl1))
            .collect();

        for (lvl0, lvl1) in superadiabats {
            debug!(" -> superadiabatic layer between levels {} and {}", lvl0, lvl1);

            ctx.flags
                .set_flag(FlagVariable::Temperature, lvl0, QcFlag::Superadiabat);
            ctx.flags
                .set_flag(FlagVariable::Temperature, lvl1, QcFlag::Superadiabat);
            ctx.flags.increment_counter(NUM_SUPERADIABAT);
            ctx.flags.increment_counter(NUM_ANY_ERRORS);
            self.result = false;
        }

        debug!(" -> unstableLayerResult: {}", self.result);

        Ok(())
    }

    fn result(&self) -> bool {
        self.result
    }

    fn fill_validator(&self, flags: &ProfileFlags, validator: &mut ProfileCheckValidator) {
        if let Some(words) = flags.flags(FlagVariable::Temperature) {
            validator.set_flags(FlagVariable::Temperature, words);
        }
        validator.set_counter(NUM_SUPERADIABAT, flags.counter(NUM_SUPERADIABAT));
        validator.set_counter(NUM_ANY_ERRORS, flags.counter(NUM_ANY_ERRORS));
    }
}
