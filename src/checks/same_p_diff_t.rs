//! Reports at the same pressure that disagree on the temperature.
//!
//! Some profiles repeat a level, e.g. when a significant level and a standard level coincide. If
//! the repeats give different temperatures there is no telling which is right, so both are
//! rejected.
use super::{usable_temperature_levels, CheckContext, ProfileCheck};
use crate::{
    error::Result,
    keys::{
        counters::{NUM_ANY_ERRORS, NUM_SAME_P_ERR_OBS},
        FlagVariable, QcFlag,
    },
    options::ProfileCheckOptions,
    profile_flags::ProfileFlags,
    validator::ProfileCheckValidator,
};
use itertools::Itertools;
use metfor::Quantity;
use tracing::{debug, warn};

/// Same pressure, different temperature check, registered as "SamePDiffT".
#[derive(Debug, Clone)]
pub struct SamePDiffTCheck {
    skip: bool,
    t_thresh: f64,
    result: bool,
}

impl SamePDiffTCheck {
    /// Name the check is registered under.
    pub const NAME: &'static str = "SamePDiffT";

    /// Create the check from the `SPDTCheck_*` options.
    pub fn new(options: &ProfileCheckOptions) -> Self {
        SamePDiffTCheck {
            skip: options.spdt_skip,
            t_thresh: options.spdt_t_thresh,
            result: true,
        }
    }

    /// Boxed constructor for the registry.
    pub fn make(options: &ProfileCheckOptions) -> Box<dyn ProfileCheck> {
        Box::new(Self::new(options))
    }
}

impl ProfileCheck for SamePDiffTCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run_check(&mut self, ctx: &mut CheckContext<'_>) -> Result<()> {
        debug!("same pressure, different temperature check");

        self.result = true;

        if self.skip {
            warn!("skipping same pressure, different temperature check");
            return Ok(());
        }

        if !ctx.flags.basic_check_result() {
            debug!(" -> basic checks failed, not applied");
            return Ok(());
        }

        let clashes: Vec<(usize, usize)> = usable_temperature_levels(ctx)
            .into_iter()
            .tuple_windows::<(_, _)>()
            .filter(|&((_, p0, t0), (_, p1, t1))| {
                p0 == p1 && (t1 - t0).unpack().abs() > self.t_thresh
            })
            .map(|((lvl0, _, _), (lvl1, _, _))| (lvl0, lvl1))
            .collect();

        for (lvl0, lvl1) in clashes {
            debug!(" -> levels {} and {} disagree", lvl0, lvl1);

            for &lvl in &[lvl0, lvl1] {
                ctx.flags
                    .set_flag(FlagVariable::Temperature, lvl, QcFlag::SamePDiffT);
                ctx.flags
                    .set_flag(FlagVariable::Temperature, lvl, QcFlag::FinalReject);
            }

            ctx.flags.increment_counter(NUM_SAME_P_ERR_OBS);
            ctx.flags.increment_counter(NUM_ANY_ERRORS);
            self.result = false;
        }

        debug!(" -> samePDiffTResult: {}", self.result);

        Ok(())
    }

    fn result(&self) -> bool {
        self.result
    }

    fn fill_validator(&self, flags: &ProfileFlags, validator: &mut ProfileCheckValidator) {
        if let Some(words) = flags.flags(FlagVariable::Temperature) {
            validator.set_flags(FlagVariable::Temperature, words);
        }
        validator.set_counter(NUM_SAME_P_ERR_OBS, flags.counter(NUM_SAME_P_ERR_OBS));
        validator.set_counter(NUM_ANY_ERRORS, flags.counter(NUM_ANY_ERRORS));
    }
}
