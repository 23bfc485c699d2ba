//! Named factory for checks.
//!
//! Configurations refer to checks by name. The registry turns those names into check instances,
//! so the orchestrator never needs to know which checks exist. There is no global registry, one
//! is built at start up and handed to the orchestrator.
use crate::{
    checks::{
        BasicCheck, ProfileCheck, SamePDiffTCheck, UnstableLayerCheck, WindConsistencyCheck,
    },
    error::{QcError, Result},
    options::ProfileCheckOptions,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Creates a check from the options.
pub type CheckMaker = fn(&ProfileCheckOptions) -> Box<dyn ProfileCheck>;

/// Map from check name to check constructor.
///
/// Names are matched exactly, including case.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    makers: BTreeMap<String, CheckMaker>,
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl CheckRegistry {
    /// Create a registry with no checks in it.
    #[inline]
    pub fn new() -> Self {
        CheckRegistry::default()
    }

    /// Create a registry holding every check in this crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_qc::CheckRegistry;
    ///
    /// let registry = CheckRegistry::with_builtin_checks().unwrap();
    /// assert!(registry.contains("Basic"));
    /// assert!(!registry.contains("basic"));
    /// ```
    pub fn with_builtin_checks() -> Result<Self> {
        let mut registry = CheckRegistry::new();

        registry.register(BasicCheck::NAME, BasicCheck::make)?;
        registry.register(SamePDiffTCheck::NAME, SamePDiffTCheck::make)?;
        registry.register(UnstableLayerCheck::NAME, UnstableLayerCheck::make)?;
        registry.register(WindConsistencyCheck::NAME, WindConsistencyCheck::make)?;

        Ok(registry)
    }

    /// Bind a name to a check constructor. Registering a name twice is an error.
    pub fn register<S: Into<String>>(&mut self, name: S, maker: CheckMaker) -> Result<()> {
        use std::collections::btree_map::Entry;

        match self.makers.entry(name.into()) {
            Entry::Occupied(entry) => Err(QcError::DuplicateCheck(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!("registered check {}", entry.key());
                entry.insert(maker);
                Ok(())
            }
        }
    }

    /// Is there a check registered under this name?
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.makers.contains_key(name)
    }

    /// Names of all the registered checks, in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.makers.keys().map(String::as_str)
    }

    /// Create a new instance of the named check.
    pub fn create(
        &self,
        name: &str,
        options: &ProfileCheckOptions,
    ) -> Result<Box<dyn ProfileCheck>> {
        self.makers
            .get(name)
            .map(|maker| maker(options))
            .ok_or_else(|| QcError::UnknownCheck(name.to_owned()))
    }
}
