//! A profile waiting for, or done with, quality control.
use crate::{profile_data::ProfileData, profile_flags::ProfileFlags};

/// The data of one profile together with its flags.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    data: ProfileData,
    flags: ProfileFlags,
}

impl Profile {
    /// Create a profile with zeroed flags for each reported variable.
    pub fn new(data: ProfileData) -> Self {
        let flags = ProfileFlags::from_data(&data);
        Profile { data, flags }
    }

    /// Create a profile with flags carried over from an earlier stage.
    pub fn with_flags(data: ProfileData, flags: ProfileFlags) -> Self {
        Profile { data, flags }
    }

    /// Get the data.
    #[inline]
    pub fn data(&self) -> &ProfileData {
        &self.data
    }

    /// Get the flags.
    #[inline]
    pub fn flags(&self) -> &ProfileFlags {
        &self.flags
    }

    /// Borrow the data to read and the flags to modify at the same time.
    #[inline]
    pub(crate) fn split_mut(&mut self) -> (&ProfileData, &mut ProfileFlags) {
        (&self.data, &mut self.flags)
    }

    /// Take the profile apart.
    #[inline]
    pub fn into_parts(self) -> (ProfileData, ProfileFlags) {
        (self.data, self.flags)
    }
}
