//! Composite location resolution.

use std::fmt;

use anyhow::Result;

use crate::core::LocationList;
use crate::resolver::LocationResolver;

/// Concatenates the locations of several resolvers, in order.
pub struct CompositeLocator {
    members: Vec<Box<dyn LocationResolver>>,
    /// Abort when any member fails instead of skipping it
    fail_on_error: bool,
}

impl CompositeLocator {
    pub fn new(fail_on_error: bool) -> Self {
        CompositeLocator {
            members: Vec::new(),
            fail_on_error,
        }
    }

    /// Add a member resolver.
    pub fn with_member(mut self, member: impl LocationResolver + 'static) -> Self {
        self.members.push(Box::new(member));
        self
    }
}

impl fmt::Debug for CompositeLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeLocator")
            .field("members", &self.members.len())
            .field("fail_on_error", &self.fail_on_error)
            .finish()
    }
}

impl LocationResolver for CompositeLocator {
    fn locations(&self, application: &str, profile: &str, label: &str) -> Result<LocationList> {
        let mut all = LocationList::new();

        for (index, member) in self.members.iter().enumerate() {
            match member.locations(application, profile, label) {
                Ok(list) => all.extend(list),
                Err(e) if self.fail_on_error => {
                    return Err(e.context(format!(
                        "location resolver #{} failed for `{}`",
                        index, application
                    )));
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping location resolver #{} for `{}`: {:#}",
                        index,
                        application,
                        e
                    );
                }
            }
        }

        Ok(all)
    }
}
