//! Search-path templates with request placeholders.
//!
//! Templates may contain `{application}`, `{profile}` and `{label}`:
//!
//! ```text
//! file:./config/{application}/{profile}
//! optional:https://bucket.example/{label}/
//! ```
//!
//! A template mentioning `{profile}` yields one location per requested
//! profile, in request order.

use anyhow::Result;

use crate::core::{Location, LocationList, ProfileSet, DEFAULT_PROFILE};
use crate::resolver::LocationResolver;

/// Label used when a request does not name one.
pub const DEFAULT_LABEL: &str = "main";

/// Resolves locations from placeholder templates.
#[derive(Debug, Clone)]
pub struct SearchPathLocator {
    templates: Vec<String>,
    default_label: String,
}

impl SearchPathLocator {
    pub fn new(templates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        SearchPathLocator {
            templates: templates.into_iter().map(Into::into).collect(),
            default_label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Set the label substituted when a request has a blank label.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }
}

impl LocationResolver for SearchPathLocator {
    fn locations(&self, application: &str, profile: &str, label: &str) -> Result<LocationList> {
        let label = if label.trim().is_empty() {
            self.default_label.as_str()
        } else {
            label
        };
        let profiles = ProfileSet::parse(profile);

        let mut locations = LocationList::new();
        let mut push = |raw: String| {
            let location = Location::parse(&raw);
            if !locations.iter().any(|l| *l == location) {
                locations.push(location);
            }
        };

        for template in &self.templates {
            let expanded = template
                .replace("{application}", application)
                .replace("{label}", label);

            if !expanded.contains("{profile}") {
                push(expanded);
                continue;
            }

            for profile in profiles.iter() {
                let profile = if profile.is_empty() {
                    DEFAULT_PROFILE
                } else {
                    profile
                };
                push(expanded.replace("{profile}", profile));
            }
        }

        tracing::debug!(
            "{} search location(s) for {}/{}/{}",
            locations.len(),
            application,
            profile,
            label
        );

        Ok(locations)
    }
}
