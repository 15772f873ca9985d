//! Profiles and profile-specific path candidates.

use std::fmt;

/// Profile name that maps to the unsuffixed path.
pub const DEFAULT_PROFILE: &str = "default";

/// Ordered, de-duplicated set of profile names.
///
/// Parsed from a comma-delimited string such as `"local,cloud"`. Entries
/// are trimmed; blank entries are kept (once) because they mean "no
/// suffix", same as `default`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: Vec<String>,
}

impl ProfileSet {
    /// Split a comma-delimited profile string.
    pub fn parse(profiles: &str) -> Self {
        let mut set = ProfileSet::default();
        for profile in profiles.split(',') {
            set.insert(profile.trim());
        }
        set
    }

    /// Add a profile unless it is already present.
    pub fn insert(&mut self, profile: &str) {
        if !self.profiles.iter().any(|p| p == profile) {
            self.profiles.push(profile.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl fmt::Display for ProfileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profiles.join(","))
    }
}

/// Whether a profile name adds no suffix to the path.
pub fn is_unsuffixed(profile: &str) -> bool {
    profile.trim().is_empty() || profile == DEFAULT_PROFILE
}

/// Expand `path` into the ordered candidate sub-paths for `profiles`.
///
/// Each profile contributes `stem-profile.ext` (or the bare path for
/// blank/`default`), then the bare path is always appended last. Later
/// duplicates are dropped. Never empty.
///
/// ```
/// use quay::core::profile::{profile_paths, ProfileSet};
///
/// let paths = profile_paths("foo.txt", &ProfileSet::parse("local"));
/// assert_eq!(paths, vec!["foo-local.txt", "foo.txt"]);
/// ```
pub fn profile_paths(path: &str, profiles: &ProfileSet) -> Vec<String> {
    let mut paths: Vec<String> = Vec::with_capacity(profiles.len() + 1);

    let mut add = |candidate: String| {
        if !paths.contains(&candidate) {
            paths.push(candidate);
        }
    };

    for profile in profiles.iter() {
        if is_unsuffixed(profile) {
            add(path.to_string());
        } else {
            let (stem, ext) = split_extension(path);
            add(format!("{}-{}{}", stem, profile, ext));
        }
    }
    add(path.to_string());

    paths
}

/// Split a path into `(stem, extension)`, the extension keeping its dot.
///
/// Only the last path segment is considered, so `conf.d/app` has no
/// extension.
fn split_extension(path: &str) -> (&str, &str) {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) => path.split_at(name_start + dot),
        None => (path, ""),
    }
}
