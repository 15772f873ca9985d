//! Search locations - WHERE resources are looked up.
//!
//! A location is the raw string produced by a location resolver, e.g.
//! `file:./config/`, `/srv/config`, `https://bucket.example/config/`,
//! optionally prefixed with `optional:`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::util::fs::normalize_path;

/// Marker prefix for a location that may be skipped when unavailable.
pub const OPTIONAL_PREFIX: &str = "optional:";

/// One base place to search for a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Location {
    /// Location without the optional marker
    value: String,
    /// Whether the location carried the optional marker
    optional: bool,
}

/// The kind of backend a location points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationKind {
    /// Local filesystem directory
    File(PathBuf),
    /// Object store reachable over HTTP(S)
    Http(Url),
}

impl LocationKind {
    /// URL scheme of the location.
    pub fn scheme(&self) -> &str {
        match self {
            LocationKind::File(_) => "file",
            LocationKind::Http(url) => url.scheme(),
        }
    }
}

impl Location {
    /// Parse a location string, stripping a leading `optional:` marker.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(OPTIONAL_PREFIX) {
            Some(rest) => Location {
                value: rest.to_string(),
                optional: true,
            },
            None => Location {
                value: raw.to_string(),
                optional: false,
            },
        }
    }

    /// The location without its optional marker.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether this location may be skipped when it cannot be searched.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Classify the location by scheme.
    ///
    /// `file:` prefixes and bare paths are filesystem locations. Relative
    /// paths are kept relative; [`Location::base_url`] anchors them.
    pub fn kind(&self) -> Result<LocationKind> {
        let value = self.value.as_str();

        if value.starts_with("http://") || value.starts_with("https://") {
            let url = Url::parse(&with_trailing_slash(value))
                .with_context(|| format!("invalid location URL: {}", value))?;
            return Ok(LocationKind::Http(url));
        }

        if let Some(rest) = value.strip_prefix("file:") {
            if rest.starts_with("//") {
                let url = Url::parse(value)
                    .with_context(|| format!("invalid file location: {}", value))?;
                let path = url
                    .to_file_path()
                    .map_err(|_| anyhow!("file location has no local path: {}", value))?;
                return Ok(LocationKind::File(path));
            }
            return Ok(LocationKind::File(PathBuf::from(rest)));
        }

        if let Some((scheme, _)) = value.split_once("://") {
            anyhow::bail!("unsupported location scheme `{}`: {}", scheme, value);
        }

        Ok(LocationKind::File(PathBuf::from(value)))
    }

    /// The location as an absolute URL with a trailing slash, relative
    /// filesystem paths being anchored at `cwd`.
    pub fn base_url(&self, cwd: &Path) -> Result<Url> {
        match self.kind()? {
            LocationKind::Http(url) => Ok(url),
            LocationKind::File(path) => {
                let absolute = if path.is_absolute() {
                    path
                } else {
                    cwd.join(path)
                };
                let absolute = normalize_path(&absolute);
                Url::from_directory_path(&absolute)
                    .map_err(|_| anyhow!("invalid location path: {}", absolute.display()))
            }
        }
    }
}

fn with_trailing_slash(value: &str) -> String {
    if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{}/", value)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{}{}", OPTIONAL_PREFIX, self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Location::parse(&raw)
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::parse(raw)
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

/// Ordered search locations, most specific first.
///
/// Resolvers hand out owned lists, so reordering one never affects another
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationList {
    locations: Vec<Location>,
}

impl LocationList {
    /// Create an empty list.
    pub fn new() -> Self {
        LocationList {
            locations: Vec::new(),
        }
    }

    /// Append a location.
    pub fn push(&mut self, location: Location) {
        self.locations.push(location);
    }

    /// Append all locations from another list.
    pub fn extend(&mut self, other: LocationList) {
        self.locations.extend(other.locations);
    }

    /// Reverse the search order.
    pub fn reverse(&mut self) {
        self.locations.reverse();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl FromIterator<Location> for LocationList {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        LocationList {
            locations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LocationList {
    type Item = Location;
    type IntoIter = std::vec::IntoIter<Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.into_iter()
    }
}

impl<'a> IntoIterator for &'a LocationList {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.locations.iter()
    }
}
