//! Resource lookup error types and diagnostics.

use thiserror::Error;

use crate::storage::StorageError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error returned by a resource lookup.
///
/// Unsafe locations and candidates are never errors; they are dropped from
/// the search. Only an exhausted search yields [`ResourceError::NotFound`].
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("invalid resource path `{path}`: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("resource not found: `{path}`")]
    NotFound {
        path: String,
        /// Locations that were searched, in order
        searched: Vec<String>,
    },

    #[error("error resolving `{path}` in `{location}`")]
    Resolution {
        path: String,
        location: String,
        #[source]
        source: StorageError,
    },

    #[error("failed to determine search locations for `{application}`: {message}")]
    Locations { application: String, message: String },

    #[error("not a directory: `{url}`")]
    NotADirectory { url: String },

    #[error("failed to package `{url}`: {message}")]
    Packaging { url: String, message: String },
}

impl ResourceError {
    /// Whether the error means "nothing there" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResourceError::InvalidPath { path, reason } => {
                Diagnostic::error(format!("invalid resource path `{}`", path))
                    .with_context(reason.to_string())
                    .with_suggestion(suggestions::RELATIVE_PATH)
            }

            ResourceError::NotFound { path, searched } => {
                let mut diag = Diagnostic::error(format!("resource not found: `{}`", path));

                if searched.is_empty() {
                    diag = diag.with_context("no usable search locations");
                } else {
                    for location in searched {
                        diag = diag.with_context(format!("searched {}", location));
                    }
                }

                diag.with_suggestion(suggestions::CHECK_LOCATIONS)
                    .with_suggestion(suggestions::CHECK_PROFILE)
            }

            ResourceError::Resolution {
                path,
                location,
                source,
            } => Diagnostic::error(format!("error resolving `{}`", path))
                .with_location(location.clone())
                .with_context(source.to_string())
                .with_suggestion(suggestions::RETRY)
                .with_suggestion(suggestions::MARK_OPTIONAL),

            ResourceError::Locations {
                application,
                message,
            } => Diagnostic::error(format!(
                "failed to determine search locations for `{}`",
                application
            ))
            .with_context(message.clone())
            .with_suggestion(suggestions::CHECK_LOCATIONS),

            ResourceError::NotADirectory { url } => {
                Diagnostic::error("cannot archive a single file")
                    .with_location(url.clone())
                    .with_context("only directories can be packaged")
                    .with_suggestion(suggestions::DROP_ARCHIVE)
            }

            ResourceError::Packaging { url, message } => {
                Diagnostic::error(format!("failed to package `{}`", url))
                    .with_context(message.clone())
                    .with_suggestion(suggestions::RETRY)
            }
        }
    }
}
