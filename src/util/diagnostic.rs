//! User-friendly diagnostic messages.
//!
//! Every error shown to a user carries the root cause, the context that
//! led to it, and suggested fixes.

use std::fmt::{self, Write as _};

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a requested path is rejected.
    pub const RELATIVE_PATH: &str =
        "Request a plain relative path without `..` segments or URL prefixes";

    /// Suggestion when a resource cannot be found anywhere.
    pub const CHECK_LOCATIONS: &str =
        "Run `quay locations <application> <profile> <label>` to see where quay searched";

    /// Suggestion when a profile-specific file may be misnamed.
    pub const CHECK_PROFILE: &str =
        "Run `quay candidates <profile> <path>` to see the file names quay tried";

    /// Suggestion for transient backend failures.
    pub const RETRY: &str = "Check the storage backend and retry the request";

    /// Suggestion when one location keeps failing.
    pub const MARK_OPTIONAL: &str =
        "Prefix the location with `optional:` if it may be unavailable";

    /// Suggestion when an archive was requested for a single file.
    pub const DROP_ARCHIVE: &str = "Request the path without `--archive`";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI color code for the label.
    fn color(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (search root or resource URL)
    pub location: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a related location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut output = String::new();
        let _ = writeln!(
            output,
            "{}: {}",
            paint(self.severity.color(), self.severity.label()),
            self.message
        );

        if let Some(location) = &self.location {
            let _ = writeln!(output, "  --> {}", location);
        }

        for line in &self.context {
            let _ = writeln!(output, "  → {}", line);
        }

        if !self.suggestions.is_empty() {
            let _ = writeln!(output, "\n{}: consider:", paint("1;32", "help"));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(output, "  {}. {}", i + 1, suggestion);
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
