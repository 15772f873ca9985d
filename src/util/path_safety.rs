//! Path safety checks for locations and requested paths.
//!
//! Both the search locations and the requested path can carry values that
//! came straight from an HTTP request (the label, the profile, the path
//! itself). These predicates reject anything that could walk out of a
//! search root, whether written literally (`../`) or percent-encoded
//! (`..%2F`, `%2E%2E%2F`, `.%2e/`, double-encoded `%252E`).
//!
//! The string checks are only the first layer. [`is_within`] verifies the
//! final resolved URL against its base, which catches escapes the string
//! checks cannot see (symlinks, backend-side normalization).

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

use crate::core::location::OPTIONAL_PREFIX;

/// Maximum number of percent-decoding passes applied to a value.
///
/// Three passes cover single, double and triple encoding; anything still
/// containing `%` after that is treated as unsafe.
const MAX_DECODE_PASSES: usize = 3;

/// Returns true if a search location must not be used.
///
/// The `optional:` marker is removed before checking.
pub fn is_unsafe_location(location: &str) -> bool {
    let location = location.strip_prefix(OPTIONAL_PREFIX).unwrap_or(location);

    decoded_forms(location)
        .iter()
        .any(|form| has_traversal(form) || form.contains('\0'))
}

/// Returns true if a requested path (or a path candidate) must not be used.
pub fn is_unsafe_path(path: &str) -> bool {
    decoded_forms(path).iter().any(|form| {
        let form = normalize_separators(form);
        has_traversal(&form)
            || form.contains('\0')
            || is_url_like(&form)
            || is_network_path(&form)
    })
}

/// Check that `candidate` stays under `base`.
///
/// For `file:` URLs both sides are canonicalized, so symlinks are resolved
/// before comparing. A side that cannot be canonicalized (e.g. missing) is
/// reported as not within. For other schemes the decoded, dot-normalized
/// path segments of `base` must prefix those of `candidate` on the same
/// origin.
pub fn is_within(base: &Url, candidate: &Url) -> bool {
    if base.scheme() == "file" && candidate.scheme() == "file" {
        let (Ok(base), Ok(candidate)) = (base.to_file_path(), candidate.to_file_path()) else {
            return false;
        };
        return is_path_within(&base, &candidate);
    }

    if base.scheme() != candidate.scheme()
        || base.host_str() != candidate.host_str()
        || base.port_or_known_default() != candidate.port_or_known_default()
    {
        return false;
    }

    let (Some(base_segments), Some(candidate_segments)) = (
        normalized_segments(base.path()),
        normalized_segments(candidate.path()),
    ) else {
        return false;
    };

    candidate_segments.starts_with(&base_segments)
}

/// Canonicalize both paths and check that `candidate` is `base` or below it.
pub fn is_path_within(base: &Path, candidate: &Path) -> bool {
    match (base.canonicalize(), candidate.canonicalize()) {
        (Ok(base), Ok(candidate)) => candidate.starts_with(base),
        _ => false,
    }
}

/// Lexically normalize a relative path, refusing anything that climbs
/// above its starting point or is absolute.
pub fn normalize_relative(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(normalized)
}

/// The raw value followed by each successive percent-decoding of it.
fn decoded_forms(value: &str) -> Vec<Cow<'_, str>> {
    let mut forms = vec![Cow::Borrowed(value)];

    for _ in 0..MAX_DECODE_PASSES {
        let Some(last) = forms.last() else { break };
        if !last.contains('%') {
            return forms;
        }
        let decoded = percent_decode_str(last).decode_utf8_lossy().into_owned();
        if decoded == **last {
            return forms;
        }
        forms.push(Cow::Owned(decoded));
    }

    // Still encoded after the last pass: force a rejection.
    if forms.last().is_some_and(|form| form.contains('%')) {
        forms.push(Cow::Borrowed(".."));
    }

    forms
}

fn has_traversal(value: &str) -> bool {
    value.contains("..")
}

fn normalize_separators(value: &str) -> String {
    value.replace('\\', "/")
}

/// `scheme:/...` URLs and Windows drive paths (after separator normalization).
fn is_url_like(value: &str) -> bool {
    value.contains(":/")
}

/// `//host/...` (scheme-relative URL or UNC path, after separator
/// normalization). Joined onto a base URL this replaces the host.
fn is_network_path(value: &str) -> bool {
    value.starts_with("//")
}

fn normalized_segments(path: &str) -> Option<Vec<String>> {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut segments: Vec<String> = Vec::new();

    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other.to_string()),
        }
    }

    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_literal_traversal_is_unsafe() {
        assert!(is_unsafe_path("../foo.properties"));
        assert!(is_unsafe_path("config/../../etc/passwd"));
        assert!(is_unsafe_path(".."));
        assert!(is_unsafe_path("..\\windows\\win.ini"));
    }

    #[test]
    fn test_encoded_traversal_is_unsafe() {
        for path in [
            "..%2F",
            "..%2f..%2fdata-jdbc.sql",
            "%2E%2E%2F",
            "%2e%2e%2f",
            "%2E%2E/",
            ".%2E/",
            ".%2e%2Fsecret",
            "%2E.%2f",
            "..%5Csecret",
        ] {
            assert!(is_unsafe_path(path), "{path} should be unsafe");
        }
    }

    #[test]
    fn test_double_encoded_traversal_is_unsafe() {
        assert!(is_unsafe_path("%252E%252E%252F"));
        assert!(is_unsafe_path("%25252e%25252e%25252f"));
    }

    #[test]
    fn test_plain_paths_are_safe() {
        assert!(!is_unsafe_path("foo.properties"));
        assert!(!is_unsafe_path("nested/dir/app-local.yml"));
        assert!(!is_unsafe_path("main%2Fdata.json"));
        assert!(!is_unsafe_path("./foo.txt"));
    }

    #[test]
    fn test_url_like_paths_are_unsafe() {
        assert!(is_unsafe_path("file:/etc/passwd"));
        assert!(is_unsafe_path("http://evil.example/x"));
        assert!(is_unsafe_path("C:\\Windows\\system.ini"));
        assert!(is_unsafe_path("nul\0byte"));
    }

    #[test]
    fn test_network_paths_are_unsafe() {
        assert!(is_unsafe_path("\\\\evil.example\\secret.yml"));
        assert!(is_unsafe_path("//evil.example/secret.yml"));
        assert!(is_unsafe_path("/\\evil.example/secret.yml"));
        assert!(is_unsafe_path("%5C%5Cevil.example%5Csecret.yml"));
        assert!(is_unsafe_path("%2F%2Fevil.example/secret.yml"));
        assert!(!is_unsafe_path("/data.json"));
    }

    #[test]
    fn test_unsafe_location() {
        assert!(is_unsafe_location("file:./config/../"));
        assert!(is_unsafe_location("file:./config/..%2F"));
        assert!(is_unsafe_location("optional:file:./config/%2E%2E%2F"));
        assert!(is_unsafe_location("file:./config/%2e%2E/"));
        assert!(!is_unsafe_location("file:./config/local"));
        assert!(!is_unsafe_location("optional:file:./config/local"));
        assert!(!is_unsafe_location("https://us-east-1/test/main%2F"));
    }

    #[test]
    fn test_is_within_http() {
        let base = Url::parse("https://us-east-1/test/").unwrap();
        let inside = Url::parse("https://us-east-1/test/main%2Fdata.json").unwrap();
        let outside = Url::parse("https://us-east-1/other/data.json").unwrap();
        let sneaky = Url::parse("https://us-east-1/test/%2E%2E/other").unwrap();
        let other_host = Url::parse("https://evil/test/data.json").unwrap();

        assert!(is_within(&base, &inside));
        assert!(!is_within(&base, &outside));
        assert!(!is_within(&base, &sneaky));
        assert!(!is_within(&base, &other_host));
    }

    #[test]
    fn test_is_within_file() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("root");
        std::fs::create_dir_all(base.join("sub")).unwrap();
        std::fs::write(base.join("sub/a.txt"), "a").unwrap();
        std::fs::write(tmp.path().join("secret.txt"), "s").unwrap();

        let base_url = Url::from_directory_path(base.canonicalize().unwrap()).unwrap();
        let inside = Url::from_file_path(base.join("sub/a.txt")).unwrap();
        let outside = Url::from_file_path(tmp.path().join("secret.txt")).unwrap();
        let missing = Url::from_file_path(base.join("nope.txt")).unwrap();

        assert!(is_within(&base_url, &inside));
        assert!(!is_within(&base_url, &outside));
        assert!(!is_within(&base_url, &missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_within_rejects_symlink_escape() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("root");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(tmp.path().join("secret.txt"), "s").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("secret.txt"), base.join("link.txt")).unwrap();

        assert!(!is_path_within(&base, &base.join("link.txt")));
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(
            normalize_relative(Path::new("./a/./b/../c.txt")),
            Some(PathBuf::from("a/c.txt"))
        );
        assert_eq!(normalize_relative(Path::new("../x")), None);
        assert_eq!(normalize_relative(Path::new("/etc/passwd")), None);
    }
}
