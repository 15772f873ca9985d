//! Test fixtures for common test scenarios.
//!
//! Builders for on-disk configuration trees, laid out the way a config
//! repository usually is: one directory per application or profile, with
//! plain and profile-suffixed files side by side.

use std::collections::BTreeMap;
use std::path::Path;

use super::under;

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = under(root, rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
}

/// Fixture for a configuration repository on disk.
#[derive(Debug, Clone, Default)]
pub struct ConfigTreeFixture {
    /// Files (path relative to the tree root -> content)
    files: BTreeMap<String, String>,
}

impl ConfigTreeFixture {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree with one application, a plain file and a profile variant.
    pub fn application(name: &str, profile: &str) -> Self {
        Self::new()
            .with_file(&format!("{name}/{name}.yml"), &format!("name: {name}\n"))
            .with_file(
                &format!("{name}/{name}-{profile}.yml"),
                &format!("name: {name}\nprofile: {profile}\n"),
            )
    }

    /// Add a file.
    pub fn with_file(mut self, rel: &str, contents: &str) -> Self {
        self.files.insert(rel.to_string(), contents.to_string());
        self
    }

    /// Write every file under `root`.
    pub fn write_to(&self, root: &Path) {
        for (rel, contents) in &self.files {
            write_file(root, rel, contents);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a/b/c.txt", "deep");

        let contents = std::fs::read_to_string(tmp.path().join("a/b/c.txt")).unwrap();
        assert_eq!(contents, "deep");
    }

    #[test]
    fn test_application_tree() {
        let tmp = TempDir::new().unwrap();
        ConfigTreeFixture::application("orders", "cloud").write_to(tmp.path());

        assert!(tmp.path().join("orders/orders.yml").is_file());
        assert!(tmp.path().join("orders/orders-cloud.yml").is_file());
    }
}
