//! A single managed name and its home/tracked path pair.
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use super::helpers::fs::path_present;
use crate::config::Config;
use crate::error::SyncError;

/// Link state of an [`Entry`], recomputed from the filesystem on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// The home path is a symlink resolving to the existing tracked path.
    Linked,
    /// The tracked path exists but the home path is absent or not linked
    /// to it.
    Unlinked,
    /// The tracked path does not exist.
    Untracked,
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Linked => "linked",
            Self::Unlinked => "unlinked",
            Self::Untracked => "untracked",
        })
    }
}

/// A managed name together with its two locations.
///
/// Equality and hashing consider the name only.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    home_path: PathBuf,
    tracked_path: PathBuf,
}

impl Entry {
    /// Build an entry from user input: a bare name, `~/name`, or any path.
    /// Only the final path component is kept.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidName`] if the input has no usable final
    /// component (empty, `.`, `..`) or names the tracked directory itself.
    pub fn named(input: &str, config: &Config) -> Result<Self, SyncError> {
        let trimmed = input.strip_prefix("~/").unwrap_or(input);
        let name = Path::new(trimmed)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty() && *n != "." && *n != ".." && *n != config.dirname())
            .ok_or_else(|| SyncError::InvalidName(input.to_string()))?;
        Ok(Self::from_name(name, config))
    }

    /// Build an entry for a name already known to be a single component.
    pub(crate) fn from_name(name: &str, config: &Config) -> Self {
        Self {
            name: name.to_string(),
            home_path: config.home(Some(name)),
            tracked_path: config.tracked_root(Some(name)),
        }
    }

    /// Base name shared by both locations.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location in the home directory.
    #[must_use]
    pub fn home_path(&self) -> &Path {
        &self.home_path
    }

    /// Location inside the tracked directory.
    #[must_use]
    pub fn tracked_path(&self) -> &Path {
        &self.tracked_path
    }

    /// `true` if the tracked path exists.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        self.tracked_path.exists()
    }

    /// `true` if something is present at the home path, including a
    /// dangling symlink.
    #[must_use]
    pub fn home_exists(&self) -> bool {
        path_present(&self.home_path)
    }

    /// `true` if the home path is a symlink resolving to the existing
    /// tracked path.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        let Ok(target) = std::fs::read_link(&self.home_path) else {
            return false;
        };
        if !self.is_tracked() {
            return false;
        }
        let target = if target.is_relative() {
            self.home_path
                .parent()
                .map_or_else(|| target.clone(), |dir| dir.join(&target))
        } else {
            target
        };
        if paths_equal(&target, &self.tracked_path) {
            return true;
        }
        match (
            dunce::canonicalize(&target),
            dunce::canonicalize(&self.tracked_path),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Current link state.
    #[must_use]
    pub fn status(&self) -> LinkStatus {
        if !self.is_tracked() {
            LinkStatus::Untracked
        } else if self.is_linked() {
            LinkStatus::Linked
        } else {
            LinkStatus::Unlinked
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sandbox() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        std::fs::create_dir(config.tracked_root(None)).unwrap();
        (dir, config)
    }

    #[test]
    fn named_keeps_final_component() {
        let config = Config::new("/home/u");
        for input in [".vimrc", "~/.vimrc", "/home/u/.vimrc", "some/dir/.vimrc"] {
            let entry = Entry::named(input, &config).unwrap();
            assert_eq!(entry.name(), ".vimrc", "input {input}");
            assert_eq!(entry.home_path(), Path::new("/home/u/.vimrc"));
            assert_eq!(entry.tracked_path(), Path::new("/home/u/.dotify/.vimrc"));
        }
    }

    #[test]
    fn named_rejects_special_names() {
        let config = Config::new("/home/u");
        for input in ["", ".", "..", "~/..", "a/.."] {
            assert!(
                matches!(Entry::named(input, &config), Err(SyncError::InvalidName(_))),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn named_rejects_tracked_directory() {
        let config = Config::new("/home/u");
        for input in [".dotify", "~/.dotify", "/home/u/.dotify"] {
            assert!(
                matches!(Entry::named(input, &config), Err(SyncError::InvalidName(_))),
                "input {input:?} should be rejected"
            );
        }
        let custom = Config::new("/home/u").with_dirname("dotfiles");
        assert!(Entry::named("dotfiles", &custom).is_err());
        assert!(Entry::named(".dotify", &custom).is_ok());
    }

    #[test]
    fn equality_uses_name_only() {
        let a = Entry::named(".vimrc", &Config::new("/home/a")).unwrap();
        let b = Entry::named(".vimrc", &Config::new("/home/b")).unwrap();
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn untracked_when_tracked_missing() {
        let (_dir, config) = sandbox();
        let entry = Entry::named(".vimrc", &config).unwrap();
        assert_eq!(entry.status(), LinkStatus::Untracked);
        std::fs::write(entry.home_path(), "x").unwrap();
        assert_eq!(entry.status(), LinkStatus::Untracked);
        assert!(entry.home_exists());
    }

    #[test]
    fn unlinked_when_home_is_regular_file() {
        let (_dir, config) = sandbox();
        let entry = Entry::named(".vimrc", &config).unwrap();
        std::fs::write(entry.tracked_path(), "x").unwrap();
        assert_eq!(entry.status(), LinkStatus::Unlinked);
        std::fs::write(entry.home_path(), "x").unwrap();
        assert_eq!(entry.status(), LinkStatus::Unlinked);
    }

    #[cfg(unix)]
    #[test]
    fn linked_when_home_points_at_tracked() {
        let (_dir, config) = sandbox();
        let entry = Entry::named(".vimrc", &config).unwrap();
        std::fs::write(entry.tracked_path(), "x").unwrap();
        std::os::unix::fs::symlink(entry.tracked_path(), entry.home_path()).unwrap();
        assert_eq!(entry.status(), LinkStatus::Linked);
    }

    #[cfg(unix)]
    #[test]
    fn relative_link_is_recognised() {
        let (_dir, config) = sandbox();
        let entry = Entry::named(".vimrc", &config).unwrap();
        std::fs::write(entry.tracked_path(), "x").unwrap();
        std::os::unix::fs::symlink(".dotify/.vimrc", entry.home_path()).unwrap();
        assert!(entry.is_linked());
    }

    #[cfg(unix)]
    #[test]
    fn link_elsewhere_is_unlinked() {
        let (dir, config) = sandbox();
        let entry = Entry::named(".vimrc", &config).unwrap();
        std::fs::write(entry.tracked_path(), "x").unwrap();
        let other = dir.path().join("other");
        std::fs::write(&other, "y").unwrap();
        std::os::unix::fs::symlink(&other, entry.home_path()).unwrap();
        assert_eq!(entry.status(), LinkStatus::Unlinked);
    }

    #[cfg(unix)]
    #[test]
    fn status_is_recomputed() {
        let (_dir, config) = sandbox();
        let entry = Entry::named(".vimrc", &config).unwrap();
        std::fs::write(entry.tracked_path(), "x").unwrap();
        std::os::unix::fs::symlink(entry.tracked_path(), entry.home_path()).unwrap();
        assert_eq!(entry.status(), LinkStatus::Linked);
        std::fs::remove_file(entry.tracked_path()).unwrap();
        assert_eq!(entry.status(), LinkStatus::Untracked);
        assert!(entry.home_exists(), "dangling link still counts as present");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LinkStatus::Unlinked).unwrap(),
            "\"unlinked\""
        );
    }
}
