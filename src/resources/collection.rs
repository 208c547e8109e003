//! Directory scans producing ordered sets of [`Entry`] values.
use std::collections::HashSet;
use std::path::Path;

use super::entry::{Entry, LinkStatus};
use super::helpers::fs::STAGING_SUFFIX;
use crate::config::{Config, IgnoreCategory};
use crate::error::SyncError;

/// Entries discovered in one directory, in directory-listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    entries: Vec<Entry>,
}

impl Collection {
    /// Scan the immediate children of the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if the directory exists but cannot be read.
    pub fn scan_home(config: &Config) -> Result<Self, SyncError> {
        Self::scan(&config.home(None), IgnoreCategory::Home, config)
    }

    /// Scan the immediate children of the tracked directory.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if the directory exists but cannot be read.
    pub fn scan_tracked(config: &Config) -> Result<Self, SyncError> {
        Self::scan(&config.tracked_root(None), IgnoreCategory::Tracked, config)
    }

    fn scan(dir: &Path, category: IgnoreCategory, config: &Config) -> Result<Self, SyncError> {
        let read = match std::fs::read_dir(dir) {
            Ok(read) => read,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SyncError::io(dir, e)),
        };
        let ignores = config.ignore_list(category);

        let mut names = Vec::new();
        for dirent in read {
            let dirent = dirent.map_err(|e| SyncError::io(dir, e))?;
            let file_name = dirent.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::debug!("skipping non-UTF-8 name in {}", dir.display());
                continue;
            };
            if name == "." || name == ".." || name.ends_with(STAGING_SUFFIX) {
                continue;
            }
            if config.hidden_only() && !name.starts_with('.') {
                continue;
            }
            if ignores.iter().any(|i| i == name) {
                continue;
            }
            names.push(name.to_string());
        }
        Ok(Self::from_names(names.iter().map(String::as_str), config))
    }

    /// Build a collection from names, dropping duplicates and keeping the
    /// first occurrence.
    pub(crate) fn from_names<'a>(names: impl IntoIterator<Item = &'a str>, config: &Config) -> Self {
        let mut seen = HashSet::new();
        let entries = names
            .into_iter()
            .filter(|n| seen.insert(*n))
            .map(|n| Entry::from_name(n, config))
            .collect();
        Self { entries }
    }

    fn filtered(&self, keep: impl Fn(&Entry) -> bool) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| keep(e)).cloned().collect(),
        }
    }

    /// Entries whose home path links to their tracked path.
    #[must_use]
    pub fn linked(&self) -> Self {
        self.filtered(|e| e.status() == LinkStatus::Linked)
    }

    /// Entries that are not linked (the complement of [`linked`](Self::linked)).
    #[must_use]
    pub fn unlinked(&self) -> Self {
        self.filtered(|e| e.status() != LinkStatus::Linked)
    }

    /// Entries with no tracked copy.
    #[must_use]
    pub fn untracked(&self) -> Self {
        self.filtered(|e| !e.is_tracked())
    }

    /// Entry names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(Entry::name).collect()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the collection has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Look up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name() == name)
    }
}

impl IntoIterator for Collection {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
