//! Plan/apply builder for track, untrack, link, and unlink.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::entry::Entry;
use super::helpers::fs::{
    create_symlink, ensure_parent_dir, is_real_dir, path_present, remove_path, replace_with_copy,
    staging_path,
};
use super::{Action, Change, Operation};
use crate::error::{Side, SyncError};

/// Performs one [`Operation`] on one [`Entry`].
///
/// [`plan`](Self::plan) only reads the filesystem. [`apply`](Self::apply)
/// re-plans and then mutates, so a stale plan never drives a change.
#[derive(Debug, Clone, Copy)]
pub struct LinkBuilder<'a> {
    entry: &'a Entry,
}

impl<'a> LinkBuilder<'a> {
    /// Create a builder for `entry`.
    #[must_use]
    pub const fn new(entry: &'a Entry) -> Self {
        Self { entry }
    }

    /// Decide what `op` would do without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns the single failure kind that prevents `op`.
    pub fn plan(&self, op: Operation) -> Result<Change, SyncError> {
        let entry = self.entry;
        let name = || entry.name().to_string();
        match op {
            Operation::Track => {
                if !entry.home_path().exists() {
                    return Err(SyncError::NotFound {
                        name: name(),
                        side: Side::Home,
                        reason: "nothing to track",
                    });
                }
                if entry.is_linked() {
                    return Ok(Change::AlreadyCorrect);
                }
                Ok(Change::Applied(Action::Tracked))
            }
            Operation::Untrack => {
                if !entry.home_exists() {
                    return Err(SyncError::NotFound {
                        name: name(),
                        side: Side::Home,
                        reason: "does not exist",
                    });
                }
                if !entry.is_tracked() {
                    return Err(SyncError::NotManaged { name: name() });
                }
                Ok(Change::Applied(Action::Removed))
            }
            Operation::Link => {
                if !entry.is_tracked() {
                    return Err(SyncError::NotFound {
                        name: name(),
                        side: Side::Tracked,
                        reason: "nothing to link",
                    });
                }
                if entry.is_linked() {
                    return Ok(Change::AlreadyCorrect);
                }
                if entry.home_exists() {
                    Ok(Change::Applied(Action::Replaced))
                } else {
                    Ok(Change::Applied(Action::Linked))
                }
            }
            Operation::Unlink => {
                let missing = if entry.home_exists() {
                    (!entry.is_tracked()).then_some(Side::Tracked)
                } else {
                    Some(Side::Home)
                };
                if let Some(side) = missing {
                    return Err(SyncError::NotFound {
                        name: name(),
                        side,
                        reason: "does not exist",
                    });
                }
                if !entry.is_linked() {
                    return Err(SyncError::NotManaged { name: name() });
                }
                Ok(Change::Applied(Action::Unlinked))
            }
        }
    }

    /// Plan `op` and, unless the entry is already in the desired state,
    /// perform it.
    ///
    /// # Errors
    ///
    /// Returns the planning failure, or [`SyncError::Io`] if the mutation
    /// fails. Track and Untrack leave the source in place on failure.
    pub fn apply(&self, op: Operation) -> Result<Change, SyncError> {
        let change = self.plan(op)?;
        let Change::Applied(action) = change else {
            return Ok(change);
        };
        let entry = self.entry;
        match op {
            Operation::Track => {
                let tracked = entry.tracked_path();
                ensure_parent_dir(tracked)
                    .and_then(|()| replace_with_copy(entry.home_path(), tracked))
                    .map_err(|e| SyncError::io(tracked, e))?;
            }
            Operation::Untrack => {
                let home = entry.home_path();
                replace_with_copy(entry.tracked_path(), home)
                    .map_err(|e| SyncError::io(home, e))?;
                remove_path(entry.tracked_path())
                    .map_err(|e| SyncError::io(entry.tracked_path(), e))?;
            }
            Operation::Link => {
                let home = entry.home_path();
                place_link(entry.tracked_path(), home).map_err(|e| SyncError::io(home, e))?;
            }
            Operation::Unlink => {
                let home = entry.home_path();
                remove_path(home).map_err(|e| SyncError::io(home, e))?;
            }
        }
        Ok(Change::Applied(action))
    }

    /// Copy the home entry into the tracked directory.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn track(&self) -> Result<Change, SyncError> {
        self.apply(Operation::Track)
    }

    /// Move the tracked copy back into home and drop it from tracking.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn untrack(&self) -> Result<Change, SyncError> {
        self.apply(Operation::Untrack)
    }

    /// Point the home path at the tracked copy.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn link(&self) -> Result<Change, SyncError> {
        self.apply(Operation::Link)
    }

    /// Remove the home-side link.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn unlink(&self) -> Result<Change, SyncError> {
        self.apply(Operation::Unlink)
    }
}

/// Create a link to `target` beside `link`, then move it over `link`.
///
/// A real directory at `link` cannot be renamed over, so it is removed
/// first; on Windows every existing entry is.
fn place_link(target: &Path, link: &Path) -> Result<()> {
    let tmp = staging_path(link);
    remove_path(&tmp)?;
    create_symlink(target, &tmp)?;

    if path_present(link)
        && (cfg!(windows) || is_real_dir(link))
        && let Err(e) = remove_path(link)
    {
        let _ = remove_path(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, link) {
        let _ = remove_path(&tmp);
        return Err(e).with_context(|| format!("rename {} to {}", tmp.display(), link.display()));
    }
    Ok(())
}
