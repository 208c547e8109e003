//! Batch and single-entry synchronization over the link builder.
//!
//! - [`context`] - configuration, logger, and dry-run flag for one run
//! - [`confirm`] - the per-entry confirmation gate
//!
//! Every entry goes through the same sequence: plan, confirm, apply. Batch
//! runs never stop at a failing entry; each entry yields one [`Report`].
pub mod confirm;
pub mod context;

pub use confirm::{AutoConfirm, Confirm};
pub use context::Context;

use crate::error::SyncError;
use crate::logging::EntryStatus;
use crate::resources::{Action, Change, Collection, Entry, LinkBuilder, Operation};

/// What happened to one entry.
#[derive(Debug)]
pub enum Outcome {
    /// The action was applied.
    Changed(Action),
    /// The entry was already in the requested state.
    Unchanged,
    /// The confirmation gate rejected the change.
    Declined,
    /// Dry run: the action was planned but not applied.
    DryRun(Action),
    /// Planning or applying failed.
    Failed(SyncError),
}

impl Outcome {
    /// `true` for [`Outcome::Failed`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-entry result of a sync run.
#[derive(Debug)]
pub struct Report {
    /// Entry name (or the rejected input for invalid names).
    pub name: String,
    /// Operation that was attempted.
    pub operation: Operation,
    /// Result for this entry.
    pub outcome: Outcome,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: ", self.operation, self.name)?;
        match &self.outcome {
            Outcome::Changed(action) => write!(f, "{action}"),
            Outcome::Unchanged => write!(f, "unchanged"),
            Outcome::Declined => write!(f, "declined"),
            Outcome::DryRun(action) => write!(f, "would be {action}"),
            Outcome::Failed(e) => write!(f, "failed ({})", e.reason()),
        }
    }
}

/// Drives [`LinkBuilder`] over single names or discovered collections.
pub struct SyncEngine<'a> {
    ctx: &'a Context,
    confirm: &'a dyn Confirm,
}

impl std::fmt::Debug for SyncEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("ctx", &self.ctx)
            .field("confirm", &"<dyn Confirm>")
            .finish()
    }
}

impl<'a> SyncEngine<'a> {
    /// Create an engine over `ctx` that consults `confirm` before each change.
    #[must_use]
    pub const fn new(ctx: &'a Context, confirm: &'a dyn Confirm) -> Self {
        Self { ctx, confirm }
    }

    /// Entries a batch `op` would consider.
    ///
    /// | op | scanned directory | selection |
    /// |---|---|---|
    /// | Track | home | untracked |
    /// | Untrack | tracked | linked |
    /// | Link | tracked | unlinked |
    /// | Unlink | tracked | linked |
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if a directory exists but cannot be read.
    pub fn candidates(&self, op: Operation) -> Result<Collection, SyncError> {
        let config = &self.ctx.config;
        Ok(match op {
            Operation::Track => Collection::scan_home(config)?.untracked(),
            Operation::Untrack | Operation::Unlink => Collection::scan_tracked(config)?.linked(),
            Operation::Link => Collection::scan_tracked(config)?.unlinked(),
        })
    }

    /// Run `op` over every discovered candidate, continuing past failures.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] only if discovery itself fails.
    pub fn run_all(&self, op: Operation) -> Result<Vec<Report>, SyncError> {
        let candidates = self.candidates(op)?;
        self.ctx
            .log
            .debug(&format!("{} candidate(s) to {op}", candidates.len()));
        Ok(candidates
            .iter()
            .map(|entry| self.process(entry, op))
            .collect())
    }

    /// Run `op` on a single name, bypassing discovery.
    pub fn run(&self, op: Operation, name: &str) -> Report {
        match Entry::named(name, &self.ctx.config) {
            Ok(entry) => self.process(&entry, op),
            Err(e) => self.fail(name, op, e),
        }
    }

    /// Copy every untracked home entry into the tracked directory.
    ///
    /// # Errors
    ///
    /// See [`run_all`](Self::run_all).
    pub fn track_all(&self) -> Result<Vec<Report>, SyncError> {
        self.run_all(Operation::Track)
    }

    /// Return every linked entry to home and stop tracking it.
    ///
    /// # Errors
    ///
    /// See [`run_all`](Self::run_all).
    pub fn untrack_all(&self) -> Result<Vec<Report>, SyncError> {
        self.run_all(Operation::Untrack)
    }

    /// Link every tracked entry that is not linked yet.
    ///
    /// # Errors
    ///
    /// See [`run_all`](Self::run_all).
    pub fn link_all(&self) -> Result<Vec<Report>, SyncError> {
        self.run_all(Operation::Link)
    }

    /// Remove the home-side link of every linked entry.
    ///
    /// # Errors
    ///
    /// See [`run_all`](Self::run_all).
    pub fn unlink_all(&self) -> Result<Vec<Report>, SyncError> {
        self.run_all(Operation::Unlink)
    }

    /// Track a single name.
    pub fn track(&self, name: &str) -> Report {
        self.run(Operation::Track, name)
    }

    /// Untrack a single name.
    pub fn untrack(&self, name: &str) -> Report {
        self.run(Operation::Untrack, name)
    }

    /// Link a single name.
    pub fn link(&self, name: &str) -> Report {
        self.run(Operation::Link, name)
    }

    /// Unlink a single name.
    pub fn unlink(&self, name: &str) -> Report {
        self.run(Operation::Unlink, name)
    }

    fn process(&self, entry: &Entry, op: Operation) -> Report {
        let log = &self.ctx.log;
        let name = entry.name();
        let builder = LinkBuilder::new(entry);

        let action = match builder.plan(op) {
            Err(e) => return self.fail(name, op, e),
            Ok(Change::AlreadyCorrect) => return self.unchanged(name, op),
            Ok(Change::Applied(action)) => action,
        };

        if self.ctx.dry_run {
            log.dry_run(&format!("would {op} {name} ({action})"));
            log.record(name, EntryStatus::DryRun, Some(&format!("would be {action}")));
            return report(name, op, Outcome::DryRun(action));
        }

        if !self.confirm.confirm(name, op, action) {
            log.debug(&format!("declined: {op} {name}"));
            log.record(name, EntryStatus::Skipped, Some("declined"));
            return report(name, op, Outcome::Declined);
        }

        match builder.apply(op) {
            Ok(Change::Applied(action)) => {
                log.info(&format!("{action}: {}", entry.home_path().display()));
                log.record(name, EntryStatus::Changed, Some(&action.to_string()));
                report(name, op, Outcome::Changed(action))
            }
            Ok(Change::AlreadyCorrect) => self.unchanged(name, op),
            Err(e) => self.fail(name, op, e),
        }
    }

    fn unchanged(&self, name: &str, op: Operation) -> Report {
        self.ctx.log.debug(&format!("ok: {name} (nothing to {op})"));
        self.ctx.log.record(name, EntryStatus::Unchanged, None);
        report(name, op, Outcome::Unchanged)
    }

    fn fail(&self, name: &str, op: Operation, e: SyncError) -> Report {
        match e {
            SyncError::Io { .. } => self.ctx.log.error(&format!("failed to {op} {name}: {e}")),
            _ => self.ctx.log.warn(&format!("cannot {op} {name}: {e}")),
        }
        self.ctx
            .log
            .record(name, EntryStatus::Failed, Some(e.reason()));
        report(name, op, Outcome::Failed(e))
    }
}

fn report(name: &str, operation: Operation, outcome: Outcome) -> Report {
    Report {
        name: name.to_string(),
        operation,
        outcome,
    }
}
