//! Core logging types: summary records, status, and the [`Log`] trait.

/// Per-entry result for summary reporting.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// Entry name (e.g. `.vimrc`).
    pub name: String,
    /// Final status of the entry.
    pub status: EntryStatus,
    /// Optional detail (action taken, failure reason, …).
    pub message: Option<String>,
}

/// Status of an entry after a sync operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// The filesystem was changed.
    Changed,
    /// The entry was already in the requested state.
    Unchanged,
    /// The user declined the change.
    Skipped,
    /// Dry-run mode; the change was only previewed.
    DryRun,
    /// The operation failed for this entry.
    Failed,
}

/// Abstraction over logging backends.
///
/// The engine logs through this trait so tests can substitute a recorder
/// for the console/file [`Logger`](super::logger::Logger).
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record an entry result for the summary.
    fn record(&self, name: &str, status: EntryStatus, message: Option<&str>);
}
