//! Console/file logger with per-entry summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{EntryRecord, EntryStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Messages are emitted as [`tracing`] events; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) renders them to
/// the console and appends them to `$XDG_CACHE_HOME/dotify/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    records: Mutex<Vec<EntryRecord>>,
    log_file: PathBuf,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Path of the persistent log file.
    #[must_use]
    pub const fn log_path(&self) -> &PathBuf {
        &self.log_file
    }

    /// Return a clone of all recorded entries.
    #[must_use]
    pub fn records(&self) -> Vec<EntryRecord> {
        self.records.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only when verbose; always in the file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record an entry result for the summary.
    pub fn record(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(EntryRecord {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed entries.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.records.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|r| r.status == EntryStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded entries.
    pub fn print_summary(&self) {
        let records = self.records();
        if records.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut changed = 0u32;
        let mut unchanged = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for record in &records {
            let (icon, color) = match record.status {
                EntryStatus::Changed => {
                    changed += 1;
                    ("✓", "\x1b[32m")
                }
                EntryStatus::Unchanged => {
                    unchanged += 1;
                    ("·", "\x1b[2m")
                }
                EntryStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                EntryStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                EntryStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = record
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", record.name));
        }

        let total = changed + unchanged + skipped + dry_run + failed;
        self.info(&format!(
            "{total} entries: \x1b[32m{changed} changed\x1b[0m, \x1b[2m{unchanged} unchanged\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));
        self.info(&format!("\x1b[2mlog: {}\x1b[0m", self.log_file.display()));
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record(&self, name: &str, status: EntryStatus, message: Option<&str>) {
        self.record(name, status, message);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    #[test]
    fn logger_new_has_no_records() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.records().is_empty());
    }

    #[test]
    fn record_changed() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record(".vimrc", EntryStatus::Changed, Some("linked"));
        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, ".vimrc");
        assert_eq!(records[0].status, EntryStatus::Changed);
        assert_eq!(records[0].message.as_deref(), Some("linked"));
    }

    #[test]
    fn failure_count_returns_correct_count() {
        let (log, _tmp, _guard) = isolated_logger();
        assert_eq!(log.failure_count(), 0);
        log.record("a", EntryStatus::Changed, None);
        log.record("b", EntryStatus::Failed, Some("nothing to link"));
        log.record("c", EntryStatus::Failed, Some("not managed"));
        log.record("d", EntryStatus::Skipped, None);
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let (log, _tmp, _guard) = isolated_logger();
        let log_ref: &dyn Log = &log;
        log_ref.record("via-trait", EntryStatus::Unchanged, None);
        assert_eq!(log.records().len(), 1);
    }

    #[test]
    fn debug_always_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        let marker = format!("debug-marker-{}", std::process::id());
        log.debug(&marker);
        let contents = fs::read_to_string(log.log_path()).unwrap();
        assert!(contents.contains("[debug]"));
        assert!(contents.contains(&marker));
    }

    #[test]
    fn warn_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        let marker = format!("warn-marker-{}", std::process::id());
        log.warn(&marker);
        let contents = fs::read_to_string(log.log_path()).unwrap();
        assert!(contents.contains("[warn]"));
        assert!(contents.contains(&marker));
    }

    #[test]
    fn stage_written_to_file_with_arrow() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("Linking dotfiles");
        let contents = fs::read_to_string(log.log_path()).unwrap();
        assert!(contents.contains("==> Linking dotfiles"));
    }

    #[test]
    fn dry_run_written_to_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.dry_run("would link .vimrc");
        let contents = fs::read_to_string(log.log_path()).unwrap();
        assert!(contents.contains("[dry run] would link .vimrc"));
    }

    #[test]
    fn summary_lists_records_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record(".vimrc", EntryStatus::Changed, Some("linked"));
        log.record(".zshrc", EntryStatus::Failed, Some("nothing to link"));
        log.print_summary();
        let contents = fs::read_to_string(log.log_path()).unwrap();
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("✓ .vimrc (linked)"));
        assert!(contents.contains("✗ .zshrc (nothing to link)"));
        assert!(contents.contains("2 entries: 1 changed, 0 unchanged, 0 skipped, 0 dry-run, 1 failed"));
    }
}
