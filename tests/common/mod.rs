// Shared helpers for integration tests.
//
// Provides a temporary home directory with a fluent builder, a recording
// logger, and fixed confirmation gates so each integration test can set up
// an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dotify_cli::config::{Config, IgnoreCategory};
use dotify_cli::logging::{EntryStatus, Log};
use dotify_cli::resources::{Action, Entry, LinkStatus, Operation};
use dotify_cli::sync::{Confirm, Context};

/// A [`Log`] that keeps every message and record in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
    records: Mutex<Vec<(String, EntryStatus)>>,
}

impl RecordingLog {
    /// Every message logged so far, prefixed with its level.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lines lock").clone()
    }

    /// Every `(name, status)` pair recorded so far.
    pub fn records(&self) -> Vec<(String, EntryStatus)> {
        self.records.lock().expect("records lock").clone()
    }

    fn push(&self, level: &str, msg: &str) {
        self.lines
            .lock()
            .expect("lines lock")
            .push(format!("{level}: {msg}"));
    }
}

impl Log for RecordingLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
    fn record(&self, name: &str, status: EntryStatus, _message: Option<&str>) {
        self.records
            .lock()
            .expect("records lock")
            .push((name.to_string(), status));
    }
}

/// Gate that rejects every change.
#[derive(Debug, Clone, Copy)]
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&self, _name: &str, _op: Operation, _action: Action) -> bool {
        false
    }
}

/// An isolated home directory backed by a [`tempfile::TempDir`].
pub struct Sandbox {
    /// Temporary directory acting as `$HOME`.
    pub home: tempfile::TempDir,
    config: Config,
    log: Arc<RecordingLog>,
}

impl Sandbox {
    /// Empty home with default configuration and the tracked directory
    /// already created.
    pub fn new() -> Self {
        SandboxBuilder::new().build()
    }

    /// The sandbox configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The recording logger shared with every context built here.
    pub fn log(&self) -> &RecordingLog {
        &self.log
    }

    /// Context for a sync run.
    pub fn context(&self, dry_run: bool) -> Context {
        Context::new(
            self.config.clone(),
            Arc::clone(&self.log) as Arc<dyn Log>,
            dry_run,
        )
    }

    /// `$HOME/<name>`.
    pub fn home_path(&self, name: &str) -> PathBuf {
        self.config.home(Some(name))
    }

    /// `$HOME/.dotify/<name>`.
    pub fn tracked_path(&self, name: &str) -> PathBuf {
        self.config.tracked_root(Some(name))
    }

    /// Current link status of `name`.
    pub fn status(&self, name: &str) -> LinkStatus {
        Entry::named(name, &self.config).expect("valid name").status()
    }

    /// Sorted listing of `dir`, recursing into real directories, as
    /// `relative path -> content` lines. Symlinks are shown as `-> target`.
    pub fn snapshot(&self) -> Vec<String> {
        let mut out = Vec::new();
        walk(self.home.path(), self.home.path(), &mut out);
        out.sort();
        out
    }
}

fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in std::fs::read_dir(dir).expect("read dir") {
        let path = entry.expect("dir entry").path();
        let rel = path.strip_prefix(base).expect("relative").display().to_string();
        let meta = path.symlink_metadata().expect("metadata");
        if meta.file_type().is_symlink() {
            let target = std::fs::read_link(&path).expect("read link");
            out.push(format!("{rel} -> {}", target.display()));
        } else if meta.is_dir() {
            out.push(format!("{rel}/"));
            walk(base, &path, out);
        } else {
            let content = std::fs::read_to_string(&path).unwrap_or_default();
            out.push(format!("{rel}: {content}"));
        }
    }
}

/// Fluent builder for [`Sandbox`].
pub struct SandboxBuilder {
    home: tempfile::TempDir,
    config: Config,
    create_tracked_root: bool,
}

impl SandboxBuilder {
    /// Begin building a sandbox over a fresh temp directory.
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp dir");
        let config = Config::new(home.path());
        Self {
            home,
            config,
            create_tracked_root: true,
        }
    }

    /// Write `$HOME/<name>`.
    pub fn with_home_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.home.path().join(name), content).expect("write home file");
        self
    }

    /// Create `$HOME/<name>/<file>` with `content`.
    pub fn with_home_dir(self, name: &str, file: &str, content: &str) -> Self {
        let dir = self.home.path().join(name);
        std::fs::create_dir_all(&dir).expect("create home dir");
        std::fs::write(dir.join(file), content).expect("write home dir file");
        self
    }

    /// Create `$HOME/<name>/<link>` as a symlink to `target`, which need not
    /// exist.
    #[cfg(unix)]
    pub fn with_home_link(self, name: &str, link: &str, target: &str) -> Self {
        let dir = self.home.path().join(name);
        std::fs::create_dir_all(&dir).expect("create home dir");
        std::os::unix::fs::symlink(target, dir.join(link)).expect("create home link");
        self
    }

    /// Write `$HOME/.dotify/<name>`.
    pub fn with_tracked_file(self, name: &str, content: &str) -> Self {
        let path = self.config.tracked_root(Some(name));
        std::fs::create_dir_all(self.config.tracked_root(None)).expect("create tracked root");
        std::fs::write(path, content).expect("write tracked file");
        self
    }

    /// Add user ignore names for `category`.
    pub fn with_ignores(mut self, category: IgnoreCategory, names: &[&str]) -> Self {
        self.config = self.config.with_ignores(category, names.iter().copied());
        self
    }

    /// Write `$HOME/.dotrc` and reload the configuration from it.
    pub fn with_dotrc(mut self, content: &str) -> Self {
        std::fs::write(Config::file_path(self.home.path()), content).expect("write .dotrc");
        self.config = Config::load(self.home.path(), None);
        self
    }

    /// Do not create the tracked directory.
    pub fn without_tracked_root(mut self) -> Self {
        self.create_tracked_root = false;
        self
    }

    /// Finish building.
    pub fn build(self) -> Sandbox {
        if self.create_tracked_root {
            std::fs::create_dir_all(self.config.tracked_root(None)).expect("create tracked root");
        }
        Sandbox {
            home: self.home,
            config: self.config,
            log: Arc::new(RecordingLog::default()),
        }
    }
}
