//! Top-level subcommand orchestration.
pub mod completions;
pub mod edit;
pub mod install;
pub mod list;
pub mod prompt;
pub mod save;
pub mod setup;
pub mod sync;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::logging::{Log, Logger};
use crate::sync::{AutoConfirm, Confirm, Context};
use prompt::StdinPrompt;

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved path configuration.
    pub config: Config,
    /// Location of the user config file (may not exist yet).
    pub config_file: PathBuf,
}

impl CommandSetup {
    /// Resolve the home directory and load the user configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let base_home = config::resolve_home(global.home.as_deref())?;
        let config_file = global
            .config
            .clone()
            .unwrap_or_else(|| Config::file_path(&base_home));
        let config = Config::load(&base_home, Some(&config_file));

        log.debug(&format!("config file: {}", config_file.display()));
        log.debug(&format!("home: {}", config.home(None).display()));
        log.debug(&format!("tracked: {}", config.tracked_root(None).display()));

        Ok(Self {
            config,
            config_file,
        })
    }

    /// Build a sync context sharing `log`.
    #[must_use]
    pub fn context(&self, log: &Arc<Logger>, dry_run: bool) -> Context {
        Context::new(self.config.clone(), Arc::clone(log) as Arc<dyn Log>, dry_run)
    }
}

/// Confirmation gate for a command: automatic with `--force`, otherwise a
/// stdin prompt per entry.
#[must_use]
pub fn confirmation(force: bool) -> Box<dyn Confirm> {
    if force {
        Box::new(AutoConfirm)
    } else {
        Box::new(StdinPrompt)
    }
}

/// Warn when the tracked directory has not been created yet.
pub fn warn_if_not_setup(config: &Config, log: &dyn Log) {
    if !config.is_installed() {
        log.warn("dotify has not been set up yet! Run 'dotify setup' first.");
    }
}

/// Print the summary and bail if any entry failed.
///
/// # Errors
///
/// Returns an error if one or more entries recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} entr{} failed", if count == 1 { "y" } else { "ies" });
    }
    Ok(())
}
