use anyhow::{Context as _, Result};
use std::sync::Arc;

use super::{CommandSetup, install};
use crate::cli::{GlobalOpts, SetupOpts};
use crate::config::TEMPLATE;
use crate::logging::{Log, Logger};
use crate::resources::helpers::fs::ensure_parent_dir;

/// Run the setup command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved, the dotify
/// directory or config file cannot be created, or the follow-up install
/// fails.
pub fn run(global: &GlobalOpts, opts: &SetupOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    prepare(&setup, opts.git, global.dry_run, log.as_ref())?;
    if opts.no_install {
        return Ok(());
    }
    install::track_untracked(&setup, opts.force, global.dry_run, log)
}

/// Create the tracked directory, the config template, and optionally a git
/// repository. Existing pieces are left alone.
///
/// # Errors
///
/// Returns an error if a directory, file, or repository cannot be created.
pub fn prepare(setup: &CommandSetup, git: bool, dry_run: bool, log: &dyn Log) -> Result<()> {
    log.stage("Setting up dotify");
    let root = setup.config.tracked_root(None);

    if setup.config.is_installed() {
        log.warn("dotify is already set up");
    } else if dry_run {
        log.dry_run(&format!("would create {}", root.display()));
    } else {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("creating {}", root.display()))?;
        log.info(&format!("created {}", root.display()));
    }

    let file = &setup.config_file;
    if !file.exists() {
        if dry_run {
            log.dry_run(&format!("would write {}", file.display()));
        } else {
            ensure_parent_dir(file)?;
            std::fs::write(file, TEMPLATE)
                .with_context(|| format!("writing {}", file.display()))?;
            log.info(&format!("wrote {}", file.display()));
        }
    }

    if git && !root.join(".git").exists() {
        if dry_run {
            log.dry_run(&format!("would initialise a git repository in {}", root.display()));
        } else {
            git2::Repository::init(&root)
                .with_context(|| format!("initialising git repository in {}", root.display()))?;
            log.info(&format!("initialised git repository in {}", root.display()));
        }
    }
    Ok(())
}
