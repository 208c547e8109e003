use anyhow::Result;
use std::sync::Arc;

use super::{CommandSetup, confirmation, finish, setup};
use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::Logger;
use crate::sync::SyncEngine;

/// Run the install command: set up when needed, then add every untracked
/// home dotfile.
///
/// # Errors
///
/// Returns an error if setup fails, discovery fails, or any entry fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let cmd = CommandSetup::init(global, log)?;
    if !cmd.config.is_installed() {
        setup::prepare(&cmd, false, global.dry_run, log.as_ref())?;
    }
    track_untracked(&cmd, opts.force, global.dry_run, log)
}

/// Track every untracked home entry and finish with the summary.
///
/// # Errors
///
/// Returns an error if discovery fails or any entry fails.
pub fn track_untracked(
    cmd: &CommandSetup,
    force: bool,
    dry_run: bool,
    log: &Arc<Logger>,
) -> Result<()> {
    let ctx = cmd.context(log, dry_run);
    let confirm = confirmation(force);
    let engine = SyncEngine::new(&ctx, confirm.as_ref());

    log.stage("Adding dotfiles");
    if engine.track_all()?.is_empty() {
        log.info("nothing to add");
    }
    finish(log)
}
