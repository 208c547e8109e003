use anyhow::Result;
use std::sync::Arc;

use super::{CommandSetup, confirmation, finish, warn_if_not_setup};
use crate::cli::{EntryOpts, GlobalOpts};
use crate::logging::Logger;
use crate::resources::Operation;
use crate::sync::SyncEngine;

/// Run `add`, `remove`, `link`, or `unlink`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved, discovery
/// fails, or any entry fails.
pub fn run(global: &GlobalOpts, op: Operation, opts: &EntryOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    warn_if_not_setup(&setup.config, log.as_ref());

    let ctx = setup.context(log, global.dry_run);
    let confirm = confirmation(opts.force);
    let engine = SyncEngine::new(&ctx, confirm.as_ref());

    log.stage(stage_title(op));
    let reports = match opts.name.as_deref() {
        Some(name) => vec![engine.run(op, name)],
        None => engine.run_all(op)?,
    };
    if reports.is_empty() {
        log.info(&format!("nothing to {op}"));
    }

    finish(log)
}

const fn stage_title(op: Operation) -> &'static str {
    match op {
        Operation::Track => "Adding dotfiles",
        Operation::Untrack => "Removing dotfiles",
        Operation::Link => "Linking dotfiles",
        Operation::Unlink => "Unlinking dotfiles",
    }
}
