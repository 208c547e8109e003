use anyhow::Result;
use std::sync::Arc;

use super::prompt::StdinPrompt;
use super::{CommandSetup, save};
use crate::cli::{EditOpts, GlobalOpts, SaveOpts};
use crate::exec;
use crate::logging::Logger;
use crate::resources::Entry;

/// Run the edit command.
///
/// Only linked entries are opened; anything else gets a hint to link it
/// first.
///
/// # Errors
///
/// Returns an error if the name is invalid, the editor cannot be run, or
/// the follow-up save fails.
pub fn run(global: &GlobalOpts, opts: &EditOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let entry = Entry::named(&opts.name, &setup.config)?;
    let name = entry.name();

    if !entry.is_linked() {
        log.info(&format!(
            "'{name}' has not been linked by dotify. Run `dotify link {name}` to edit it."
        ));
        return Ok(());
    }

    let editor = setup.config.editor();
    if global.dry_run {
        log.dry_run(&format!(
            "would open {} with {editor}",
            entry.tracked_path().display()
        ));
    } else {
        log.debug(&format!("{editor} {}", entry.tracked_path().display()));
        exec::run_interactive(editor, [entry.tracked_path()])?;
    }

    if opts.save {
        save::save(
            &setup.config,
            &SaveOpts::default(),
            global.dry_run,
            log.as_ref(),
            &StdinPrompt,
        )?;
    }
    Ok(())
}
