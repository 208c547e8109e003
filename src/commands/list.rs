use anyhow::{Context as _, Result};
use serde::Serialize;
use std::io::Write as _;
use std::path::PathBuf;

use super::CommandSetup;
use crate::cli::{GlobalOpts, ListOpts};
use crate::logging::Logger;
use crate::resources::{Collection, LinkStatus};

/// One row of `dotify list` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Entry name.
    pub name: String,
    /// Current link status.
    pub status: LinkStatus,
    /// Home-side path.
    pub home: PathBuf,
    /// Tracked-side path.
    pub tracked: PathBuf,
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved, the scanned
/// directory cannot be read, or output cannot be written.
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let collection = if opts.home {
        Collection::scan_home(&setup.config)?
    } else {
        Collection::scan_tracked(&setup.config)?
    };
    let rows = rows(&collection);
    log.debug(&format!("{} entries", rows.len()));

    let text = if opts.json {
        serde_json::to_string_pretty(&rows).context("serializing entries")?
    } else {
        render(&rows)
    };
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}").context("writing to stdout")?;
    Ok(())
}

/// Snapshot the status of every entry in `collection`.
#[must_use]
pub fn rows(collection: &Collection) -> Vec<Row> {
    collection
        .iter()
        .map(|e| Row {
            name: e.name().to_string(),
            status: e.status(),
            home: e.home_path().to_path_buf(),
            tracked: e.tracked_path().to_path_buf(),
        })
        .collect()
}

/// Plain-text table: status column, then name.
#[must_use]
pub fn render(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "no dotfiles found".to_string();
    }
    rows.iter()
        .map(|r| format!("{:<9} {}", r.status, r.name))
        .collect::<Vec<_>>()
        .join("\n")
}
