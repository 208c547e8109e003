use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsOpts};

/// Write shell completions for `dotify` to stdout.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    write(opts.shell, &mut std::io::stdout());
    Ok(())
}

/// Write completions for `shell` to `out`.
pub fn write(shell: clap_complete::Shell, out: &mut dyn std::io::Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}
