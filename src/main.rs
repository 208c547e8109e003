use anyhow::Result;
use clap::Parser;
use std::io::Write as _;
use std::sync::Arc;

use dotify_cli::cli::{Cli, Command};
use dotify_cli::commands;
use dotify_cli::logging::{self, Logger};
use dotify_cli::resources::Operation;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let command_name = args.command.name();
    if !matches!(args.command, Command::Completions(_) | Command::Version) {
        logging::init_subscriber(args.verbose, command_name);
    }
    let log = Arc::new(Logger::new(command_name));
    let global = &args.global;

    match &args.command {
        Command::Setup(opts) => commands::setup::run(global, opts, &log),
        Command::Install(opts) => commands::install::run(global, opts, &log),
        Command::Add(opts) => commands::sync::run(global, Operation::Track, opts, &log),
        Command::Remove(opts) => commands::sync::run(global, Operation::Untrack, opts, &log),
        Command::Link(opts) => commands::sync::run(global, Operation::Link, opts, &log),
        Command::Unlink(opts) => commands::sync::run(global, Operation::Unlink, opts, &log),
        Command::List(opts) => commands::list::run(global, opts, &log),
        Command::Edit(opts) => commands::edit::run(global, opts, &log),
        Command::Save(opts) => commands::save::run(global, opts, &log),
        Command::Completions(opts) => commands::completions::run(opts),
        Command::Version => {
            let version =
                option_env!("DOTIFY_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
            writeln!(std::io::stdout(), "dotify {version}")?;
            Ok(())
        }
    }
}
