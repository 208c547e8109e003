use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for dotify.
#[derive(Parser, Debug)]
#[command(
    name = "dotify",
    about = "Keep your dotfiles in one directory and link them back into $HOME",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the home directory (defaults to $HOME)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Read configuration from this file instead of ~/.dotrc
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the dotify directory and configuration file
    Setup(SetupOpts),
    /// Set up if needed, then add every untracked dotfile
    Install(InstallOpts),
    /// Copy one or all dotfiles from home into dotify
    #[command(visible_alias = "track")]
    Add(EntryOpts),
    /// Move one or all dotfiles back into home and stop tracking them
    #[command(visible_alias = "untrack")]
    Remove(EntryOpts),
    /// Link one or all tracked dotfiles into home
    Link(EntryOpts),
    /// Remove the home-side link of one or all dotfiles
    Unlink(EntryOpts),
    /// Show dotfiles and their link status
    List(ListOpts),
    /// Open a linked dotfile in the configured editor
    Edit(EditOpts),
    /// Commit changes in the dotify directory and optionally push
    Save(SaveOpts),
    /// Print shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Setup(_) => "setup",
            Self::Install(_) => "install",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Link(_) => "link",
            Self::Unlink(_) => "unlink",
            Self::List(_) => "list",
            Self::Edit(_) => "edit",
            Self::Save(_) => "save",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `setup` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SetupOpts {
    /// Initialise a git repository in the dotify directory
    #[arg(long)]
    pub git: bool,

    /// Do not add dotfiles after setup
    #[arg(long)]
    pub no_install: bool,

    /// Add dotfiles without confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Add dotfiles without confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Options for `add`, `remove`, `link`, and `unlink`.
#[derive(Parser, Debug, Clone, Default)]
pub struct EntryOpts {
    /// Dotfile to operate on (all candidates when omitted)
    pub name: Option<String>,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub force: bool,
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ListOpts {
    /// List the home directory instead of the dotify directory
    #[arg(long)]
    pub home: bool,

    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `edit` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EditOpts {
    /// Dotfile to edit
    pub name: String,

    /// Save changes after the editor exits
    #[arg(short, long)]
    pub save: bool,
}

/// Options for the `save` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct SaveOpts {
    /// Commit message (prompted for when omitted)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Stage every change without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Push without asking
    #[arg(short, long)]
    pub push: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
