//! Dotfile primitives: entries, collections, and the plan/apply link builder.
pub mod collection;
pub mod entry;
pub mod helpers;
pub mod link;

pub use collection::Collection;
pub use entry::{Entry, LinkStatus};
pub use link::LinkBuilder;

/// A single-entry operation the link builder knows how to perform.
///
/// # Examples
///
/// ```
/// use dotify_cli::resources::Operation;
///
/// assert_eq!(Operation::Link.verb(), "link");
/// assert_eq!(
///     Operation::Track.question(".vimrc"),
///     "Do you want to add .vimrc to dotify?"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Copy a home entry into the tracked directory.
    Track,
    /// Move a tracked entry back into home and stop tracking it.
    Untrack,
    /// Replace the home entry with a link to its tracked copy.
    Link,
    /// Remove the home-side link, keeping the tracked copy.
    Unlink,
}

impl Operation {
    /// Imperative verb used in log lines (`track`, `untrack`, …).
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Untrack => "untrack",
            Self::Link => "link",
            Self::Unlink => "unlink",
        }
    }

    /// Confirmation question for `name`, without the answer hint.
    #[must_use]
    pub fn question(self, name: &str) -> String {
        match self {
            Self::Track => format!("Do you want to add {name} to dotify?"),
            Self::Untrack => format!("Do you want to remove {name} from dotify?"),
            Self::Link => format!("Do you want to link {name} to the home directory?"),
            Self::Unlink => format!("Do you want to unlink {name} from the home directory?"),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.verb())
    }
}

/// The mutation an operation performs (or would perform) on one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Home content copied into the tracked directory.
    Tracked,
    /// Tracked content moved back to home; the tracked copy is gone.
    Removed,
    /// Link created where nothing existed.
    Linked,
    /// Something at the home path was replaced by the link.
    Replaced,
    /// Home-side link removed.
    Unlinked,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Tracked => "tracked",
            Self::Removed => "removed",
            Self::Linked => "linked",
            Self::Replaced => "replaced",
            Self::Unlinked => "unlinked",
        })
    }
}

/// Result of planning or applying an operation.
///
/// # Examples
///
/// ```
/// use dotify_cli::resources::{Action, Change};
///
/// let applied = Change::Applied(Action::Linked);
/// assert_ne!(applied, Change::AlreadyCorrect);
/// assert_eq!(applied.action(), Some(Action::Linked));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The entry needs (or received) this action.
    Applied(Action),
    /// The entry was already in the requested state.
    AlreadyCorrect,
}

impl Change {
    /// The action carried by [`Change::Applied`], if any.
    #[must_use]
    pub const fn action(self) -> Option<Action> {
        match self {
            Self::Applied(action) => Some(action),
            Self::AlreadyCorrect => None,
        }
    }
}
