//! Confirmation gate consulted before each mutation.
use crate::resources::{Action, Operation};

/// Decides whether a planned change may be applied.
///
/// The engine calls this once per entry that needs a change, after planning
/// and before applying. Entries already in the desired state, entries that
/// fail planning, and dry runs never reach the gate.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Return `true` to apply `action` for `name`.
    fn confirm(&self, name: &str, op: Operation, action: Action) -> bool;
}

/// Gate that approves every change (`--force`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, _name: &str, _op: Operation, _action: Action) -> bool {
        true
    }
}
