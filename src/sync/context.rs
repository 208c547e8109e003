use std::sync::Arc;

use crate::config::Config;
use crate::logging::Log;

/// Shared context for a sync run.
pub struct Context {
    /// Resolved path configuration.
    pub config: Config,
    /// Logger for output and per-entry recording.
    pub log: Arc<dyn Log>,
    /// Whether to preview changes instead of applying them.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub const fn new(config: Config, log: Arc<dyn Log>, dry_run: bool) -> Self {
        Self {
            config,
            log,
            dry_run,
        }
    }
}
