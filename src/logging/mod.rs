//! Console and file logging built on [`tracing`], plus the per-entry
//! summary kept by [`Logger`].

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{EntryRecord, EntryStatus, Log};

/// Serializes `XDG_CACHE_HOME` manipulation across parallel test threads.
#[cfg(test)]
static TEST_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Run `f` with `XDG_CACHE_HOME` set to `value` (or removed for `None`),
/// restoring the unset state afterwards.
#[cfg(test)]
pub(crate) fn with_cache_home<T>(value: Option<&std::path::Path>, f: impl FnOnce() -> T) -> T {
    let _lock = TEST_ENV_MUTEX
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    // SAFETY: every test that touches the variable holds TEST_ENV_MUTEX.
    #[allow(unsafe_code)]
    unsafe {
        match value {
            Some(path) => std::env::set_var("XDG_CACHE_HOME", path),
            None => std::env::remove_var("XDG_CACHE_HOME"),
        }
    }
    let out = f();
    // SAFETY: as above; the lock is still held.
    #[allow(unsafe_code)]
    unsafe {
        std::env::remove_var("XDG_CACHE_HOME");
    }
    out
}

/// A [`Logger`] whose events reach a log file in a fresh temp directory via
/// a thread-local subscriber.
///
/// Keep the guard alive for the whole test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let (layer, log) = with_cache_home(Some(tmp.path()), || {
        (subscriber::FileLayer::new("test"), Logger::new("test"))
    });
    let layer = layer.expect("failed to create file layer");
    let subscriber = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, guard)
}
