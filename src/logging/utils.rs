//! Log file location, timestamps, and escape-sequence stripping.
use std::path::{Path, PathBuf};

/// Cache root: `$XDG_CACHE_HOME` when it is an absolute path, otherwise
/// `~/.cache`. Falls back to the working directory when no home is known.
fn cache_root() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME")
        && Path::new(&xdg).is_absolute()
    {
        return PathBuf::from(xdg);
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".cache")
}

/// Log file for `command`: `<cache root>/dotify/<command>.log` (not created).
pub(super) fn log_file_path(command: &str) -> PathBuf {
    cache_root().join("dotify").join(format!("{command}.log"))
}

/// Remove CSI escape sequences (`ESC [ … final-byte`) so colored console
/// messages read cleanly in the log file.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((before, after)) = rest.split_once("\x1b[") {
        out.push_str(before);
        let mut seq = after
            .trim_start_matches(|c: char| !('@'..='~').contains(&c))
            .chars();
        seq.next();
        rest = seq.as_str();
    }
    out.push_str(rest);
    out
}

/// Current UTC time; `with_date` selects `YYYY-MM-DD HH:MM:SS` over `HH:MM:SS`.
pub(super) fn utc_timestamp(with_date: bool) -> String {
    let format = if with_date { "%Y-%m-%d %H:%M:%S" } else { "%H:%M:%S" };
    chrono::Utc::now().format(format).to_string()
}
