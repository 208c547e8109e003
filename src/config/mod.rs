//! Path configuration: home root, tracked directory, and ignore lists.
//!
//! Built-in defaults are merged with the user's `~/.dotrc` (TOML). Ignore
//! lists are additive; scalar settings replace the defaults. A broken user
//! file never stops the engine: the loader logs the problem and carries on
//! with defaults.
pub mod toml_loader;

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the tracked directory inside `$HOME` unless overridden.
pub const DEFAULT_DIRNAME: &str = ".dotify";

/// Name of the user configuration file inside the base home directory.
pub const CONFIG_FILE: &str = ".dotrc";

/// Editor used by `dotify edit` unless overridden.
pub const DEFAULT_EDITOR: &str = "vim";

const TRACKED_IGNORES: &[&str] = &[".DS_Store", ".git", ".gitmodule"];
const HOME_IGNORES: &[&str] = &[".DS_Store", ".Trash", ".dropbox"];

/// Commented template written by `dotify setup` when no config file exists.
pub const TEMPLATE: &str = r#"# dotify configuration (TOML)

# Directory inside $HOME that holds the tracked copies.
# dirname = ".dotify"

# Editor launched by `dotify edit`.
# editor = "vim"

# Manage only hidden entries (names starting with '.').
# hidden_only = true

[ignore]
# Extra names never picked up from the tracked directory.
tracked = []
# Extra names never picked up from the home directory.
home = []
"#;

/// Which directory an ignore list applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreCategory {
    /// Entries inside the tracked directory.
    Tracked,
    /// Entries inside the home directory.
    Home,
}

/// Shape of the user's `.dotrc`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserConfig {
    home: Option<PathBuf>,
    dirname: Option<String>,
    editor: Option<String>,
    hidden_only: Option<bool>,
    ignore: UserIgnores,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserIgnores {
    tracked: Vec<String>,
    home: Vec<String>,
}

/// Resolved path configuration, immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct Config {
    home: PathBuf,
    dirname: String,
    editor: String,
    hidden_only: bool,
    tracked_ignores: Vec<String>,
    home_ignores: Vec<String>,
}

impl Config {
    /// Built-in defaults rooted at `home`.
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            dirname: DEFAULT_DIRNAME.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            hidden_only: true,
            tracked_ignores: Vec::new(),
            home_ignores: Vec::new(),
        }
    }

    /// Load defaults for `base_home` merged with the user config file.
    ///
    /// `file` overrides the default location `<base_home>/.dotrc`. Any read
    /// or parse failure is logged at debug level and the defaults are used.
    #[must_use]
    pub fn load(base_home: &Path, file: Option<&Path>) -> Self {
        let path = file.map_or_else(|| Self::file_path(base_home), Path::to_path_buf);
        let defaults = Self::new(base_home);
        match toml_loader::load_config::<UserConfig>(&path) {
            Ok(user) => defaults.merge(user),
            Err(e) => {
                tracing::debug!("ignoring user config, using defaults: {e}");
                defaults
            }
        }
    }

    /// Location of the user config file for `base_home`.
    #[must_use]
    pub fn file_path(base_home: &Path) -> PathBuf {
        base_home.join(CONFIG_FILE)
    }

    fn merge(mut self, user: UserConfig) -> Self {
        if let Some(home) = user.home {
            self.home = home;
        }
        if let Some(dirname) = user.dirname {
            if is_plain_name(&dirname) {
                self.dirname = dirname;
            } else {
                tracing::debug!("ignoring invalid dirname '{dirname}'");
            }
        }
        if let Some(editor) = user.editor.filter(|e| !e.trim().is_empty()) {
            self.editor = editor;
        }
        if let Some(hidden_only) = user.hidden_only {
            self.hidden_only = hidden_only;
        }
        self.tracked_ignores.extend(user.ignore.tracked);
        self.home_ignores.extend(user.ignore.home);
        self
    }

    /// Add extra ignored names for `category`.
    #[must_use]
    pub fn with_ignores<I, S>(mut self, category: IgnoreCategory, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into);
        match category {
            IgnoreCategory::Tracked => self.tracked_ignores.extend(names),
            IgnoreCategory::Home => self.home_ignores.extend(names),
        }
        self
    }

    /// Replace the tracked directory name.
    #[must_use]
    pub fn with_dirname(mut self, dirname: impl Into<String>) -> Self {
        self.dirname = dirname.into();
        self
    }

    /// Toggle the hidden-entries-only filter.
    #[must_use]
    pub const fn with_hidden_only(mut self, hidden_only: bool) -> Self {
        self.hidden_only = hidden_only;
        self
    }

    /// The home root, or the home root joined with `suffix`.
    #[must_use]
    pub fn home(&self, suffix: Option<&str>) -> PathBuf {
        suffix.map_or_else(|| self.home.clone(), |s| self.home.join(s))
    }

    /// The tracked directory root, or that root joined with `suffix`.
    #[must_use]
    pub fn tracked_root(&self, suffix: Option<&str>) -> PathBuf {
        let root = self.home.join(&self.dirname);
        match suffix {
            Some(s) => root.join(s),
            None => root,
        }
    }

    /// `true` if the tracked directory exists and is a directory.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.tracked_root(None).is_dir()
    }

    /// Built-in and user ignore names for `category`, deduplicated in
    /// first-seen order.
    #[must_use]
    pub fn ignore_list(&self, category: IgnoreCategory) -> Vec<String> {
        let (defaults, user): (&[&str], &[String]) = match category {
            IgnoreCategory::Tracked => (TRACKED_IGNORES, &self.tracked_ignores),
            IgnoreCategory::Home => (HOME_IGNORES, &self.home_ignores),
        };
        let own_dir = (category == IgnoreCategory::Home).then_some(self.dirname.as_str());

        let mut out: Vec<String> = Vec::with_capacity(defaults.len() + user.len() + 1);
        let candidates = defaults
            .iter()
            .copied()
            .chain(own_dir)
            .chain(user.iter().map(String::as_str));
        for name in candidates {
            if !out.iter().any(|n| n == name) {
                out.push(name.to_string());
            }
        }
        out
    }

    /// Directory name of the tracked root (e.g. `.dotify`).
    #[must_use]
    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    /// Editor command for `dotify edit`.
    #[must_use]
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Whether scans only consider names starting with `.`.
    #[must_use]
    pub const fn hidden_only(&self) -> bool {
        self.hidden_only
    }
}

/// `true` if `name` is a single, non-special path component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Resolve the base home directory: explicit override, then `HOME`, then
/// `USERPROFILE`.
///
/// # Errors
///
/// Returns an error if no override is given and neither environment
/// variable is set.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(home) = explicit {
        return Ok(home.to_path_buf());
    }
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("neither HOME nor USERPROFILE environment variable is set"))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write_dotrc(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
        dir
    }

    #[test]
    fn home_and_tracked_root_paths() {
        let config = Config::new("/home/u");
        assert_eq!(config.home(None), PathBuf::from("/home/u"));
        assert_eq!(config.home(Some(".vimrc")), PathBuf::from("/home/u/.vimrc"));
        assert_eq!(config.tracked_root(None), PathBuf::from("/home/u/.dotify"));
        assert_eq!(
            config.tracked_root(Some(".vimrc")),
            PathBuf::from("/home/u/.dotify/.vimrc")
        );
    }

    #[test]
    fn default_ignore_lists() {
        let config = Config::new("/home/u");
        assert_eq!(
            config.ignore_list(IgnoreCategory::Tracked),
            vec![".DS_Store", ".git", ".gitmodule"]
        );
        assert_eq!(
            config.ignore_list(IgnoreCategory::Home),
            vec![".DS_Store", ".Trash", ".dropbox", ".dotify"]
        );
    }

    #[test]
    fn home_ignores_follow_custom_dirname() {
        let config = Config::new("/home/u").with_dirname(".dots");
        let ignores = config.ignore_list(IgnoreCategory::Home);
        assert!(ignores.contains(&".dots".to_string()));
        assert!(!ignores.contains(&".dotify".to_string()));
    }

    #[test]
    fn user_ignores_are_additive_and_deduplicated() {
        let config = Config::new("/home/u")
            .with_ignores(IgnoreCategory::Home, [".cache", ".DS_Store", ".cache"]);
        assert_eq!(
            config.ignore_list(IgnoreCategory::Home),
            vec![".DS_Store", ".Trash", ".dropbox", ".dotify", ".cache"]
        );
    }

    #[test]
    fn is_installed_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        assert!(!config.is_installed());

        std::fs::write(config.tracked_root(None), "not a dir").unwrap();
        assert!(!config.is_installed());

        std::fs::remove_file(config.tracked_root(None)).unwrap();
        std::fs::create_dir(config.tracked_root(None)).unwrap();
        assert!(config.is_installed());
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path(), None);
        assert_eq!(config.home(None), dir.path());
        assert_eq!(config.dirname(), DEFAULT_DIRNAME);
        assert_eq!(config.editor(), DEFAULT_EDITOR);
        assert!(config.hidden_only());
    }

    #[test]
    fn load_merges_scalars_and_ignores() {
        let dir = write_dotrc(
            r#"dirname = ".dots"
editor = "nvim"
hidden_only = false

[ignore]
tracked = ["README.md"]
home = [".cache"]
"#,
        );
        let config = Config::load(dir.path(), None);
        assert_eq!(config.dirname(), ".dots");
        assert_eq!(config.editor(), "nvim");
        assert!(!config.hidden_only());
        assert!(
            config
                .ignore_list(IgnoreCategory::Tracked)
                .contains(&"README.md".to_string())
        );
        let home = config.ignore_list(IgnoreCategory::Home);
        assert!(home.contains(&".cache".to_string()));
        assert!(home.contains(&".dots".to_string()));
        assert!(home.contains(&".Trash".to_string()));
    }

    #[test]
    fn load_home_override_reroots_paths() {
        let dir = write_dotrc("home = \"/srv/alt\"\n");
        let config = Config::load(dir.path(), None);
        assert_eq!(config.home(None), PathBuf::from("/srv/alt"));
        assert_eq!(config.tracked_root(None), PathBuf::from("/srv/alt/.dotify"));
    }

    #[test]
    fn load_malformed_file_falls_back_to_defaults() {
        let dir = write_dotrc("dirname = [oops\n");
        let config = Config::load(dir.path(), None);
        assert_eq!(config.dirname(), DEFAULT_DIRNAME);
        assert_eq!(
            config.ignore_list(IgnoreCategory::Tracked),
            vec![".DS_Store", ".git", ".gitmodule"]
        );
    }

    #[test]
    fn load_rejects_dirname_with_separator() {
        let dir = write_dotrc("dirname = \"../escape\"\n");
        let config = Config::load(dir.path(), None);
        assert_eq!(config.dirname(), DEFAULT_DIRNAME);
    }

    #[test]
    fn load_from_explicit_file() {
        let home = tempfile::tempdir().unwrap();
        let other = write_dotrc("editor = \"nano\"\n");
        let config = Config::load(home.path(), Some(&other.path().join(CONFIG_FILE)));
        assert_eq!(config.editor(), "nano");
        assert_eq!(config.home(None), home.path());
    }

    #[test]
    fn template_parses_as_user_config() {
        let user: UserConfig = toml::from_str(TEMPLATE).unwrap();
        assert!(user.dirname.is_none());
        assert!(user.ignore.tracked.is_empty());
    }

    #[test]
    fn resolve_home_prefers_explicit() {
        let home = resolve_home(Some(Path::new("/explicit"))).unwrap();
        assert_eq!(home, PathBuf::from("/explicit"));
    }
}
