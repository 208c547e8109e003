use anyhow::{Context as _, Result};
use std::path::Path;

use super::CommandSetup;
use super::prompt::{Prompt, StdinPrompt};
use crate::cli::{GlobalOpts, SaveOpts};
use crate::config::Config;
use crate::exec;
use crate::logging::{Log, Logger};

/// Commit message used when none is given or the prompt is left empty.
const DEFAULT_MESSAGE: &str = "Update dotfiles";

/// What a save run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The tracked directory is not a git repository.
    NotARepository,
    /// The repository had no changes.
    Clean,
    /// `staged` paths were staged; a commit was made if any were.
    Committed {
        /// Number of paths added to the index.
        staged: usize,
        /// Whether the commit was pushed.
        pushed: bool,
    },
}

/// Run the save command.
///
/// # Errors
///
/// Returns an error if the home directory cannot be resolved or any git
/// operation fails.
pub fn run(global: &GlobalOpts, opts: &SaveOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    save(&setup.config, opts, global.dry_run, log, &StdinPrompt)?;
    Ok(())
}

/// Stage changed paths in the tracked repository, commit, and optionally
/// push.
///
/// # Errors
///
/// Returns an error if the repository cannot be read, the index cannot be
/// written, the commit fails, or the push fails.
pub fn save(
    config: &Config,
    opts: &SaveOpts,
    dry_run: bool,
    log: &dyn Log,
    prompt: &dyn Prompt,
) -> Result<SaveOutcome> {
    let root = config.tracked_root(None);
    if !root.join(".git").exists() {
        log.info("dotify has nothing to save");
        return Ok(SaveOutcome::NotARepository);
    }
    log.stage("Saving dotfiles");
    let repo = git2::Repository::open(&root)
        .with_context(|| format!("opening repository {}", root.display()))?;

    let changes = changed_paths(&repo)?;
    if changes.is_empty() {
        log.info("no files have been changed in dotify");
        return Ok(SaveOutcome::Clean);
    }

    let mut index = repo.index().context("reading git index")?;
    let mut staged = 0;
    for (path, status) in &changes {
        log.info(&format!("{}: {path}", describe(*status)));
        let add = opts.force || prompt.ask(&format!("Do you want to add '{path}' to the git index?"));
        if !add {
            continue;
        }
        if dry_run {
            log.dry_run(&format!("would stage {path}"));
        } else if status.is_wt_deleted() {
            index
                .remove_path(Path::new(path))
                .with_context(|| format!("unstaging {path}"))?;
        } else {
            index
                .add_path(Path::new(path))
                .with_context(|| format!("staging {path}"))?;
        }
        staged += 1;
    }

    if staged == 0 {
        log.info("nothing staged, skipping commit");
        return Ok(SaveOutcome::Committed {
            staged,
            pushed: false,
        });
    }

    let message = opts
        .message
        .clone()
        .or_else(|| prompt.ask_line("Commit message:"))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    if dry_run {
        log.dry_run(&format!("would commit {staged} path(s): {message}"));
    } else {
        index.write().context("writing git index")?;
        commit(&repo, &mut index, &message)?;
        log.info(&format!("committed {staged} path(s): {message}"));
    }

    let push = opts.push
        || prompt.ask("Would you like to push these changes to the remote repository?");
    if push {
        if dry_run {
            log.dry_run("would push to the remote repository");
        } else {
            log.info("pushing to the remote repository...");
            exec::run_in(&root, "git", &["push"])
                .context("there was a problem pushing to your remote repository")?;
            log.info("successfully pushed");
        }
    }
    Ok(SaveOutcome::Committed {
        staged,
        pushed: push && !dry_run,
    })
}

/// Paths with working-tree or index changes, including untracked files.
fn changed_paths(repo: &git2::Repository) -> Result<Vec<(String, git2::Status)>> {
    let mut opts = git2::StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    let statuses = repo
        .statuses(Some(&mut opts))
        .context("reading repository status")?;
    Ok(statuses
        .iter()
        .filter(|s| !s.status().is_empty())
        .filter_map(|s| s.path().map(|p| (p.to_string(), s.status())))
        .collect())
}

fn describe(status: git2::Status) -> &'static str {
    if status.is_wt_new() || status.is_index_new() {
        "new"
    } else if status.is_wt_deleted() || status.is_index_deleted() {
        "deleted"
    } else if status.is_wt_renamed() || status.is_index_renamed() {
        "renamed"
    } else if status.is_wt_typechange() || status.is_index_typechange() {
        "typechange"
    } else {
        "changed"
    }
}

fn commit(repo: &git2::Repository, index: &mut git2::Index, message: &str) -> Result<git2::Oid> {
    let tree_id = index.write_tree().context("writing tree")?;
    let tree = repo.find_tree(tree_id).context("finding tree")?;
    let sig = repo
        .signature()
        .or_else(|_| git2::Signature::now("dotify", "dotify@localhost"))
        .context("building commit signature")?;
    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().context("resolving HEAD")?),
        Err(_) => None,
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .context("creating commit")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::cell::RefCell;

    /// Fixed answers that also remember every question asked.
    struct Scripted {
        yes: bool,
        line: Option<String>,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(yes: bool, line: Option<&str>) -> Self {
            Self {
                yes,
                line: line.map(String::from),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompt for Scripted {
        fn ask(&self, question: &str) -> bool {
            self.asked.borrow_mut().push(question.to_string());
            self.yes
        }

        fn ask_line(&self, question: &str) -> Option<String> {
            self.asked.borrow_mut().push(question.to_string());
            self.line.clone()
        }
    }

    fn repo_sandbox() -> (tempfile::TempDir, Config, git2::Repository) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        let repo = git2::Repository::init(config.tracked_root(None)).unwrap();
        (dir, config, repo)
    }

    fn head_message(repo: &git2::Repository) -> String {
        repo.head()
            .unwrap()
            .peel_to_commit()
            .unwrap()
            .message()
            .unwrap()
            .to_string()
    }

    #[test]
    fn not_a_repository() {
        let (log, _tmp, _guard) = isolated_logger();
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        let outcome = save(
            &config,
            &SaveOpts::default(),
            false,
            &log,
            &Scripted::new(true, None),
        )
        .unwrap();
        assert_eq!(outcome, SaveOutcome::NotARepository);
    }

    #[test]
    fn clean_repository_has_nothing_to_commit() {
        let (log, _tmp, _guard) = isolated_logger();
        let (_dir, config, _repo) = repo_sandbox();
        let outcome = save(
            &config,
            &SaveOpts::default(),
            false,
            &log,
            &Scripted::new(true, None),
        )
        .unwrap();
        assert_eq!(outcome, SaveOutcome::Clean);
    }

    #[test]
    fn forced_save_commits_with_message() {
        let (log, _tmp, _guard) = isolated_logger();
        let (_dir, config, repo) = repo_sandbox();
        std::fs::write(config.tracked_root(Some(".vimrc")), "set nu").unwrap();
        let opts = SaveOpts {
            message: Some("add vimrc".to_string()),
            force: true,
            push: false,
        };
        let prompt = Scripted::new(false, None);

        let outcome = save(&config, &opts, false, &log, &prompt).unwrap();

        assert_eq!(
            outcome,
            SaveOutcome::Committed {
                staged: 1,
                pushed: false
            }
        );
        assert_eq!(head_message(&repo), "add vimrc");
        assert_eq!(
            prompt.asked.borrow().as_slice(),
            ["Would you like to push these changes to the remote repository?"]
        );
    }

    #[test]
    fn prompted_message_and_declined_paths() {
        let (log, _tmp, _guard) = isolated_logger();
        let (_dir, config, repo) = repo_sandbox();
        std::fs::write(config.tracked_root(Some(".zshrc")), "z").unwrap();

        let declined = save(
            &config,
            &SaveOpts::default(),
            false,
            &log,
            &Scripted::new(false, None),
        )
        .unwrap();
        assert_eq!(
            declined,
            SaveOutcome::Committed {
                staged: 0,
                pushed: false
            }
        );
        assert!(repo.head().is_err(), "nothing should have been committed");

        let opts = SaveOpts {
            force: true,
            ..SaveOpts::default()
        };
        let prompt = Scripted::new(false, Some("  "));
        save(&config, &opts, false, &log, &prompt).unwrap();
        assert_eq!(head_message(&repo), DEFAULT_MESSAGE);
    }

    #[test]
    fn deleted_file_is_committed() {
        let (log, _tmp, _guard) = isolated_logger();
        let (_dir, config, repo) = repo_sandbox();
        let file = config.tracked_root(Some(".vimrc"));
        std::fs::write(&file, "x").unwrap();
        let opts = SaveOpts {
            message: Some("first".to_string()),
            force: true,
            push: false,
        };
        let quiet = Scripted::new(false, None);
        save(&config, &opts, false, &log, &quiet).unwrap();

        std::fs::remove_file(&file).unwrap();
        let opts = SaveOpts {
            message: Some("drop vimrc".to_string()),
            ..opts
        };
        save(&config, &opts, false, &log, &quiet).unwrap();

        assert_eq!(head_message(&repo), "drop vimrc");
        let tree = repo.head().unwrap().peel_to_tree().unwrap();
        assert!(tree.get_name(".vimrc").is_none());
    }

    #[test]
    fn dry_run_stages_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        let (_dir, config, repo) = repo_sandbox();
        std::fs::write(config.tracked_root(Some(".vimrc")), "x").unwrap();
        let opts = SaveOpts {
            message: Some("m".to_string()),
            force: true,
            push: true,
        };
        let outcome = save(&config, &opts, true, &log, &Scripted::new(true, None)).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Committed {
                staged: 1,
                pushed: false
            }
        );
        assert!(repo.head().is_err());
        assert!(repo.index().unwrap().is_empty());
    }
}
