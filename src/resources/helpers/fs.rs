//! File-system helpers: presence checks, removal, and staged copies.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::digest::tree_digest;

/// Suffix of the sibling path used to stage copies and links before they
/// are renamed into place. Scans skip names carrying it.
pub const STAGING_SUFFIX: &str = ".dotify-tmp";

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// `true` if anything, including a dangling symlink, is present at `path`.
#[must_use]
pub fn path_present(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// `true` if `path` is a real directory, not a link to one.
#[must_use]
pub fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|m| m.is_dir() && !m.file_type().is_symlink())
}

/// Sibling path used to stage content destined for `path`.
#[must_use]
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(
        || std::ffi::OsString::from("entry"),
        std::ffi::OsStr::to_os_string,
    );
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

/// Remove whatever is at `path`: a file, a symlink (never its target), or a
/// directory tree. Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_path(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.file_type().is_symlink() {
        remove_symlink(path, &meta)
    } else if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory: {}", path.display()))
    } else {
        std::fs::remove_file(path).with_context(|| format!("removing file: {}", path.display()))
    }
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir`, and
/// `symlink_metadata().is_dir()` is `false` for them, so the raw
/// `FILE_ATTRIBUTE_DIRECTORY` flag is checked instead.
fn remove_symlink(path: &Path, meta: &std::fs::Metadata) -> Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        if meta.file_attributes() & 0x10 != 0 {
            return std::fs::remove_dir(path)
                .with_context(|| format!("removing directory link: {}", path.display()));
        }
    }
    #[cfg(not(windows))]
    let _ = meta;
    std::fs::remove_file(path).with_context(|| format!("removing link: {}", path.display()))
}

/// Copy `src` to `dst`: a single file, or a directory tree recursively.
///
/// `src` itself is followed if it is a link. Links found inside a directory
/// are recreated as links with the same target, never followed, so dangling
/// links and links back up the tree copy as they are.
///
/// # Errors
///
/// Returns an error if a source entry cannot be read or a destination entry
/// cannot be written.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir_recursive(src, dst)
    } else {
        copy_file(src, dst)
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading type of {}", src_path.display()))?;
        if file_type.is_symlink() {
            let target = std::fs::read_link(&src_path)
                .with_context(|| format!("reading link {}", src_path.display()))?;
            create_symlink(&target, &dst_path)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            copy_file(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    std::fs::copy(src, dst)
        .map(|_| ())
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))
}

/// Create a symlink at `link` pointing to `target`.
///
/// A relative `target` is resolved against the directory holding `link`,
/// as the OS does when following it.
///
/// # Errors
///
/// Returns an error if the link cannot be created. On Windows this needs
/// developer mode or elevation.
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    #[cfg(windows)]
    {
        let resolved = link
            .parent()
            .map_or_else(|| target.to_path_buf(), |dir| dir.join(target));
        let result = if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.with_context(|| {
            format!(
                "creating symlink {} -> {} (requires developer mode or admin)",
                link.display(),
                target.display()
            )
        })?;
    }

    Ok(())
}

/// Replace whatever is at `target` with a verified copy of `source`.
///
/// The copy is staged at a sibling path and compared with `source` by
/// SHA-256 tree digest. Only then is `target` removed and the staged copy
/// renamed into place. If staging or verification fails, `target` is left
/// untouched and the staged copy is discarded.
///
/// # Errors
///
/// Returns an error if the copy cannot be staged, does not match the
/// source, or cannot be moved into place.
pub fn replace_with_copy(source: &Path, target: &Path) -> Result<()> {
    let tmp = staging_path(target);
    let cleanup = || {
        let _ = remove_path(&tmp);
    };

    remove_path(&tmp)?;
    if let Err(e) = copy_tree(source, &tmp) {
        cleanup();
        return Err(e).with_context(|| format!("staging copy of {}", source.display()));
    }

    match (tree_digest(source), tree_digest(&tmp)) {
        (Ok(expected), Ok(actual)) if expected == actual => {}
        (Ok(_), Ok(_)) => {
            cleanup();
            bail!(
                "staged copy {} does not match {}",
                tmp.display(),
                source.display()
            );
        }
        (Err(e), _) | (_, Err(e)) => {
            cleanup();
            return Err(e).context("verifying staged copy");
        }
    }

    if let Err(e) = remove_path(target) {
        cleanup();
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, target) {
        cleanup();
        return Err(e).with_context(|| format!("rename {} to {}", tmp.display(), target.display()));
    }
    Ok(())
}
