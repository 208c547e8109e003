//! SHA-256 digests of files and directory trees.
use anyhow::{Context as _, Result};
use sha2::{Digest as _, Sha256};
use std::path::Path;

/// Digest of a file's bytes or a directory tree's names and contents.
///
/// Directory children are hashed in name order, so two trees with the same
/// content produce the same digest regardless of listing order. `path`
/// itself is followed if it is a link; links inside a directory contribute
/// their target path instead, matching [`copy_tree`](super::fs::copy_tree).
///
/// # Errors
///
/// Returns an error if any entry under `path` cannot be read.
pub fn tree_digest(path: &Path) -> Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    if path.is_dir() {
        hasher.update(b"dir\0");
        let mut children = std::fs::read_dir(path)
            .with_context(|| format!("reading directory {}", path.display()))?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("reading entry in {}", path.display()))?;
        children.sort();
        for name in children {
            hasher.update(name.as_encoded_bytes());
            hasher.update(b"\0");
            hasher.update(child_digest(&path.join(&name))?);
        }
    } else {
        hasher.update(b"file\0");
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        std::io::copy(&mut file, &mut hasher)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    Ok(hasher.finalize().into())
}

fn child_digest(path: &Path) -> Result<[u8; 32]> {
    let meta = path
        .symlink_metadata()
        .with_context(|| format!("reading metadata of {}", path.display()))?;
    if !meta.file_type().is_symlink() {
        return tree_digest(path);
    }
    let target =
        std::fs::read_link(path).with_context(|| format!("reading link {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(b"link\0");
    hasher.update(target.as_os_str().as_encoded_bytes());
    Ok(hasher.finalize().into())
}
