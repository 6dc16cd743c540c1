//! Git integration using gix

use anyhow::{Context, Result};
use bstr::ByteSlice;
use std::path::{Path, PathBuf};

/// Repository context for a file
#[derive(Debug)]
pub struct RepoContext {
    pub repo: gix::Repository,
    pub workdir: PathBuf,
    pub rel_path: PathBuf,
}

/// Open the repository containing the given file path.
///
/// Returns `None` when the path is outside any git work tree.
pub fn open_repo_for_path(path: &Path) -> Result<Option<RepoContext>> {
    let abs_path = path
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;
    let start = abs_path.parent().unwrap_or_else(|| Path::new("."));

    let repo = match gix::discover(start) {
        Ok(repo) => repo,
        Err(_) => return Ok(None),
    };
    let Some(workdir) = repo.workdir().map(Path::to_path_buf) else {
        return Ok(None);
    };
    let Ok(rel_path) = abs_path.strip_prefix(&workdir).map(Path::to_path_buf) else {
        return Ok(None);
    };

    Ok(Some(RepoContext {
        repo,
        workdir,
        rel_path,
    }))
}

/// Read a file's text as of the given commit-ish.
///
/// Returns `None` when the rev does not resolve, the path is absent from the
/// resolved tree, or the blob is not valid UTF-8.
pub fn read_rev_file_text(
    repo: &gix::Repository,
    rev: &str,
    rel_path: &Path,
) -> Result<Option<String>> {
    let id = match repo.rev_parse_single(rev) {
        Ok(id) => id,
        Err(_) => return Ok(None),
    };
    let tree = id
        .object()
        .context("Failed to read revision object")?
        .peel_to_tree()
        .context("Revision does not point at a tree")?;

    let Some(entry) = tree
        .lookup_entry_by_path(rel_path)
        .context("Failed to look up tree entry")?
    else {
        return Ok(None);
    };

    let object = entry.object().context("Failed to read blob")?;
    Ok(object.data.to_str().ok().map(str::to_owned))
}
