//! Maps paths relative to a `.got` directory onto the file system.
//!
//! Every function here takes the metadata directory explicitly rather than a
//! `Repository`, so the same rules apply while a repository is still being
//! staged by `Repository::init`.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Reasons why a path inside the metadata directory could not be resolved.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("{0} does not exist")]
    Missing(PathBuf),

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("unable to inspect {path}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("unable to create {path}: {source}")]
    CreateFailed { path: PathBuf, source: io::Error },
}

/// Join `rel` onto the metadata directory. Does no I/O.
///
/// The result never leaves `got_dir`: a leading root is ignored and `..`
/// cannot climb above the metadata directory.
pub fn resolve<P: AsRef<Path>>(got_dir: &Path, rel: P) -> PathBuf {
    let rel: PathBuf = rel
        .as_ref()
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();

    let rel = clean(&rel);
    if rel.as_os_str().is_empty() {
        got_dir.to_path_buf()
    } else {
        got_dir.join(rel)
    }
}

/// Lexically normalize `path`: drop `.` and fold each `..` into the
/// preceding component. A `..` with nothing left to fold is dropped, so the
/// result never climbs above the start of `path`.
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = parts.last() {
                    parts.pop();
                }
            }
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

/// Resolve `rel` as a directory inside the metadata directory.
///
/// If the directory is absent and `create` is set, it is created along with
/// any missing ancestors. Creating a directory that already exists succeeds.
pub fn resolve_dir<P: AsRef<Path>>(
    got_dir: &Path,
    rel: P,
    create: bool,
) -> Result<PathBuf, PathError> {
    let path = resolve(got_dir, rel);

    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => Ok(path),
        Ok(_) => Err(PathError::NotADirectory(path)),
        Err(err)
            if err.kind() == io::ErrorKind::NotFound
                || err.kind() == io::ErrorKind::NotADirectory =>
        {
            // NotADirectory: some ancestor is a regular file. Creation below
            // fails and reports which path could not be made.
            if !create {
                return Err(PathError::Missing(path));
            }

            debug!(path = %path.display(), "creating directory");
            match fs::create_dir_all(&path) {
                Ok(()) => Ok(path),
                Err(source) => Err(PathError::CreateFailed { path, source }),
            }
        }
        Err(source) => Err(PathError::Unreadable { path, source }),
    }
}

/// Resolve `rel` as a file inside the metadata directory, creating its parent
/// directories as needed. The file itself is not touched.
pub fn resolve_file<P: AsRef<Path>>(got_dir: &Path, rel: P) -> Result<PathBuf, PathError> {
    let rel = rel.as_ref();
    let parent = rel.parent().unwrap_or_else(|| Path::new(""));

    resolve_dir(got_dir, parent, true)?;
    Ok(resolve(got_dir, rel))
}
