//! A got repository on the local file system.
//!
//! A repository is a worktree directory with a `.got` metadata directory at
//! its root. The metadata directory holds the configuration, `HEAD`, the
//! `description` file and the `objects`, `branches` and `refs` subtrees.
//!
//! Use `Repository::init` to create one and `Repository::open` (or
//! `Repository::discover`) to work with an existing one.

use std::path::{self, Path, PathBuf};

use tracing::{debug, warn};

pub mod config;
pub use config::{Config, CoreConfig};

mod error;
pub use error::{Error, Result, SeedFileError};

mod init;

pub mod paths;
pub use paths::PathError;

/// Name of the metadata directory at the root of every worktree.
pub const GOT_DIR: &str = ".got";

/// A handle to a got repository, valid for the duration of one command.
#[derive(Debug)]
pub struct Repository {
    work_dir: PathBuf,
    config: Config,
}

impl Repository {
    /// Open an existing repository whose worktree root is `work_dir`.
    ///
    /// The `.got` directory must exist and hold a configuration with a
    /// supported `repositoryformatversion`.
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = absolute(work_dir.as_ref())?;
        let got_dir = work_dir.join(GOT_DIR);

        if !got_dir.is_dir() {
            return Err(Error::RepositoryDoesNotExist(got_dir));
        }

        let config = Config::load(&got_dir)?;
        config.check_version()?;

        debug!(work_dir = %work_dir.display(), "opened repository");
        Ok(Repository { work_dir, config })
    }

    /// Create a handle for `work_dir` without requiring the repository to exist.
    ///
    /// The configuration is loaded if possible. A missing or invalid
    /// configuration is replaced by the default one.
    pub fn bootstrap<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = absolute(work_dir.as_ref())?;
        let got_dir = work_dir.join(GOT_DIR);

        let config = match Config::load(&got_dir).and_then(|c| c.check_version().map(|()| c)) {
            Ok(config) => config,
            Err(Error::ConfigMissing(_)) => Config::default(),
            Err(err) => {
                warn!(%err, "ignoring repository configuration");
                Config::default()
            }
        };

        Ok(Repository { work_dir, config })
    }

    /// Find the repository containing `path`.
    ///
    /// Checks `path` and then each of its ancestors for a `.got` directory and
    /// opens the first one found.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let start = absolute(path.as_ref())?;

        match start.ancestors().find(|dir| dir.join(GOT_DIR).is_dir()) {
            Some(work_dir) => Repository::open(work_dir),
            None => Err(Error::RepositoryDoesNotExist(start)),
        }
    }

    /// Return the worktree root for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.got` directory.
    pub fn got_dir(&self) -> PathBuf {
        self.work_dir.join(GOT_DIR)
    }

    /// Return the configuration this repository was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the absolute path of `rel` inside the `.got` directory.
    pub fn path<P: AsRef<Path>>(&self, rel: P) -> PathBuf {
        paths::resolve(&self.got_dir(), rel)
    }

    /// Return the directory `rel` inside the `.got` directory, creating it
    /// if `create` is set.
    pub fn dir<P: AsRef<Path>>(&self, rel: P, create: bool) -> std::result::Result<PathBuf, PathError> {
        paths::resolve_dir(&self.got_dir(), rel, create)
    }

    /// Return the file `rel` inside the `.got` directory, creating its parent
    /// directories if needed.
    pub fn file<P: AsRef<Path>>(&self, rel: P) -> std::result::Result<PathBuf, PathError> {
        paths::resolve_file(&self.got_dir(), rel)
    }
}

// Absolute and free of `.`/`..`, so ancestors are real parent directories.
fn absolute(path: &Path) -> Result<PathBuf> {
    path::absolute(path)
        .map(|abs| paths::clean(&abs))
        .map_err(|err| Error::InvalidPath(path.to_path_buf(), err))
}

#[cfg(test)]
mod tests;
