use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use super::{paths, Config, Error, Repository, Result, SeedFileError};

/// Directories created under `.got`, in creation order.
pub(crate) const SUBTREE: [&str; 4] = ["branches", "objects", "refs/tags", "refs/heads"];

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const HEAD: &str = "ref: refs/heads/master\n";

const STAGING_PREFIX: &str = ".got-init-";

impl Repository {
    /// Creates a new, empty got repository on the local file system.
    ///
    /// `work_dir` is created if it does not exist. The `.got` directory is
    /// assembled in a staging directory next to it and moved into place only
    /// once complete, so a failed init leaves no `.got` behind.
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref();
        prepare_work_dir(work_dir)?;

        let repo = Repository::bootstrap(work_dir)?;
        let got_dir = repo.got_dir();
        if got_dir.exists() {
            return Err(Error::AlreadyInitialized(got_dir));
        }

        install(repo.work_dir(), &got_dir, populate)?;

        let repo = Repository::open(repo.work_dir())?;
        info!(got_dir = %got_dir.display(), "initialized repository");
        Ok(repo)
    }
}

fn prepare_work_dir(work_dir: &Path) -> Result<()> {
    match fs::metadata(work_dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory(work_dir.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %work_dir.display(), "creating worktree");
            fs::create_dir_all(work_dir).map_err(|source| Error::WorkDirCreateError {
                path: work_dir.to_path_buf(),
                source,
            })
        }
        Err(err) => Err(err.into()),
    }
}

/// Build a metadata directory with `fill` in a staging directory inside
/// `work_dir`, then rename it to `got_dir`.
///
/// The staging directory is removed if `fill` or the rename fails.
pub(crate) fn install<F>(work_dir: &Path, got_dir: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let mut builder = tempfile::Builder::new();
    let builder = builder.prefix(STAGING_PREFIX);

    // Same mode `create_dir_all` uses, so the umask applies to `.got` just as
    // it does to the directories inside it.
    #[cfg(unix)]
    let builder = {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o777))
    };

    let staging = builder
        .tempdir_in(work_dir)
        .map_err(|source| Error::StagingError {
            path: work_dir.to_path_buf(),
            source,
        })?;

    debug!(staging = %staging.path().display(), "staging repository");
    fill(staging.path())?;

    fs::rename(staging.path(), got_dir).map_err(|source| Error::InstallError {
        path: got_dir.to_path_buf(),
        source,
    })?;

    // The staged path now belongs to `got_dir`; nothing is left to clean up.
    let _ = staging.keep();
    Ok(())
}

pub(crate) fn populate(got_dir: &Path) -> Result<()> {
    create_subtree(got_dir)?;
    write_seed_file(got_dir, "description", DESCRIPTION).map_err(Error::DescriptionWriteError)?;
    write_seed_file(got_dir, "HEAD", HEAD).map_err(Error::HeadWriteError)?;
    Config::write_default(got_dir)?;

    Ok(())
}

pub(crate) fn create_subtree(got_dir: &Path) -> Result<()> {
    for dir in SUBTREE.iter().copied() {
        paths::resolve_dir(got_dir, dir, true)
            .map_err(|source| Error::SubtreeDirError { dir, source })?;
    }
    Ok(())
}

pub(crate) fn write_seed_file(
    got_dir: &Path,
    name: &str,
    contents: &str,
) -> std::result::Result<(), SeedFileError> {
    let path = paths::resolve_file(got_dir, name)?;
    fs::write(path, contents)?;
    Ok(())
}
