use std::path::PathBuf;

use thiserror::Error;

use super::paths::PathError;

/// Describes the potential error conditions that might arise from got `Repository` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid path {0}: {1}")]
    InvalidPath(PathBuf, #[source] std::io::Error),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("repository does not exist: {0}")]
    RepositoryDoesNotExist(PathBuf),

    #[error("repository already exists: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("configuration does not exist: {0}")]
    ConfigMissing(PathBuf),

    #[error("unable to parse configuration {path}: {source}")]
    ConfigParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unsupported repositoryformatversion {0}")]
    ConfigUnsupportedVersion(i64),

    #[error("unable to serialize configuration: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("unable to write configuration {path}: {source}")]
    ConfigWriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to create directory {path}: {source}")]
    WorkDirCreateError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to create {dir} directory: {source}")]
    SubtreeDirError {
        dir: &'static str,
        source: PathError,
    },

    #[error("unable to create description file: {0}")]
    DescriptionWriteError(#[source] SeedFileError),

    #[error("unable to create HEAD file: {0}")]
    HeadWriteError(#[source] SeedFileError),

    #[error("unable to create staging directory in {path}: {source}")]
    StagingError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to move repository into {path}: {source}")]
    InstallError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Why a fixed file such as `HEAD` could not be written into `.got`.
#[derive(Debug, Error)]
pub enum SeedFileError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for got `Repository` operations.
pub type Result<T> = std::result::Result<T, Error>;
