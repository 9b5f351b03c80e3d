//! The repository configuration stored in `.got/config`.
//!
//! The file is TOML with a single required `core` table:
//!
//! ```toml
//! [core]
//! repositoryformatversion = 0
//! filemode = false
//! bare = false
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{paths, Error, Result};

/// Name of the configuration file inside the metadata directory.
pub const CONFIG_FILE: &str = "config";

/// The only `repositoryformatversion` this crate understands.
pub const FORMAT_VERSION: i64 = 0;

/// Contents of the repository configuration file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    pub core: CoreConfig,
}

/// The `core` section of the repository configuration.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    #[serde(rename = "repositoryformatversion")]
    pub format_version: i64,

    #[serde(rename = "filemode")]
    pub file_mode: bool,

    pub bare: bool,
}

impl Config {
    /// Read and parse the configuration in `got_dir`.
    ///
    /// The format version is not checked here; see `check_version`.
    pub fn load(got_dir: &Path) -> Result<Self> {
        let path = paths::resolve(got_dir, CONFIG_FILE);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ConfigMissing(path));
            }
            Err(err) => return Err(err.into()),
        };

        toml::from_str(&text).map_err(|source| Error::ConfigParseError { path, source })
    }

    /// Serialize this configuration into `got_dir`, replacing any existing file.
    pub fn write(&self, got_dir: &Path) -> Result<()> {
        let text = toml::to_string(self)?;
        let path = paths::resolve(got_dir, CONFIG_FILE);

        debug!(path = %path.display(), "writing config");
        fs::write(&path, text).map_err(|source| Error::ConfigWriteError { path, source })
    }

    /// Write the default configuration into `got_dir` and return it.
    pub fn write_default(got_dir: &Path) -> Result<Self> {
        let config = Config::default();
        config.write(got_dir)?;
        Ok(config)
    }

    /// Fail unless this configuration uses a format version we understand.
    pub fn check_version(&self) -> Result<()> {
        if self.core.format_version == FORMAT_VERSION {
            Ok(())
        } else {
            Err(Error::ConfigUnsupportedVersion(self.core.format_version))
        }
    }
}
