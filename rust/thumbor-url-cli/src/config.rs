//! Fallback configuration.
//!
//! The configuration is a small JSON document:
//!
//! ```json
//! {
//!   "security_key": "my-key",
//!   "signature_algorithm": "hmac-sha1"
//! }
//! ```
//!
//! It is looked up at `--config`, then at `$THUMBOR_URL_CONFIG`, then at
//! `<config dir>/thumbor-url/config.json`. Only the last location may be
//! absent without error.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thumbor_url::Algorithm;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "THUMBOR_URL_CONFIG";

/// Settings used when the command line does not provide them.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Key used when neither `--key` nor `--key_file` is given.
    pub security_key: Option<String>,
    /// MAC used when `--algorithm` is not given.
    pub signature_algorithm: Option<Algorithm>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "security_key",
                &self.security_key.as_ref().map(|_| "<redacted>"),
            )
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}

impl Config {
    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse configuration {}", path.display()))
    }

    /// Default location of the configuration file, if the platform has a
    /// configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thumbor-url").join("config.json"))
    }

    /// Find and load the configuration.
    ///
    /// Returns `Ok(None)` when no configuration was named and the default
    /// file does not exist.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        let env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match locate(explicit, env, Self::default_path()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_file(&path).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Pick the configuration file to load.
///
/// Explicit and environment paths are returned as-is so that a missing file
/// surfaces as an error; the default path only when it exists.
fn locate(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or(env.filter(|path| !path.as_os_str().is_empty()))
        .or_else(|| default.filter(|path| path.is_file()))
}
