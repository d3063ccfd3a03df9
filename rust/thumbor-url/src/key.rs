//! Secret key material and where it comes from.
//!
//! A key is either given inline, read from a one-line key file, or supplied
//! by a fallback configuration source. The key is opaque bytes: it is never
//! derived, cached or printed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::CompositionError;

/// Opaque secret used to sign canonical paths.
///
/// `Debug` output is redacted and there is no `Display` implementation, so
/// the key cannot end up in logs or tokens by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::MissingKey`] for an empty key.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, CompositionError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CompositionError::MissingKey);
        }
        Ok(Self(key))
    }

    /// Read a key from a one-line key file, dropping trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::KeyReadFailure`] if the file cannot be read
    /// and [`CompositionError::MissingKey`] if it holds no key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CompositionError> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|source| CompositionError::KeyReadFailure {
            path: path.to_path_buf(),
            source,
        })?;

        let end = contents
            .iter()
            .rposition(|byte| !byte.is_ascii_whitespace())
            .map_or(0, |position| position + 1);

        tracing::debug!(path = %path.display(), "loaded security key from file");
        Self::new(&contents[..end])
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Where the signing key comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Key given directly by the caller.
    Inline(String),
    /// Path to a one-line key file.
    File(PathBuf),
    /// Key supplied by a configuration source.
    Fallback(String),
}

impl KeySource {
    /// Pick the key source to use.
    ///
    /// An inline key wins over a key file, which wins over the fallback from
    /// configuration. Returns `None` when none is available.
    pub fn resolve(
        inline: Option<String>,
        file: Option<PathBuf>,
        fallback: Option<String>,
    ) -> Option<Self> {
        inline
            .map(Self::Inline)
            .or_else(|| file.map(Self::File))
            .or_else(|| fallback.map(Self::Fallback))
    }

    /// Load the key this source points at.
    ///
    /// File sources are read on every call; callers composing many tokens
    /// should load once and reuse the [`SecretKey`].
    pub fn load(&self) -> Result<SecretKey, CompositionError> {
        match self {
            Self::Inline(key) | Self::Fallback(key) => SecretKey::new(key.as_bytes()),
            Self::File(path) => SecretKey::from_file(path),
        }
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(_) => f.write_str("KeySource::Inline(<redacted>)"),
            Self::File(path) => f.debug_tuple("KeySource::File").field(path).finish(),
            Self::Fallback(_) => f.write_str("KeySource::Fallback(<redacted>)"),
        }
    }
}
