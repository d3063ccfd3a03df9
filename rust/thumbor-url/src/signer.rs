//! Keyed MAC used to sign canonical paths.
//!
//! The composer only depends on the [`Signer`] trait, so a different MAC can
//! be supplied without touching composition. [`HmacSigner`] is the provided
//! implementation.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

use crate::{CompositionError, SecretKey};

/// MAC algorithms available for signing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// HMAC over SHA-1, the MAC thumbor servers verify.
    #[default]
    HmacSha1,
    /// HMAC over SHA-256.
    HmacSha256,
}

impl Algorithm {
    /// Name of the algorithm as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha1 => "hmac-sha1",
            Self::HmacSha256 => "hmac-sha256",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CompositionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hmac-sha1" => Ok(Self::HmacSha1),
            "hmac-sha256" => Ok(Self::HmacSha256),
            other => Err(CompositionError::invalid(format!(
                "unknown signature algorithm {other:?}, expected hmac-sha1 or hmac-sha256"
            ))),
        }
    }
}

/// Keyed signing capability injected into the
/// [`TokenComposer`](crate::TokenComposer).
///
/// Implementations must be deterministic: the same key and message always
/// yield the same signature.
pub trait Signer {
    /// The algorithm this signer implements.
    fn algorithm(&self) -> Algorithm;

    /// Compute the raw signature of `message` under `key`.
    fn sign(&self, key: &SecretKey, message: &[u8]) -> Vec<u8>;

    /// Check `signature` against `message` in constant time.
    fn verify(&self, key: &SecretKey, message: &[u8], signature: &[u8]) -> bool;
}

/// HMAC signer backed by the `hmac` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HmacSigner {
    algorithm: Algorithm,
}

impl HmacSigner {
    /// Create a signer for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }
}

/// Run `$body` with `$mac` bound to an HMAC keyed with `$key` over `$message`,
/// using the digest selected by `$algorithm`.
macro_rules! with_hmac {
    ($algorithm:expr, $key:expr, $message:expr, |$mac:ident| $body:expr) => {
        match $algorithm {
            Algorithm::HmacSha1 => {
                let mut $mac = <Hmac<Sha1> as Mac>::new_from_slice($key.as_bytes())
                    .expect("HMAC can take key of any size");
                $mac.update($message);
                $body
            }
            Algorithm::HmacSha256 => {
                let mut $mac = <Hmac<Sha256> as Mac>::new_from_slice($key.as_bytes())
                    .expect("HMAC can take key of any size");
                $mac.update($message);
                $body
            }
        }
    };
}

impl Signer for HmacSigner {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn sign(&self, key: &SecretKey, message: &[u8]) -> Vec<u8> {
        with_hmac!(self.algorithm, key, message, |mac| mac
            .finalize()
            .into_bytes()
            .to_vec())
    }

    fn verify(&self, key: &SecretKey, message: &[u8], signature: &[u8]) -> bool {
        with_hmac!(self.algorithm, key, message, |mac| mac
            .verify_slice(signature)
            .is_ok())
    }
}
