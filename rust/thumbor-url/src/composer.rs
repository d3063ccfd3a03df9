//! Token composition.
//!
//! A [`TokenComposer`] wraps a canonical path into the distributable token:
//!
//! - [`TokenComposer::Legacy`] - unsigned, `/<canonical path>`
//! - [`TokenComposer::Signed`] - `/<signature>/<canonical path>`, where the
//!   signature is the URL-safe encoding of `MAC(key, canonical path)`
//!
//! Legacy tokens can be forged or altered by anyone; only signed tokens let
//! the consuming service trust the request.

use std::fmt;

use crate::codec::{decode_signature, encode_signature};
use crate::{CanonicalEncoder, CompositionError, HmacSigner, RequestDescriptor, SecretKey, Signer};

/// A composed token, ready to be appended to the image service base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    value: String,
    signature_len: Option<usize>,
}

impl Token {
    fn legacy(path: &str) -> Self {
        Self {
            value: format!("/{path}"),
            signature_len: None,
        }
    }

    fn signed(signature: &str, path: &str) -> Self {
        Self {
            value: format!("/{signature}/{path}"),
            signature_len: Some(signature.len()),
        }
    }

    /// The full token text.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The encoded signature segment, if the token is signed.
    pub fn signature(&self) -> Option<&str> {
        self.signature_len.map(|len| &self.value[1..1 + len])
    }

    /// The canonical path carried by the token.
    pub fn path(&self) -> &str {
        match self.signature_len {
            Some(len) => &self.value[len + 2..],
            None => &self.value[1..],
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.value
    }
}

/// Unsigned composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacyComposer;

impl LegacyComposer {
    /// Wrap a canonical path without signing it.
    pub fn compose_path(&self, path: &str) -> Result<Token, CompositionError> {
        tracing::debug!(mode = "legacy", path_len = path.len(), "composing token");
        Ok(Token::legacy(path))
    }

    /// Extract the canonical path from a legacy token.
    pub fn verify<'a>(&self, token: &'a str) -> Result<&'a str, CompositionError> {
        match token.strip_prefix('/') {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(CompositionError::InvalidSignature),
        }
    }
}

/// Keyed composition.
///
/// Holds the key and the signer for the duration of a batch of compositions;
/// it keeps no other state between calls.
#[derive(Debug, Clone)]
pub struct SignedComposer<S = HmacSigner> {
    key: SecretKey,
    signer: S,
}

impl<S: Signer> SignedComposer<S> {
    /// Create a signed composer from a key and a signer.
    pub fn new(key: SecretKey, signer: S) -> Self {
        Self { key, signer }
    }

    /// The signer in use.
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Sign a canonical path and wrap it into a token.
    pub fn compose_path(&self, path: &str) -> Result<Token, CompositionError> {
        let signature = self.signer.sign(&self.key, path.as_bytes());
        let encoded = encode_signature(&signature)?;

        tracing::debug!(
            mode = "signed",
            algorithm = %self.signer.algorithm(),
            path_len = path.len(),
            "composing token"
        );
        Ok(Token::signed(&encoded, path))
    }

    /// Check the signature of a signed token and return its canonical path.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::InvalidSignature`] if the token is not of
    /// the form `/<signature>/<path>` or the signature does not match.
    pub fn verify<'a>(&self, token: &'a str) -> Result<&'a str, CompositionError> {
        let (signature, path) = token
            .strip_prefix('/')
            .and_then(|rest| rest.split_once('/'))
            .ok_or(CompositionError::InvalidSignature)?;
        if path.is_empty() {
            return Err(CompositionError::InvalidSignature);
        }

        let signature = decode_signature(signature)?;
        if self.signer.verify(&self.key, path.as_bytes(), &signature) {
            Ok(path)
        } else {
            tracing::debug!(path_len = path.len(), "token signature mismatch");
            Err(CompositionError::InvalidSignature)
        }
    }
}

/// Produces tokens either unsigned (legacy) or signed.
///
/// The mode is chosen once by the caller; composing is a pure function of
/// the mode and the descriptor.
///
/// # Example
///
/// ```
/// use thumbor_url::{Crop, RequestDescriptor, SecretKey, TokenComposer};
///
/// let descriptor = RequestDescriptor::builder("my.domain.com/image.jpg")
///     .crop(Crop::new(10, 20, 400, 500))
///     .fit_in(true)
///     .build()?;
///
/// let legacy = TokenComposer::legacy().compose(&descriptor)?;
/// assert_eq!(legacy.as_str(), "/10x20:400x500/fit-in/my.domain.com/image.jpg");
///
/// let signed = TokenComposer::signed(SecretKey::new("my-key")?).compose(&descriptor)?;
/// assert_eq!(signed.path(), "10x20:400x500/fit-in/my.domain.com/image.jpg");
/// assert!(signed.signature().is_some());
/// # Ok::<(), thumbor_url::CompositionError>(())
/// ```
#[derive(Debug, Clone)]
pub enum TokenComposer<S = HmacSigner> {
    /// Unsigned tokens.
    Legacy(LegacyComposer),
    /// Signed tokens.
    Signed(SignedComposer<S>),
}

impl From<LegacyComposer> for TokenComposer {
    fn from(composer: LegacyComposer) -> Self {
        Self::Legacy(composer)
    }
}

impl<S: Signer> From<SignedComposer<S>> for TokenComposer<S> {
    fn from(composer: SignedComposer<S>) -> Self {
        Self::Signed(composer)
    }
}

impl TokenComposer {
    /// Create a composer for unsigned legacy tokens.
    pub fn legacy() -> Self {
        Self::Legacy(LegacyComposer)
    }

    /// Create a composer that signs with the default HMAC signer.
    pub fn signed(key: SecretKey) -> Self {
        Self::Signed(SignedComposer::new(key, HmacSigner::default()))
    }
}

impl<S: Signer> TokenComposer<S> {
    /// Create a composer that signs with a caller-supplied signer.
    pub fn signed_with(key: SecretKey, signer: S) -> Self {
        Self::Signed(SignedComposer::new(key, signer))
    }

    /// Select the composer a descriptor asks for.
    ///
    /// Legacy descriptors ignore the key. Signed descriptors require one.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::MissingKey`] when signed mode is requested
    /// without a key.
    pub fn for_descriptor(
        descriptor: &RequestDescriptor,
        key: Option<SecretKey>,
        signer: S,
    ) -> Result<Self, CompositionError> {
        if descriptor.legacy_format() {
            return Ok(Self::Legacy(LegacyComposer));
        }

        let key = key.ok_or(CompositionError::MissingKey)?;
        Ok(Self::Signed(SignedComposer::new(key, signer)))
    }

    /// Whether this composer produces signed tokens.
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }

    /// Encode a descriptor and wrap its canonical path into a token.
    pub fn compose(&self, descriptor: &RequestDescriptor) -> Result<Token, CompositionError> {
        let path = CanonicalEncoder.encode(descriptor)?;
        self.compose_path(&path)
    }

    /// Wrap an already-encoded canonical path into a token.
    pub fn compose_path(&self, path: &str) -> Result<Token, CompositionError> {
        match self {
            Self::Legacy(legacy) => legacy.compose_path(path),
            Self::Signed(signed) => signed.compose_path(path),
        }
    }

    /// Check a token and return the canonical path it carries.
    pub fn verify<'a>(&self, token: &'a str) -> Result<&'a str, CompositionError> {
        match self {
            Self::Legacy(legacy) => legacy.verify(token),
            Self::Signed(signed) => signed.verify(token),
        }
    }
}
