//! URL-safe text encoding for signatures.
//!
//! Signatures are base64 encoded with the URL-safe alphabet (`-` and `_`
//! instead of `+` and `/`) and without `=` padding, so an encoded signature
//! can sit in a path segment without further escaping.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::CompositionError;

/// Encode raw signature bytes as URL-safe text.
///
/// # Errors
///
/// Returns [`CompositionError::EncodingFailure`] for an empty signature,
/// which no correct signer produces.
pub fn encode_signature(signature: &[u8]) -> Result<String, CompositionError> {
    if signature.is_empty() {
        return Err(CompositionError::EncodingFailure(
            "signature is empty".into(),
        ));
    }

    let encoded = URL_SAFE_NO_PAD.encode(signature);
    if !is_url_safe(&encoded) {
        return Err(CompositionError::EncodingFailure(format!(
            "encoded signature {encoded:?} is not URL-safe"
        )));
    }

    Ok(encoded)
}

/// Decode a signature produced by [`encode_signature`].
///
/// Trailing `=` padding is tolerated.
pub fn decode_signature(text: &str) -> Result<Vec<u8>, CompositionError> {
    URL_SAFE_NO_PAD
        .decode(text.trim_end_matches('='))
        .map_err(|_| CompositionError::InvalidSignature)
}

/// Whether `text` only contains characters from the URL-safe base64 alphabet.
pub fn is_url_safe(text: &str) -> bool {
    text.bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}
