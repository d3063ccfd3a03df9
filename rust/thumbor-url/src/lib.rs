//! Canonical URL composition for image transformation requests.
//!
//! This crate turns a structured transformation request (dimensions, fit
//! mode, crop, flips, alignment, trimming, filters) into the canonical path
//! understood by thumbor-style image services, and optionally signs that
//! path with a secret key so the service can trust it without re-validating.
//!
//! Composition runs in three steps:
//!
//! 1. [`RequestDescriptorBuilder::build`] validates the request into an
//!    immutable [`RequestDescriptor`].
//! 2. [`CanonicalEncoder`] renders the descriptor into its canonical path.
//! 3. [`TokenComposer`] returns the path as-is (legacy) or prefixes it with
//!    the URL-safe signature of the path (signed).
//!
//! # Example
//!
//! ```
//! use thumbor_url::{RequestDescriptor, SecretKey, TokenComposer};
//!
//! let descriptor = RequestDescriptor::builder("my.domain.com/image.jpg")
//!     .width(300)
//!     .height(200)
//!     .build()?;
//!
//! let legacy = TokenComposer::legacy().compose(&descriptor)?;
//! assert_eq!(legacy.as_str(), "/300x200/my.domain.com/image.jpg");
//!
//! let composer = TokenComposer::signed(SecretKey::new("my-key")?);
//! let signed = composer.compose(&descriptor)?;
//! assert_eq!(composer.verify(signed.as_str())?, "300x200/my.domain.com/image.jpg");
//! # Ok::<(), thumbor_url::CompositionError>(())
//! ```

pub mod codec;
pub mod composer;
pub mod descriptor;
pub mod encoder;
pub mod error;
pub mod key;
pub mod signer;

pub use composer::{LegacyComposer, SignedComposer, Token, TokenComposer};
pub use descriptor::{
    Crop, FitMode, HorizontalAlign, RequestDescriptor, RequestDescriptorBuilder, VerticalAlign,
};
pub use encoder::{CanonicalEncoder, canonical_path};
pub use error::CompositionError;
pub use key::{KeySource, SecretKey};
pub use signer::{Algorithm, HmacSigner, Signer};
