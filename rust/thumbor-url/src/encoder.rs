//! Canonical path rendering.
//!
//! The canonical path is the message that gets signed, so its layout must be
//! byte-for-byte stable. Segments are emitted in this order, each only when
//! its condition holds, and joined with `/`:
//!
//! ```text
//! meta / trim / LxT:RxB / <fit-in> / [-]Wx[-]H / <halign> / <valign> / smart / filters:a:b / <image>
//! ```

use crate::descriptor::{HorizontalAlign, VerticalAlign};
use crate::{CompositionError, RequestDescriptor};

/// Renders a [`RequestDescriptor`] into its canonical path.
///
/// The encoder holds no state; the same descriptor always produces the same
/// path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalEncoder;

impl CanonicalEncoder {
    /// Render the canonical path for a descriptor (no leading `/`, no
    /// signature).
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::InvalidDescriptor`] if the descriptor
    /// carries no image URL.
    pub fn encode(&self, descriptor: &RequestDescriptor) -> Result<String, CompositionError> {
        if descriptor.image_url().is_empty() {
            return Err(CompositionError::invalid("image URL is required"));
        }

        let mut segments: Vec<String> = Vec::new();

        if descriptor.meta() {
            segments.push("meta".into());
        }

        if descriptor.trim() {
            segments.push("trim".into());
        }

        if let Some(crop) = descriptor.crop() {
            segments.push(crop.to_string());
        }

        if let Some(token) = descriptor.fit_mode().token() {
            segments.push(token.into());
        }

        if let Some(dimensions) = dimensions(descriptor) {
            segments.push(dimensions);
        }

        if descriptor.horizontal_align() != HorizontalAlign::default() {
            segments.push(descriptor.horizontal_align().as_str().into());
        }

        if descriptor.vertical_align() != VerticalAlign::default() {
            segments.push(descriptor.vertical_align().as_str().into());
        }

        if descriptor.smart() {
            segments.push("smart".into());
        }

        if !descriptor.filters().is_empty() {
            segments.push(format!("filters:{}", descriptor.filters().join(":")));
        }

        segments.push(descriptor.image_url().to_string());

        Ok(segments.join("/"))
    }
}

/// The `WxH` segment, with a `-` prefix on each flipped axis.
///
/// A flip on a zero dimension still renders as `-0`.
fn dimensions(descriptor: &RequestDescriptor) -> Option<String> {
    let width = descriptor.width();
    let height = descriptor.height();
    let horizontal_flip = descriptor.horizontal_flip();
    let vertical_flip = descriptor.vertical_flip();

    if width == 0 && height == 0 && !horizontal_flip && !vertical_flip {
        return None;
    }

    let sign = |flip: bool| if flip { "-" } else { "" };
    Some(format!(
        "{}{}x{}{}",
        sign(horizontal_flip),
        width,
        sign(vertical_flip),
        height
    ))
}

/// Render the canonical path for a descriptor.
///
/// Shorthand for [`CanonicalEncoder::encode`].
pub fn canonical_path(descriptor: &RequestDescriptor) -> Result<String, CompositionError> {
    CanonicalEncoder.encode(descriptor)
}
