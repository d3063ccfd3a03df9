//! Validated, immutable representation of an image transformation request.
//!
//! A [`RequestDescriptor`] is produced once per composition from a
//! [`RequestDescriptorBuilder`] and then handed to the
//! [`CanonicalEncoder`](crate::CanonicalEncoder). All shape validation
//! happens in [`RequestDescriptorBuilder::build`]:
//!
//! - the image URL must be non-empty once a single leading `/` is stripped
//! - crop coordinates are all-or-nothing
//! - the three fit switches collapse into exactly one [`FitMode`]
//!
//! # Example
//!
//! ```
//! use thumbor_url::{Crop, FitMode, RequestDescriptor};
//!
//! let descriptor = RequestDescriptor::builder("/my.domain.com/image.jpg")
//!     .crop(Crop::new(10, 20, 400, 500))
//!     .fit_in(true)
//!     .build()?;
//!
//! assert_eq!(descriptor.image_url(), "my.domain.com/image.jpg");
//! assert_eq!(descriptor.fit_mode(), FitMode::FitIn);
//! # Ok::<(), thumbor_url::CompositionError>(())
//! ```

mod align;
mod crop;
mod fit;

pub use align::{HorizontalAlign, VerticalAlign};
pub use crop::Crop;
pub use fit::FitMode;

use serde::{Deserialize, Serialize};

use crate::CompositionError;

/// A validated image transformation request.
///
/// Width and height of `0` mean "unspecified". Filters keep the order they
/// were supplied in. Serializes through [`RequestDescriptorBuilder`] so that
/// deserialized descriptors pass the same validation as built ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "RequestDescriptorBuilder",
    try_from = "RequestDescriptorBuilder"
)]
pub struct RequestDescriptor {
    image_url: String,
    width: u32,
    height: u32,
    fit_mode: FitMode,
    smart: bool,
    meta: bool,
    trim: bool,
    horizontal_flip: bool,
    vertical_flip: bool,
    horizontal_align: HorizontalAlign,
    vertical_align: VerticalAlign,
    crop: Option<Crop>,
    filters: Vec<String>,
    legacy_format: bool,
}

impl RequestDescriptor {
    /// Start building a request for the given image.
    pub fn builder(image_url: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::new(image_url)
    }

    /// The upstream image, without its leading `/`.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Target width, `0` when unspecified.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height, `0` when unspecified.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The selected fit mode.
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Whether smart (feature-detection) cropping is requested.
    pub fn smart(&self) -> bool {
        self.smart
    }

    /// Whether image metadata should be returned instead of the image.
    pub fn meta(&self) -> bool {
        self.meta
    }

    /// Whether surrounding whitespace should be trimmed.
    pub fn trim(&self) -> bool {
        self.trim
    }

    /// Whether the image is flipped horizontally.
    pub fn horizontal_flip(&self) -> bool {
        self.horizontal_flip
    }

    /// Whether the image is flipped vertically.
    pub fn vertical_flip(&self) -> bool {
        self.vertical_flip
    }

    /// Horizontal crop alignment.
    pub fn horizontal_align(&self) -> HorizontalAlign {
        self.horizontal_align
    }

    /// Vertical crop alignment.
    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }

    /// Manual crop region, if any.
    pub fn crop(&self) -> Option<&Crop> {
        self.crop.as_ref()
    }

    /// Filter call expressions in application order.
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// Whether the unsigned legacy layout was requested.
    pub fn legacy_format(&self) -> bool {
        self.legacy_format
    }
}

/// Collects the loosely-typed inputs of a request before validation.
///
/// Every setter takes and returns `self`; nothing is checked until
/// [`build`](Self::build).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDescriptorBuilder {
    image_url: String,
    width: u32,
    height: u32,
    fit_in: bool,
    full: bool,
    adaptive: bool,
    smart: bool,
    meta: bool,
    trim: bool,
    horizontal_flip: bool,
    vertical_flip: bool,
    horizontal_align: HorizontalAlign,
    vertical_align: VerticalAlign,
    crop_left: Option<u32>,
    crop_top: Option<u32>,
    crop_right: Option<u32>,
    crop_bottom: Option<u32>,
    filters: Vec<String>,
    legacy_format: bool,
}

impl RequestDescriptorBuilder {
    /// Create a builder with every option at its default.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            ..Self::default()
        }
    }

    /// Set the target width (`0` leaves it unspecified).
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the target height (`0` leaves it unspecified).
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Request fit-in resizing.
    pub fn fit_in(mut self, fit_in: bool) -> Self {
        self.fit_in = fit_in;
        self
    }

    /// Modifier for fit-in: fully cover the box.
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    /// Modifier for fit-in: adapt the box orientation to the image.
    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Request smart cropping.
    pub fn smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }

    /// Request image metadata.
    pub fn meta(mut self, meta: bool) -> Self {
        self.meta = meta;
        self
    }

    /// Request whitespace trimming.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Request a horizontal flip.
    pub fn horizontal_flip(mut self, flip: bool) -> Self {
        self.horizontal_flip = flip;
        self
    }

    /// Request a vertical flip.
    pub fn vertical_flip(mut self, flip: bool) -> Self {
        self.vertical_flip = flip;
        self
    }

    /// Set the horizontal crop alignment.
    pub fn horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = align;
        self
    }

    /// Set the vertical crop alignment.
    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    /// Set a complete crop region.
    pub fn crop(mut self, crop: Crop) -> Self {
        self.crop_left = Some(crop.left);
        self.crop_top = Some(crop.top);
        self.crop_right = Some(crop.right);
        self.crop_bottom = Some(crop.bottom);
        self
    }

    /// Set crop coordinates individually.
    ///
    /// Supplying some but not all four makes [`build`](Self::build) fail.
    pub fn crop_coordinates(
        mut self,
        left: Option<u32>,
        top: Option<u32>,
        right: Option<u32>,
        bottom: Option<u32>,
    ) -> Self {
        self.crop_left = left;
        self.crop_top = top;
        self.crop_right = right;
        self.crop_bottom = bottom;
        self
    }

    /// Append one filter call, e.g. `brightness(10)`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Append several filter calls, keeping their order.
    pub fn filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.extend(filters.into_iter().map(Into::into));
        self
    }

    /// Select the unsigned legacy layout.
    pub fn legacy_format(mut self, legacy: bool) -> Self {
        self.legacy_format = legacy;
        self
    }

    /// Validate the collected inputs and produce an immutable descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError::InvalidDescriptor`] when the image URL is
    /// empty or when only some of the crop coordinates were given.
    pub fn build(self) -> Result<RequestDescriptor, CompositionError> {
        let image_url = match self.image_url.strip_prefix('/') {
            Some(stripped) => stripped.to_string(),
            None => self.image_url,
        };
        if image_url.is_empty() {
            return Err(CompositionError::invalid("image URL is required"));
        }

        let crop = Crop::from_coordinates(
            self.crop_left,
            self.crop_top,
            self.crop_right,
            self.crop_bottom,
        )?;

        Ok(RequestDescriptor {
            image_url,
            width: self.width,
            height: self.height,
            fit_mode: FitMode::from_flags(self.fit_in, self.full, self.adaptive),
            smart: self.smart,
            meta: self.meta,
            trim: self.trim,
            horizontal_flip: self.horizontal_flip,
            vertical_flip: self.vertical_flip,
            horizontal_align: self.horizontal_align,
            vertical_align: self.vertical_align,
            crop,
            filters: self.filters,
            legacy_format: self.legacy_format,
        })
    }
}

impl TryFrom<RequestDescriptorBuilder> for RequestDescriptor {
    type Error = CompositionError;

    fn try_from(builder: RequestDescriptorBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<RequestDescriptor> for RequestDescriptorBuilder {
    fn from(descriptor: RequestDescriptor) -> Self {
        let (fit_in, full, adaptive) = match descriptor.fit_mode {
            FitMode::None => (false, false, false),
            FitMode::FitIn => (true, false, false),
            FitMode::FullFitIn => (true, true, false),
            FitMode::AdaptiveFitIn => (true, false, true),
            FitMode::AdaptiveFullFitIn => (true, true, true),
        };

        // build() strips one leading slash, so a stripped URL that still
        // starts with one needs it back to survive the round trip.
        let image_url = if descriptor.image_url.starts_with('/') {
            format!("/{}", descriptor.image_url)
        } else {
            descriptor.image_url
        };

        let builder = Self {
            image_url,
            width: descriptor.width,
            height: descriptor.height,
            fit_in,
            full,
            adaptive,
            smart: descriptor.smart,
            meta: descriptor.meta,
            trim: descriptor.trim,
            horizontal_flip: descriptor.horizontal_flip,
            vertical_flip: descriptor.vertical_flip,
            horizontal_align: descriptor.horizontal_align,
            vertical_align: descriptor.vertical_align,
            filters: descriptor.filters,
            legacy_format: descriptor.legacy_format,
            ..Self::default()
        };

        match descriptor.crop {
            Some(crop) => builder.crop(crop),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_strips_a_single_leading_slash() {
        let descriptor = RequestDescriptor::builder("/my.domain.com/image.jpg")
            .build()
            .unwrap();
        assert_eq!(descriptor.image_url(), "my.domain.com/image.jpg");

        let descriptor = RequestDescriptor::builder("//my.domain.com/image.jpg")
            .build()
            .unwrap();
        assert_eq!(descriptor.image_url(), "/my.domain.com/image.jpg");
    }

    #[test]
    fn it_passes_the_image_url_through_verbatim() {
        let url = "http://my.domain.com/some image.jpg?w=1&h=%20";
        let descriptor = RequestDescriptor::builder(url).build().unwrap();
        assert_eq!(descriptor.image_url(), url);
    }

    #[test]
    fn it_rejects_an_empty_image_url() {
        for url in ["", "/"] {
            assert!(matches!(
                RequestDescriptor::builder(url).build(),
                Err(CompositionError::InvalidDescriptor(_))
            ));
        }
    }

    #[test]
    fn it_rejects_partial_crop() {
        let result = RequestDescriptor::builder("image.jpg")
            .crop_coordinates(Some(10), Some(20), None, Some(500))
            .build();
        assert!(matches!(result, Err(CompositionError::InvalidDescriptor(_))));
    }

    #[test]
    fn it_keeps_filter_order() {
        let descriptor = RequestDescriptor::builder("image.jpg")
            .filter("brightness(10)")
            .filters(["contrast(20)", "quality(80)"])
            .build()
            .unwrap();
        assert_eq!(
            descriptor.filters(),
            ["brightness(10)", "contrast(20)", "quality(80)"]
        );
    }

    #[test]
    fn it_derives_the_fit_mode() {
        let descriptor = RequestDescriptor::builder("image.jpg")
            .fit_in(true)
            .adaptive(true)
            .build()
            .unwrap();
        assert_eq!(descriptor.fit_mode(), FitMode::AdaptiveFitIn);

        let descriptor = RequestDescriptor::builder("image.jpg")
            .full(true)
            .adaptive(true)
            .build()
            .unwrap();
        assert_eq!(descriptor.fit_mode(), FitMode::None);
    }

    #[test]
    fn it_roundtrips_through_serde() {
        let descriptor = RequestDescriptor::builder("my.domain.com/image.jpg")
            .width(300)
            .height(200)
            .fit_in(true)
            .full(true)
            .horizontal_align(HorizontalAlign::Left)
            .crop(Crop::new(1, 2, 3, 4))
            .filter("grayscale()")
            .build()
            .unwrap();

        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: RequestDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, parsed);
    }

    #[test]
    fn it_validates_when_deserializing() {
        let result = serde_json::from_str::<RequestDescriptor>(
            r#"{"image_url": "image.jpg", "crop_left": 10}"#,
        );
        assert!(result.is_err());

        let descriptor: RequestDescriptor =
            serde_json::from_str(r#"{"image_url": "/image.jpg", "fit_in": true}"#).unwrap();
        assert_eq!(descriptor.image_url(), "image.jpg");
        assert_eq!(descriptor.fit_mode(), FitMode::FitIn);
    }
}
