//! End-to-end composition tests: descriptor -> canonical path -> token.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use testresult::TestResult;
use thumbor_url::codec::is_url_safe;
use thumbor_url::{
    Algorithm, CompositionError, Crop, FitMode, HmacSigner, HorizontalAlign, RequestDescriptor,
    SecretKey, TokenComposer, VerticalAlign, canonical_path,
};

const IMAGE: &str = "my.domain.com/image.jpg";

fn key(value: &str) -> SecretKey {
    SecretKey::new(value).unwrap()
}

#[test]
fn it_composes_a_resized_legacy_url() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE)
        .width(300)
        .height(200)
        .legacy_format(true)
        .build()?;

    let token = TokenComposer::legacy().compose(&descriptor)?;
    assert_eq!(token.to_string(), "/300x200/my.domain.com/image.jpg");
    Ok(())
}

#[test]
fn it_composes_a_flipped_legacy_url() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE)
        .width(300)
        .height(200)
        .horizontal_flip(true)
        .legacy_format(true)
        .build()?;

    let token = TokenComposer::legacy().compose(&descriptor)?;
    assert_eq!(token.as_str(), "/-300x200/my.domain.com/image.jpg");
    Ok(())
}

#[test]
fn it_composes_a_smart_legacy_url() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE)
        .width(200)
        .height(300)
        .smart(true)
        .legacy_format(true)
        .build()?;

    let token = TokenComposer::legacy().compose(&descriptor)?;
    assert_eq!(token.as_str(), "/200x300/smart/my.domain.com/image.jpg");
    Ok(())
}

#[test]
fn it_composes_a_cropped_fit_in_legacy_url() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE)
        .crop(Crop::new(10, 20, 400, 500))
        .fit_in(true)
        .legacy_format(true)
        .build()?;

    let token = TokenComposer::legacy().compose(&descriptor)?;
    assert_eq!(token.as_str(), "/10x20:400x500/fit-in/my.domain.com/image.jpg");
    Ok(())
}

#[test]
fn it_composes_a_cropped_fit_in_signed_url() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE)
        .crop(Crop::new(10, 20, 400, 500))
        .fit_in(true)
        .build()?;

    let token = TokenComposer::signed(key("my-key")).compose(&descriptor)?;
    assert_eq!(
        token.as_str(),
        "/de60Gt6kL-xVskzZYy2SLDiRc6g/10x20:400x500/fit-in/my.domain.com/image.jpg"
    );
    Ok(())
}

#[test]
fn it_composes_a_sha256_signed_url() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE)
        .width(300)
        .height(200)
        .build()?;

    let composer =
        TokenComposer::signed_with(key("my-key"), HmacSigner::new(Algorithm::HmacSha256));
    let token = composer.compose(&descriptor)?;
    assert_eq!(
        token.as_str(),
        "/b6SienLCasAG3OBaV1WfdrzsSuGMwDQ0pBXVOSfPvhQ/300x200/my.domain.com/image.jpg"
    );
    Ok(())
}

#[test]
fn it_diverges_between_legacy_and_signed() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE).width(300).build()?;

    let legacy = TokenComposer::legacy().compose(&descriptor)?;
    let signed = TokenComposer::signed(key("my-key")).compose(&descriptor)?;

    assert_eq!(legacy.signature(), None);
    assert!(signed.signature().is_some());
    assert_eq!(legacy.path(), signed.path());
    assert!(signed.as_str().ends_with(legacy.as_str()));
    Ok(())
}

#[test]
fn it_requires_a_key_for_signed_descriptors() -> TestResult {
    let descriptor = RequestDescriptor::builder(IMAGE).build()?;
    assert!(matches!(
        TokenComposer::for_descriptor(&descriptor, None, HmacSigner::default()),
        Err(CompositionError::MissingKey)
    ));
    Ok(())
}

#[test]
fn it_signs_with_a_key_file() -> TestResult {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "my-key")?;

    let descriptor = RequestDescriptor::builder(IMAGE)
        .crop(Crop::new(10, 20, 400, 500))
        .fit_in(true)
        .build()?;

    let from_file = TokenComposer::signed(SecretKey::from_file(file.path())?).compose(&descriptor)?;
    let inline = TokenComposer::signed(key("my-key")).compose(&descriptor)?;
    assert_eq!(from_file, inline);
    Ok(())
}

fn arb_descriptor() -> impl Strategy<Value = RequestDescriptor> {
    let flags = prop::array::uniform9(any::<bool>());
    let dimensions = (0u32..5000, 0u32..5000);
    let align = (
        prop::sample::select(vec![
            HorizontalAlign::Left,
            HorizontalAlign::Center,
            HorizontalAlign::Right,
        ]),
        prop::sample::select(vec![
            VerticalAlign::Top,
            VerticalAlign::Middle,
            VerticalAlign::Bottom,
        ]),
    );
    let crop = prop::option::of((0u32..1000, 0u32..1000, 0u32..1000, 0u32..1000));
    let filters = prop::collection::vec("[a-z]{1,10}\\([0-9]{0,3}\\)", 0..4);
    let image = "[a-z0-9./_-]{1,40}";

    (flags, dimensions, align, crop, filters, image).prop_map(
        |(flags, (width, height), (halign, valign), crop, filters, image)| {
            let mut builder = RequestDescriptor::builder(image)
                .width(width)
                .height(height)
                .fit_in(flags[0])
                .full(flags[1])
                .adaptive(flags[2])
                .smart(flags[3])
                .meta(flags[4])
                .trim(flags[5])
                .horizontal_flip(flags[6])
                .vertical_flip(flags[7])
                .legacy_format(flags[8])
                .horizontal_align(halign)
                .vertical_align(valign)
                .filters(filters);
            if let Some((left, top, right, bottom)) = crop {
                builder = builder.crop(Crop::new(left, top, right, bottom));
            }
            // A lone "/" strips to an empty URL, so fall back to a fixed image.
            builder
                .build()
                .unwrap_or_else(|_| RequestDescriptor::builder("image.jpg").build().unwrap())
        },
    )
}

proptest! {
    #[test]
    fn encoding_is_deterministic(descriptor in arb_descriptor()) {
        let first = canonical_path(&descriptor).unwrap();
        let second = canonical_path(&descriptor.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn canonical_path_ends_with_the_image(descriptor in arb_descriptor()) {
        let path = canonical_path(&descriptor).unwrap();
        prop_assert!(path.ends_with(descriptor.image_url()));
    }

    #[test]
    fn fit_mode_follows_the_flag_table(fit_in: bool, full: bool, adaptive: bool) {
        let descriptor = RequestDescriptor::builder(IMAGE)
            .fit_in(fit_in)
            .full(full)
            .adaptive(adaptive)
            .build()
            .unwrap();

        let expected = match (fit_in, full, adaptive) {
            (true, true, true) => FitMode::AdaptiveFullFitIn,
            (true, true, false) => FitMode::FullFitIn,
            (true, false, true) => FitMode::AdaptiveFitIn,
            (true, false, false) => FitMode::FitIn,
            _ => FitMode::None,
        };
        prop_assert_eq!(descriptor.fit_mode(), expected);

        let path = canonical_path(&descriptor).unwrap();
        let fit_segments = path
            .split('/')
            .filter(|segment| segment.ends_with("fit-in"))
            .count();
        prop_assert_eq!(fit_segments, usize::from(expected != FitMode::None));
    }

    #[test]
    fn signed_tokens_are_url_safe(descriptor in arb_descriptor(), secret in "[ -~]{1,32}") {
        let token = TokenComposer::signed(key(&secret)).compose(&descriptor).unwrap();
        let signature = token.signature().unwrap();
        prop_assert!(is_url_safe(signature));
        prop_assert!(!signature.is_empty());

        let unsafe_chars: Vec<char> = token
            .as_str()
            .chars()
            .filter(|c| !c.is_ascii_alphanumeric() && !"/:().-_".contains(*c))
            .collect();
        prop_assert!(unsafe_chars.is_empty(), "{} carries {:?}", token, unsafe_chars);
    }

    #[test]
    fn signing_is_stable_and_key_dependent(
        descriptor in arb_descriptor(),
        first in "[a-z]{8,16}",
        second in "[A-Z]{8,16}",
    ) {
        let a = TokenComposer::signed(key(&first)).compose(&descriptor).unwrap();
        let b = TokenComposer::signed(key(&first)).compose(&descriptor).unwrap();
        let c = TokenComposer::signed(key(&second)).compose(&descriptor).unwrap();
        prop_assert_eq!(a.signature(), b.signature());
        prop_assert_ne!(a.signature(), c.signature());
    }

    #[test]
    fn altering_the_path_changes_the_signature(descriptor in arb_descriptor()) {
        let composer = TokenComposer::signed(key("my-key"));
        let path = canonical_path(&descriptor).unwrap();
        let altered = format!("{path}x");

        let original = composer.compose_path(&path).unwrap();
        let changed = composer.compose_path(&altered).unwrap();
        prop_assert_ne!(original.signature(), changed.signature());
        prop_assert!(composer.verify(original.as_str()).is_ok());
    }

    #[test]
    fn crop_is_all_or_nothing(
        left in prop::option::of(0u32..100),
        top in prop::option::of(0u32..100),
        right in prop::option::of(0u32..100),
        bottom in prop::option::of(0u32..100),
    ) {
        let given = [left, top, right, bottom].iter().filter(|c| c.is_some()).count();
        let result = RequestDescriptor::builder(IMAGE)
            .crop_coordinates(left, top, right, bottom)
            .build();

        if given == 0 || given == 4 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(CompositionError::InvalidDescriptor(_))));
        }
    }
}
