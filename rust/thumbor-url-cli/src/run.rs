use std::io::Write;

use anyhow::{Context, Result};
use thumbor_url::{
    CompositionError, Crop, HmacSigner, KeySource, RequestDescriptor, Token, TokenComposer,
};

use crate::{Config, ThumborUrlCli};

/// Turn the parsed arguments into a validated request.
pub fn descriptor(cli: &ThumborUrlCli) -> Result<RequestDescriptor, CompositionError> {
    let mut builder = RequestDescriptor::builder(cli.image_url.as_str())
        .width(cli.width)
        .height(cli.height)
        .fit_in(cli.fitin)
        .full(cli.full)
        .adaptive(cli.adaptive)
        .smart(cli.smart)
        .meta(cli.meta)
        .trim(cli.trim)
        .horizontal_flip(cli.horizontal_flip)
        .vertical_flip(cli.vertical_flip)
        .horizontal_align(cli.halign)
        .vertical_align(cli.valign)
        .filters(cli.filters.iter().map(String::as_str))
        .legacy_format(cli.old_format);

    if let Some(crop) = cli.crop.as_deref().filter(|crop| !crop.is_empty()) {
        builder = builder.crop(crop.parse::<Crop>()?);
    }

    builder.build()
}

/// Compose the token the arguments describe.
///
/// Configuration is only consulted for signed tokens.
pub fn compose(cli: &ThumborUrlCli) -> Result<Token> {
    let descriptor = descriptor(cli)?;

    if descriptor.legacy_format() {
        return Ok(TokenComposer::legacy().compose(&descriptor)?);
    }

    let key = cli.key.clone().filter(|key| !key.is_empty());
    let config = fallback_config(cli, key.is_some() || cli.key_file.is_some())?;

    let source = KeySource::resolve(key, cli.key_file.clone(), config.security_key.clone())
        .ok_or(CompositionError::MissingKey)
        .context("pass -k/--key or -l/--key_file, or set security_key in the configuration")?;
    let key = source.load()?;

    let algorithm = cli
        .algorithm
        .or(config.signature_algorithm)
        .unwrap_or_default();
    tracing::info!(?source, %algorithm, "signing URL");

    let composer = TokenComposer::signed_with(key, HmacSigner::new(algorithm));
    Ok(composer.compose(&descriptor)?)
}

/// Load the configuration that fills in what the arguments leave out.
///
/// With an explicit key the configuration only supplies the algorithm, so it
/// is skipped when `--algorithm` is given and a broken file is ignored.
fn fallback_config(cli: &ThumborUrlCli, explicit_key: bool) -> Result<Config> {
    if explicit_key && cli.algorithm.is_some() {
        return Ok(Config::default());
    }

    match Config::discover(cli.config.as_deref()) {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(error) if explicit_key => {
            let reason = format!("{error:#}");
            tracing::warn!(%reason, "ignoring unusable configuration");
            Ok(Config::default())
        }
        Err(error) => Err(error),
    }
}

/// Compose the token and print it after a `URL:` label line.
///
/// Nothing is written unless composition succeeds.
pub fn execute(cli: &ThumborUrlCli, out: &mut impl Write) -> Result<Token> {
    let token = compose(cli)?;
    writeln!(out, "URL:")?;
    writeln!(out, "{token}")?;
    Ok(token)
}
