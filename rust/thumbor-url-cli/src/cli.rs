use std::path::PathBuf;

use clap::{ArgAction, Parser};
use thumbor_url::{Algorithm, HorizontalAlign, VerticalAlign};

/// Arguments of the `thumbor-url` command.
#[derive(Debug, Parser)]
#[command(name = "thumbor-url")]
#[command(bin_name = "thumbor-url")]
#[command(version)]
#[command(about = "Converts an image URL and transformation options into a thumbor URL", long_about = None)]
pub struct ThumborUrlCli {
    /// The file to read the security key from.
    #[arg(short = 'l', long = "key_file")]
    pub key_file: Option<PathBuf>,

    /// The security key to sign the URL with.
    #[arg(short, long)]
    pub key: Option<String>,

    /// The target width for the image.
    #[arg(short, long, default_value_t = 0)]
    pub width: u32,

    /// The target height for the image.
    #[arg(short = 'e', long, default_value_t = 0)]
    pub height: u32,

    /// Indicates that fit-in resizing should be performed.
    #[arg(short = 'n', long)]
    pub fitin: bool,

    /// Indicates that meta information should be retrieved.
    #[arg(short, long)]
    pub meta: bool,

    /// Indicates that adaptive fit-in cropping should be used.
    #[arg(long)]
    pub adaptive: bool,

    /// Indicates that fit-full cropping should be used.
    #[arg(long)]
    pub full: bool,

    /// Indicates that smart cropping should be used.
    #[arg(short, long)]
    pub smart: bool,

    /// Indicate that surrounding whitespace should be trimmed.
    #[arg(short, long)]
    pub trim: bool,

    /// Indicates that the image should be horizontally flipped.
    #[arg(short = 'f', long)]
    pub horizontal_flip: bool,

    /// Indicates that the image should be vertically flipped.
    #[arg(short = 'v', long)]
    pub vertical_flip: bool,

    /// The horizontal alignment to use for cropping (left, center or right).
    #[arg(short = 'a', long, default_value_t = HorizontalAlign::Center)]
    pub halign: HorizontalAlign,

    /// The vertical alignment to use for cropping (top, middle or bottom).
    #[arg(short = 'i', long, default_value_t = VerticalAlign::Middle)]
    pub valign: VerticalAlign,

    /// Filters to be applied to the image, e.g. brightness(10). Repeatable.
    #[arg(long, action = ArgAction::Append)]
    pub filters: Vec<String>,

    /// Indicates that old-format (unsigned) URLs should be generated.
    #[arg(short = 'o', long)]
    pub old_format: bool,

    /// The coordinates of the points to manual cropping in the format
    /// leftxtop:rightxbottom (100x200:400x500).
    #[arg(short, long)]
    pub crop: Option<String>,

    /// Configuration file supplying a fallback security key.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// MAC used to sign URLs (hmac-sha1 or hmac-sha256).
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Log more details to stderr. Repeat for more.
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,

    /// The image to transform.
    pub image_url: String,
}
