#![warn(missing_docs)]

//! # thumbor-url
//!
//! Command line front end for [`thumbor_url`]. It gathers the transformation
//! options, resolves the security key and prints the composed URL.
//!
//! ## Usage
//!
//! ```bash
//! thumbor-url -k my-key -w 300 -e 200 my.domain.com/image.jpg
//! ```
//!
//! prints
//!
//! ```text
//! URL:
//! /<signature>/300x200/my.domain.com/image.jpg
//! ```
//!
//! ## Key resolution
//!
//! - `-k/--key` wins over `-l/--key_file`
//! - without either, `security_key` from the configuration is used
//! - `-o/--old-format` produces unsigned URLs and needs no key

mod cli;
pub use cli::*;

mod config;
pub use config::*;

mod logging;
pub use logging::*;

mod run;
pub use run::*;
