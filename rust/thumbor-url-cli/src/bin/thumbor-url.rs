use std::process::ExitCode;

use clap::Parser;
use thumbor_url_cli::{ThumborUrlCli, execute, init_tracing};

pub fn main() -> ExitCode {
    let cli = ThumborUrlCli::parse();
    init_tracing(cli.verbose);

    match execute(&cli, &mut std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
