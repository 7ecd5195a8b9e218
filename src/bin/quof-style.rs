//! Loads Quof stylesheets and prints the stylesheet text the toolkit gets.
//!
//! ```text
//! QUOF_LOG=style.log quof-style light.style user.style --custom QPlainTextEdit->selection-color
//! ```

use std::process::ExitCode;

use clap::Parser;
use quof::{Config, init_logger, run};

fn main() -> ExitCode {
    let config = Config::parse();

    if let Some(path) = &config.log_file {
        if let Err(err) = init_logger(path, config.log_level) {
            eprintln!("{}", err);
        }
    }

    match run(&config, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
