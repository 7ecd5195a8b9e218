//! Quof application glue around the [`qss`] stylesheet engine.
//!
//! The widgets themselves live with the host toolkit; this crate holds what
//! the application root owns: the error type, the file logger, and the
//! configuration and driver used by the `quof-style` tool.

pub mod error;
mod log_init;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

pub use error::{QuofError, Result};
pub use log_init::{init_logger, parse_level};
// Re-export so users can write quof::log::info!, etc.
pub use log;
pub use qss;

use qss::loader::{LoaderOptions, StyleLoader};

/// Settings for one `quof-style` run.
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(
    name = "quof-style",
    about = "Load Quof stylesheets and print the stylesheet text handed to the toolkit"
)]
pub struct Config {
    /// Stylesheet loaded first, replacing any previous state
    pub base: PathBuf,

    /// Stylesheets merged on top of the base, in order
    pub overlays: Vec<PathBuf>,

    /// `selector->key` entry to keep out of the output (repeatable)
    #[arg(long, value_name = "SELECTOR->KEY")]
    pub custom: Vec<String>,

    /// File that log records are appended to
    #[arg(long, env = "QUOF_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, or trace
    #[arg(long, env = "QUOF_LOG_LEVEL", default_value = "debug", value_parser = parse_level_arg)]
    pub log_level: LevelFilter,
}

fn parse_level_arg(name: &str) -> std::result::Result<LevelFilter, String> {
    parse_level(name).ok_or_else(|| format!("unknown log level `{}`", name))
}

/// Loads the configured stylesheets and writes the emitted text to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let options = LoaderOptions::default().with_path(&config.base);
    let mut loader = StyleLoader::with_options(String::new(), options)?;

    for overlay in &config.overlays {
        loader.merge(overlay)?;
    }
    for path in &config.custom {
        if !loader.store_mut().mark_path_as_custom(path)? {
            log::warn!("no entry {} to mark as custom", path);
        }
    }
    loader.apply();

    writeln!(out, "{}", loader.sink())?;
    Ok(())
}
