use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format},
    prelude::*,
};

type FileLayer<S> = fmt::Layer<S, format::DefaultFields, format::Format<format::Full>, File>;

/// `-q` keeps errors; each `-v` lowers the threshold one level from WARN.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn file_layer<S>(file: File) -> FileLayer<S> {
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file = log_file
        .map(|path| File::create(&path).map_err(CliError::Io))
        .transpose()?;

    tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(console)
        .with(file.map(file_layer))
        .try_init()
        .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {e}")))
}
