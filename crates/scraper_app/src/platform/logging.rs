//! Logging initialization for the scraper client.
//!
//! The terminal UI draws on stdout, so it logs to the configured file only.
//! Headless commands additionally mirror log lines to stderr, leaving stdout
//! for their output.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::config::ClientConfig;

/// Destination for log output.
pub enum LogDestination {
    /// Write to the configured log file.
    File,
    /// Write to the log file and to stderr.
    Both,
}

/// Initialize the logger with the specified destination.
pub fn initialize(destination: LogDestination, config: &ClientConfig) {
    let _ = CombinedLogger::init(build_loggers(destination, config));
}

fn build_loggers(destination: LogDestination, config: &ClientConfig) -> Vec<Box<dyn SharedLogger>> {
    let level = config.log_level;
    let log_config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if let LogDestination::Both = destination {
        loggers.push(TermLogger::new(
            level.min(LevelFilter::Warn),
            log_config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(file_logger) = create_file_logger(&config.log_file, level, log_config) {
        loggers.push(file_logger);
    }
    loggers
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::Cli;

    fn config_with_log(path: &Path) -> ClientConfig {
        let cli = Cli::try_parse_from([
            "scraper_client",
            "--log-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        ClientConfig::from_cli(&cli).unwrap()
    }

    #[test]
    fn file_destination_creates_log_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("client.log");
        let loggers = build_loggers(LogDestination::File, &config_with_log(&path));

        assert_eq!(loggers.len(), 1);
        assert!(path.is_file());
    }

    #[test]
    fn both_adds_stderr_logger() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("client.log");
        let loggers = build_loggers(LogDestination::Both, &config_with_log(&path));

        assert_eq!(loggers.len(), 2);
    }

    #[test]
    fn unwritable_log_path_is_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("client.log");
        let loggers = build_loggers(LogDestination::File, &config_with_log(&path));

        assert!(loggers.is_empty());
    }
}
