mod cli;
mod config;
mod headless;
mod platform;

use clap::Parser;

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::platform::logging::{self, LogDestination};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ClientConfig::from_cli(&cli)?;

    match cli.command {
        None => {
            // The terminal UI owns stdout, so logs only go to the file.
            logging::initialize(LogDestination::File, &config);
            platform::run_app(&config)
        }
        Some(command) => {
            logging::initialize(LogDestination::Both, &config);
            headless::run(command, &config)
        }
    }
}
