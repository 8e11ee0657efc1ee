use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use scraper_api::ApiSettings;

use crate::cli::Cli;

/// Startup configuration shared by the terminal UI and the headless commands.
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub api: ApiSettings,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let api = ApiSettings::new(&cli.api_base)
            .with_context(|| format!("invalid --api-base {:?}", cli.api_base))?
            .with_request_timeout(cli.timeout_secs.map(Duration::from_secs));
        Ok(Self {
            api,
            log_file: cli.log_file.clone(),
            log_level: cli.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn timeout_and_base_flow_into_api_settings() {
        let cli = Cli::try_parse_from([
            "scraper_client",
            "--api-base",
            "http://51.20.191.161:8000",
            "--timeout-secs",
            "15",
        ])
        .unwrap();
        let config = ClientConfig::from_cli(&cli).unwrap();

        assert_eq!(config.api.base_url.as_str(), "http://51.20.191.161:8000/");
        assert_eq!(config.api.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_base_is_reported() {
        let cli = Cli::try_parse_from(["scraper_client", "--api-base", "nowhere"]).unwrap();
        let err = ClientConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("--api-base"));
    }
}
