//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use scraper_api::DEFAULT_API_BASE;

/// Terminal client for the Wikipedia scraping service.
#[derive(Debug, Parser)]
#[command(name = "scraper_client")]
#[command(about = "Submit pages to the scraping service and browse filtered results")]
#[command(version)]
pub(crate) struct Cli {
    /// Backend origin, e.g. http://localhost:8000
    #[arg(long, env = "SCRAPER_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Overall timeout per request; transport defaults apply when unset
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "scraper_client.log", global = true)]
    pub log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List filterable fields
    Fields,

    /// List the distinct values of one field
    Values {
        /// Field name
        field: String,
    },

    /// Submit URLs (one per line) for scraping
    Scrape {
        /// File holding the URL list; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Show pages where FIELD equals any of the given values
    Results {
        /// Field to filter on
        #[arg(long)]
        field: String,

        /// Accepted value; repeat for several
        #[arg(long = "value", required = true)]
        values: Vec<String>,
    },
}
