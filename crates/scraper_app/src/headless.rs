//! One-shot commands that talk to the backend without the terminal UI.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use chrono::{Local, TimeZone};
use client_logging::client_info;
use scraper_api::{ApiEvent, EngineHandle, FilterQuery, PageRecord};
use scraper_core::{
    format_timestamp, split_url_lines, ValidationError, RESULTS_FAILED_MESSAGE,
    SCRAPE_FAILED_MESSAGE,
};

use crate::cli::Commands;
use crate::config::ClientConfig;

const REQUEST: u64 = 1;

pub(crate) fn run(command: Commands, config: &ClientConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(command, config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Runs one command to completion, writing its output to `out`.
fn execute(command: Commands, config: &ClientConfig, out: &mut impl Write) -> anyhow::Result<()> {
    // Local validation happens before any connection is attempted.
    let command = match command {
        Commands::Scrape { file } => {
            let raw = read_url_text(file.as_deref())?;
            Request::Scrape(urls_from_text(&raw)?)
        }
        Commands::Results { field, values } => Request::Results(filter_query(&field, &values)?),
        Commands::Fields => Request::Fields,
        Commands::Values { field } => Request::Values(field),
    };
    let engine = EngineHandle::new(config.api.clone()).context("starting request engine")?;

    match command {
        Request::Fields => {
            engine.load_fields(REQUEST);
            match next_event(&engine)? {
                ApiEvent::FieldsLoaded { result, .. } => {
                    let fields = result.context("fetching fields")?;
                    write_lines(out, &fields)?;
                }
                other => bail!("unexpected response {other:?}"),
            }
        }
        Request::Values(field) => {
            engine.load_values(REQUEST, field);
            match next_event(&engine)? {
                ApiEvent::ValuesLoaded { field, result, .. } => {
                    let values = result.with_context(|| format!("fetching values of {field}"))?;
                    write_lines(out, &values)?;
                }
                other => bail!("unexpected response {other:?}"),
            }
        }
        Request::Scrape(urls) => {
            client_info!("Submitting {} urls", urls.len());
            engine.submit_scrape(urls);
            match next_event(&engine)? {
                ApiEvent::ScrapeFinished { result, .. } => {
                    let message = result.map_err(|err| anyhow!("{SCRAPE_FAILED_MESSAGE}: {err}"))?;
                    writeln!(out, "{message}")?;
                }
                other => bail!("unexpected response {other:?}"),
            }
        }
        Request::Results(query) => {
            engine.fetch_results(REQUEST, query);
            match next_event(&engine)? {
                ApiEvent::ResultsLoaded { result, .. } => {
                    let pages =
                        result.map_err(|err| anyhow!("{RESULTS_FAILED_MESSAGE} {err}"))?;
                    write_pages(out, &pages, &Local)?;
                }
                other => bail!("unexpected response {other:?}"),
            }
        }
    }
    Ok(())
}

/// A command whose input has passed local validation.
enum Request {
    Fields,
    Values(String),
    Scrape(Vec<String>),
    Results(FilterQuery),
}

fn next_event(engine: &EngineHandle) -> anyhow::Result<ApiEvent> {
    engine
        .recv()
        .ok_or_else(|| anyhow!("request engine stopped before answering"))
}

fn read_url_text(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading urls from stdin")?;
            Ok(text)
        }
    }
}

/// Same validation and line splitting as the URL box: every line is sent as is.
fn urls_from_text(raw: &str) -> Result<Vec<String>, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyUrlInput);
    }
    Ok(split_url_lines(raw))
}

fn filter_query(field: &str, values: &[String]) -> Result<FilterQuery, ValidationError> {
    if field.is_empty() {
        return Err(ValidationError::NoFieldSelected);
    }
    if values.is_empty() {
        return Err(ValidationError::NoValuesSelected);
    }
    Ok(FilterQuery::any_of(field, values.iter().cloned()))
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_pages<Tz>(out: &mut impl Write, pages: &[PageRecord], zone: &Tz) -> io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    for page in pages {
        writeln!(
            out,
            "{}\t{}\t{}",
            page.title,
            page.url,
            format_timestamp(&page.timestamp, zone)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Utc;
    use log::LevelFilter;
    use pretty_assertions::assert_eq;
    use scraper_api::ApiSettings;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> ClientConfig {
        ClientConfig {
            api: ApiSettings::new(&server.uri()).expect("mock server uri"),
            log_file: PathBuf::from("unused.log"),
            log_level: LevelFilter::Off,
        }
    }

    /// Runs a command on a blocking thread, as `main` does, and captures stdout.
    async fn run_command(command: Commands, config: ClientConfig) -> anyhow::Result<String> {
        tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
            let mut out = Vec::new();
            execute(command, &config, &mut out)?;
            Ok(String::from_utf8(out)?)
        })
        .await
        .expect("command thread")
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(urls_from_text(" \n "), Err(ValidationError::EmptyUrlInput));
    }

    #[test]
    fn file_text_is_split_like_the_url_box() {
        for raw in ["a\n", "a\r\n b\n\nc\n", "https://x"] {
            assert_eq!(urls_from_text(raw).unwrap(), split_url_lines(raw));
        }
        assert_eq!(
            urls_from_text("a\n").unwrap(),
            vec!["a".to_string(), String::new()]
        );
    }

    #[test]
    fn filter_query_needs_field_and_values() {
        assert_eq!(
            filter_query("", &["A".to_string()]).unwrap_err(),
            ValidationError::NoFieldSelected
        );
        assert_eq!(
            filter_query("category", &[]).unwrap_err(),
            ValidationError::NoValuesSelected
        );
        let query = filter_query("category", &["A".to_string(), "B".to_string()]).unwrap();
        assert_eq!(query.criteria().len(), 2);
    }

    #[test]
    fn pages_are_tab_separated() {
        let mut out = Vec::new();
        let pages = vec![PageRecord {
            url: "https://en.wikipedia.org/x".to_string(),
            title: "X".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }];
        write_pages(&mut out, &pages, &Utc).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "X\thttps://en.wikipedia.org/x\t2024-01-01 00:00:00\n"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fields_prints_one_per_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/filters/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "fields": ["category", "language"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let output = run_command(Commands::Fields, config_for(&server))
            .await
            .expect("fields");
        assert_eq!(output, "category\nlanguage\n");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn values_prints_one_per_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/filters/"))
            .and(query_param("field", "category"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "values": ["A", "B"] })))
            .expect(1)
            .mount(&server)
            .await;

        let command = Commands::Values {
            field: "category".to_string(),
        };
        let output = run_command(command, config_for(&server))
            .await
            .expect("values");
        assert_eq!(output, "A\nB\n");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn results_prints_title_url_and_local_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/filtered-results/"))
            .and(query_param("filters[0][field]", "category"))
            .and(query_param("filters[0][value]", "A"))
            .and(query_param("filters[1][value]", "B"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pages": [{
                    "url": "https://en.wikipedia.org/wiki/Rust",
                    "title": "Rust",
                    "timestamp": "2024-01-01T00:00:00Z"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let command = Commands::Results {
            field: "category".to_string(),
            values: vec!["A".to_string(), "B".to_string()],
        };
        let output = run_command(command, config_for(&server))
            .await
            .expect("results");
        assert_eq!(
            output,
            format!(
                "Rust\thttps://en.wikipedia.org/wiki/Rust\t{}\n",
                format_timestamp("2024-01-01T00:00:00Z", &Local)
            )
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_error_fails_the_command() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/filtered-results/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let command = Commands::Results {
            field: "category".to_string(),
            values: vec!["A".to_string()],
        };
        let err = run_command(command, config_for(&server))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with(RESULTS_FAILED_MESSAGE), "{err}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn scrape_file_is_posted_and_message_printed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape/"))
            .and(body_json(json!({ "urls": ["https://a", "https://b", ""] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Scraped 2 pages" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "https://a\nhttps://b\n").expect("write urls");

        let command = Commands::Scrape {
            file: Some(file.path().to_path_buf()),
        };
        let output = run_command(command, config_for(&server))
            .await
            .expect("scrape");
        assert_eq!(output, "Scraped 2 pages\n");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blank_scrape_file_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(0)
            .mount(&server)
            .await;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "  \n\t\n").expect("write blanks");

        let command = Commands::Scrape {
            file: Some(file.path().to_path_buf()),
        };
        let err = run_command(command, config_for(&server))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyUrlInput)
        );
    }
}
