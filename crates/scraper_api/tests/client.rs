use std::time::Duration;

use pretty_assertions::assert_eq;
use scraper_api::{
    ApiSettings, FailureKind, FilterQuery, PageRecord, ReqwestScraperApi, ScraperApi,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestScraperApi {
    let settings = ApiSettings::new(&server.uri()).expect("mock server uri");
    ReqwestScraperApi::new(settings).expect("client")
}

#[tokio::test]
async fn lists_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filters/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "fields": ["category", "language"] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fields = api_for(&server).list_fields().await.expect("fields");
    assert_eq!(fields, vec!["category".to_string(), "language".to_string()]);
}

#[tokio::test]
async fn lists_values_for_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filters/"))
        .and(query_param("field", "first language"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "values": ["en", "de"] })))
        .expect(1)
        .mount(&server)
        .await;

    let values = api_for(&server)
        .list_values("first language")
        .await
        .expect("values");
    assert_eq!(values, vec!["en".to_string(), "de".to_string()]);
}

#[tokio::test]
async fn scrape_posts_urls_and_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape/"))
        .and(body_json(json!({ "urls": ["a", "b", "c"] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Scraped 3 pages" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let urls = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let message = api_for(&server).trigger_scrape(&urls).await.expect("scrape");
    assert_eq!(message, "Scraped 3 pages");
}

#[tokio::test]
async fn scrape_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "bad url" })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .trigger_scrape(&["nope".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert!(err.message.contains("bad url"));
}

#[tokio::test]
async fn filtered_results_send_indexed_criteria() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filtered-results/"))
        .and(query_param("filters[0][field]", "category"))
        .and(query_param("filters[0][value]", "A"))
        .and(query_param("filters[1][field]", "category"))
        .and(query_param("filters[1][value]", "B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pages": [{
                "url": "https://en.wikipedia.org/x",
                "title": "X",
                "timestamp": "2024-01-01T00:00:00Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = FilterQuery::any_of("category", ["A", "B"]);
    let pages = api_for(&server)
        .filtered_results(&query)
        .await
        .expect("pages");
    assert_eq!(
        pages,
        vec![PageRecord {
            url: "https://en.wikipedia.org/x".to_string(),
            title: "X".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }]
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filters/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": [] })))
        .mount(&server)
        .await;

    let err = api_for(&server).list_fields().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/filters/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "fields": [] })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings::new(&server.uri())
        .unwrap()
        .with_request_timeout(Some(Duration::from_millis(50)));
    let api = ReqwestScraperApi::new(settings).unwrap();

    let err = api.list_fields().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    // Nothing listens on port 1 of the loopback interface.
    let api = ReqwestScraperApi::new(ApiSettings::new("http://127.0.0.1:1").unwrap()).unwrap();

    let err = api.list_fields().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
