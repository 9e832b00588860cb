//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: CLI settings → paged HTTP requests → CSV/Parquet output

use anime_snapshot::cli::{Cli, Runner, WriteStatus};
use anime_snapshot::collector::{Collector, CollectorConfig, Termination};
use anime_snapshot::http::HttpClient;
use anime_snapshot::logging::{LogLevel, MemoryLog};
use anime_snapshot::Error;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn page_body(entries: Value, has_next_page: bool) -> Value {
    json!({
        "data": entries,
        "pagination": {"has_next_page": has_next_page, "current_page": 1}
    })
}

async fn mount_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v4/anime"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Runner with zero delays, writing into `output`
fn runner(base_url: &str, output: &Path, extra: &[&str]) -> (Runner, Arc<MemoryLog>) {
    let output = output.to_str().unwrap();
    let mut argv = vec![
        "anime-snapshot",
        "--base-url",
        base_url,
        "--output",
        output,
        "--retry-delay",
        "0",
        "--page-delay",
        "0",
    ];
    argv.extend_from_slice(extra);

    let log = MemoryLog::shared();
    let runner = Runner::new(Cli::try_parse_from(argv).unwrap()).with_log(log.clone());
    (runner, log)
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v4/anime")
}

// ============================================================================
// End-to-end runs
// ============================================================================

#[tokio::test]
async fn test_two_page_pull_writes_csv() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        page_body(
            json!([
                {
                    "title": "Cowboy Bebop",
                    "episodes": 26,
                    "rating": "R - 17+ (violence & profanity)",
                    "score": 8.75,
                    "synopsis": "Crime is timeless.",
                    "genres": [{"mal_id": 1, "name": "Action"}, {"mal_id": 24, "name": "Sci-Fi"}]
                },
                {
                    "title": "Trigun",
                    "episodes": 26,
                    "rating": "PG-13 - Teens 13 or older",
                    "score": 8.22,
                    "synopsis": null,
                    "genres": [{"name": "Adventure"}]
                }
            ]),
            true,
        ),
    )
    .await;
    mount_page(
        &server,
        2,
        page_body(json!([{"title": "Monster", "episodes": 74}]), false),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("data").join("anime_data.csv");
    let (runner, log) = runner(&format!("{}/v4/anime", server.uri()), &output, &[]);

    let report = runner.run().await.unwrap();

    assert!(matches!(
        report.termination,
        Termination::Completed { last_page: 2 }
    ));
    assert_eq!(
        report.write,
        WriteStatus::Written {
            path: output.clone(),
            rows: 3
        }
    );
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.retries, 0);

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Title,Episodes,Rating,Score,Synopsis,Genres",
            "Cowboy Bebop,26,R - 17+ (violence & profanity),8.75,Crime is timeless.,\"Action, Sci-Fi\"",
            "Trigun,26,PG-13 - Teens 13 or older,8.22,,Adventure",
            "Monster,74,,,,",
        ]
    );
    assert!(log.contains("Done!"));
    assert_eq!(log.count(LogLevel::Error), 0);
}

#[tokio::test]
async fn test_later_page_failure_keeps_earlier_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(json!([{"title": "A"}]), true)).await;
    mount_page(&server, 2, page_body(json!([{"title": "B"}]), true)).await;
    Mock::given(method("GET"))
        .and(path("/v4/anime"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("anime_data.csv");
    let (runner, log) = runner(&format!("{}/v4/anime", server.uri()), &output, &[]);

    let report = runner.run().await.unwrap();

    assert!(matches!(
        report.termination,
        Termination::Failed {
            page: 3,
            error: Error::HttpStatus { status: 500, .. }
        }
    ));
    assert!(report.write.is_written());

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content, "Title,Episodes,Rating,Score,Synopsis,Genres\nA,,,,,\nB,,,,,\n");
    assert!(log.contains("Error fetching page 3"));
}

#[tokio::test]
async fn test_first_page_failure_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/anime"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("anime_data.csv");
    let (runner, log) = runner(&format!("{}/v4/anime", server.uri()), &output, &[]);

    let report = runner.run().await.unwrap();

    assert!(matches!(
        report.termination,
        Termination::Failed {
            page: 1,
            error: Error::JsonParse(_)
        }
    ));
    assert_eq!(report.write, WriteStatus::NoData);
    assert!(!output.exists());
    assert!(log.contains("Error parsing JSON from page 1"));
    assert!(log.contains("No anime data collected"));
}

#[tokio::test]
async fn test_unreachable_server_retries_then_gives_up() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("anime_data.csv");
    let (runner, log) = runner(&closed_port_url(), &output, &[]);

    let report = runner.run().await.unwrap();

    assert!(matches!(
        report.termination,
        Termination::Failed {
            page: 1,
            error: Error::RetriesExhausted { attempts: 3, .. }
        }
    ));
    assert_eq!(report.stats.attempts, 3);
    assert_eq!(report.stats.retries, 2);
    assert!(log.count(LogLevel::Warn) >= 2);
    assert!(log.contains("Max retries (3) reached for page 1"));
    assert_eq!(report.write, WriteStatus::NoData);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_parquet_output() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        page_body(json!([{"title": "Mushishi", "score": 8.8}]), false),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("anime_data.parquet");
    let (runner, _log) = runner(
        &format!("{}/v4/anime", server.uri()),
        &output,
        &["--format", "parquet"],
    );

    let report = runner.run().await.unwrap();

    assert_eq!(
        report.write,
        WriteStatus::Written {
            path: output.clone(),
            rows: 1
        }
    );
    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..4], b"PAR1");
}

#[tokio::test]
async fn test_missing_flag_stops_after_page() {
    let server = MockServer::start().await;
    mount_page(&server, 1, json!({"data": [{"title": "Only"}]})).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("anime_data.csv");
    let (runner, log) = runner(&format!("{}/v4/anime", server.uri()), &output, &[]);

    let report = runner.run().await.unwrap();

    assert!(report.termination.is_completed());
    assert!(report.write.is_written());
    assert!(log.contains("treating it as the last page"));
}

// ============================================================================
// Collector against a real HTTP client
// ============================================================================

#[tokio::test]
async fn test_collector_keeps_existing_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/anime"))
        .and(query_param("sfw", "true"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_body(json!([{"title": "Aria"}]), false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(format!("{}/v4/anime?sfw=true", server.uri())).unwrap();
    let mut collector = Collector::new(client, CollectorConfig::new().without_delays())
        .with_log(MemoryLog::shared());

    let outcome = collector.collect().await;

    assert!(outcome.termination.is_completed());
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].title, Some(json!("Aria")));
}

#[tokio::test]
async fn test_timeout_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/anime"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(json!([]), false))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("anime_data.csv");
    let (runner, _log) = runner(
        &format!("{}/v4/anime", server.uri()),
        &output,
        &["--timeout", "1", "--max-attempts", "2"],
    );

    let report = runner.run().await.unwrap();

    assert!(matches!(
        report.termination,
        Termination::Failed {
            page: 1,
            error: Error::RetriesExhausted { attempts: 2, .. }
        }
    ));
    assert_eq!(report.stats.attempts, 2);
    assert_eq!(report.write, WriteStatus::NoData);
}
