//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the job site and run the full
//! crawl-and-harvest cycle end-to-end against a temporary output file.

use serde_json::Value;
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zipharvest::config::{Config, CrawlerConfig, OutputConfig};
use zipharvest::crawler::Coordinator;

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, queries: Vec<String>, records_path: &str) -> Config {
    Config {
        queries,
        crawler: CrawlerConfig {
            base_url: base_url.to_string(),
            max_pages_per_query: 50,
            page_delay_ms: 0,
            max_concurrent_details: 4,
            request_timeout_secs: 5,
        },
        output: OutputConfig {
            records_path: records_path.to_string(),
        },
    }
}

/// Builds a listing page with the given detail links and optional next page
fn listing_html(base_url: &str, slugs: &[&str], next_page: Option<u32>) -> String {
    let mut html = String::from("<html><body>\n");
    for slug in slugs {
        html.push_str(&format!(
            "<a class=\"jobList-title\" href=\"{}/jobs/{}\">{}</a>\n",
            base_url, slug, slug
        ));
    }
    if let Some(page) = next_page {
        html.push_str(&format!(
            "<a rel=\"next\" href=\"{}/jobs/search?page={}\">{}</a>\n",
            base_url, page, page
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Builds a detail page with an embedded JobPosting structured-data block
fn detail_html(title: &str, company: &str) -> String {
    format!(
        r#"<html><body>
<script type="application/ld+json">
{{
  "@type": "JobPosting",
  "title": "{}",
  "description": "<p>Role description for {}.</p>",
  "employmentType": "FULL_TIME",
  "datePosted": "2024-05-01",
  "hiringOrganization": {{"name": "{}"}},
  "jobLocation": {{"address": {{"addressLocality": "Bengaluru", "addressRegion": "Karnataka"}}}}
}}
</script>
</body></html>"#,
        title, title, company
    )
}

/// Mounts a listing page mock for one (query, page) pair
async fn mount_listing(server: &MockServer, query: &str, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path("/jobs/search"))
        .and(query_param("page", page.to_string()))
        .and(query_param("q", query))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a detail page mock for one job slug
async fn mount_detail(server: &MockServer, slug: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/jobs/{}", slug)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Reads every persisted record from the JSON Lines output
fn read_records(path: &Path) -> Vec<Value> {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    content
        .lines()
        .map(|line| serde_json::from_str(line).expect("record line must parse"))
        .collect()
}

#[tokio::test]
async fn test_full_harvest_three_pages_six_records() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Three listing pages: 1 -> 2 -> 3 -> done, two links each
    mount_listing(
        &mock_server,
        "python",
        1,
        listing_html(&base_url, &["py-a1", "py-a2"], Some(2)),
    )
    .await;
    mount_listing(
        &mock_server,
        "python",
        2,
        listing_html(&base_url, &["py-b1", "py-b2"], Some(3)),
    )
    .await;
    mount_listing(
        &mock_server,
        "python",
        3,
        listing_html(&base_url, &["py-c1", "py-c2"], None),
    )
    .await;

    for slug in ["py-a1", "py-a2", "py-b1", "py-b2", "py-c1", "py-c2"] {
        mount_detail(
            &mock_server,
            slug,
            detail_html(&format!("Engineer {}", slug), "Acme Corp"),
        )
        .await;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let records_path = dir.path().join("jobs.jsonl");
    let config = create_test_config(
        &base_url,
        vec!["python".to_string()],
        records_path.to_str().unwrap(),
    );

    let coordinator = Coordinator::new(config).expect("coordinator");
    let totals = coordinator.run().await;

    assert_eq!(totals.links_found, 6);
    assert_eq!(totals.records_written, 6);
    assert_eq!(totals.omissions(), 0);

    let records = read_records(&records_path);
    assert_eq!(records.len(), 6);

    for record in &records {
        // Populated fields
        assert!(!record["Title"].as_str().unwrap().is_empty());
        assert_eq!(record["Company"], "Acme Corp");
        assert!(!record["ScrapedOn"].as_str().unwrap().is_empty());
        assert_eq!(record["Domain"], "ZipRecruiter");

        // Known extraction gaps stay empty
        assert_eq!(record["JobID"], "");
        assert_eq!(record["Speciality"], "");
        assert_eq!(record["Industry"], "");
        assert_eq!(record["SalaryFrom"], "");
        assert_eq!(record["SalaryUpto"], "");
        assert_eq!(record["PayoutTerm"], "");
        assert_eq!(record["IsEstimatedSalary"], false);
    }
}

#[tokio::test]
async fn test_one_failing_detail_is_logged_omission() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        "python",
        1,
        listing_html(&base_url, &["ok-1", "ok-2", "ok-3", "broken", "ok-4", "ok-5"], None),
    )
    .await;

    for slug in ["ok-1", "ok-2", "ok-3", "ok-4", "ok-5"] {
        mount_detail(
            &mock_server,
            slug,
            detail_html(&format!("Engineer {}", slug), "Acme Corp"),
        )
        .await;
    }

    // The broken detail page fails every strategy
    Mock::given(method("GET"))
        .and(path("/jobs/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let records_path = dir.path().join("jobs.jsonl");
    let config = create_test_config(
        &base_url,
        vec!["python".to_string()],
        records_path.to_str().unwrap(),
    );

    let coordinator = Coordinator::new(config).expect("coordinator");
    let totals = coordinator.run().await;

    assert_eq!(totals.links_found, 6);
    assert_eq!(totals.records_written, 5);
    assert_eq!(totals.fetch_failures, 1);
    assert_eq!(totals.omissions(), 1);

    assert_eq!(read_records(&records_path).len(), 5);
}

#[tokio::test]
async fn test_listing_failure_truncates_only_that_query() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Query "python": page 1 works, page 2 fails every strategy
    mount_listing(
        &mock_server,
        "python",
        1,
        listing_html(&base_url, &["py-1", "py-2"], Some(2)),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/jobs/search"))
        .and(query_param("page", "2"))
        .and(query_param("q", "python"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // Page 3 must never be requested once page 2 has failed
    Mock::given(method("GET"))
        .and(path("/jobs/search"))
        .and(query_param("page", "3"))
        .and(query_param("q", "python"))
        .respond_with(ResponseTemplate::new(200).set_body_string("unreachable"))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Query "aws" in the same run is unaffected
    mount_listing(
        &mock_server,
        "aws",
        1,
        listing_html(&base_url, &["aws-1", "aws-2"], None),
    )
    .await;

    for slug in ["py-1", "py-2", "aws-1", "aws-2"] {
        mount_detail(
            &mock_server,
            slug,
            detail_html(&format!("Engineer {}", slug), "Acme Corp"),
        )
        .await;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let records_path = dir.path().join("jobs.jsonl");
    let config = create_test_config(
        &base_url,
        vec!["python".to_string(), "aws".to_string()],
        records_path.to_str().unwrap(),
    );

    let coordinator = Coordinator::new(config).expect("coordinator");
    let totals = coordinator.run().await;

    // Page 1 links of "python" plus both "aws" links
    assert_eq!(totals.links_found, 4);
    assert_eq!(totals.records_written, 4);
    assert_eq!(totals.omissions(), 0);

    let records = read_records(&records_path);
    assert_eq!(records.len(), 4);

    let titles: Vec<&str> = records
        .iter()
        .map(|r| r["Title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Engineer aws-1"));
    assert!(titles.contains(&"Engineer aws-2"));
}

#[tokio::test]
async fn test_links_repeated_across_pages_processed_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The same posting appears on both pages; it must be fetched once
    mount_listing(
        &mock_server,
        "python",
        1,
        listing_html(&base_url, &["repeat", "only-1"], Some(2)),
    )
    .await;
    mount_listing(
        &mock_server,
        "python",
        2,
        listing_html(&base_url, &["repeat", "only-2"], None),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/jobs/repeat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(detail_html("Engineer repeat", "Acme Corp"))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    for slug in ["only-1", "only-2"] {
        mount_detail(
            &mock_server,
            slug,
            detail_html(&format!("Engineer {}", slug), "Acme Corp"),
        )
        .await;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let records_path = dir.path().join("jobs.jsonl");
    let config = create_test_config(
        &base_url,
        vec!["python".to_string()],
        records_path.to_str().unwrap(),
    );

    let coordinator = Coordinator::new(config).expect("coordinator");
    let totals = coordinator.run().await;

    assert_eq!(totals.links_found, 3);
    assert_eq!(totals.records_written, 3);
    assert_eq!(read_records(&records_path).len(), 3);
}

#[tokio::test]
async fn test_sqlite_output_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_listing(
        &mock_server,
        "python",
        1,
        listing_html(&base_url, &["db-1", "db-2"], None),
    )
    .await;
    for slug in ["db-1", "db-2"] {
        mount_detail(
            &mock_server,
            slug,
            detail_html(&format!("Engineer {}", slug), "Acme Corp"),
        )
        .await;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let records_path = dir.path().join("jobs.db");
    let config = create_test_config(
        &base_url,
        vec!["python".to_string()],
        records_path.to_str().unwrap(),
    );

    let coordinator = Coordinator::new(config).expect("coordinator");
    let totals = coordinator.run().await;

    assert_eq!(totals.records_written, 2);

    let conn = rusqlite::Connection::open(&records_path).expect("open db");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(count, 2);

    let (title, company): (String, String) = conn
        .query_row(
            "SELECT title, company FROM jobs ORDER BY id LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("read row");
    assert!(title.starts_with("Engineer "));
    assert_eq!(company, "Acme Corp");
}
