use crate::config::types::{Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_queries(&config.queries)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the search query list
fn validate_queries(queries: &[String]) -> Result<(), ConfigError> {
    if queries.is_empty() {
        return Err(ConfigError::Validation(
            "queries must contain at least one search term".to_string(),
        ));
    }

    for query in queries {
        if query.trim().is_empty() {
            return Err(ConfigError::Validation(
                "queries must not contain empty search terms".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.max_pages_per_query < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages-per-query must be >= 1, got {}",
            config.max_pages_per_query
        )));
    }

    if config.max_concurrent_details < 1 || config.max_concurrent_details > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-details must be between 1 and 100, got {}",
            config.max_concurrent_details
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records-path cannot be empty".to_string(),
        ));
    }

    let extension = Path::new(&config.records_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match extension {
        "db" | "sqlite" | "sqlite3" | "json" | "jsonl" | "ndjson" => Ok(()),
        other => Err(ConfigError::Validation(format!(
            "records-path has unsupported extension '{}' (expected db, sqlite, sqlite3, json, jsonl, or ndjson)",
            other
        ))),
    }
}
