//! The job record produced for every successfully harvested detail page
//!
//! The record is a fixed-field struct rather than a string-keyed map so a
//! missing or renamed field is a compile error. Fields the site's structured
//! data does not carry are populated with explicit empty sentinels.

use chrono::Utc;
use serde::Serialize;

/// Timestamp format used for the `scraped_on` field
pub const SCRAPED_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One job posting, ready for the sink
///
/// Serialized field names match the site's historical export columns, so
/// downstream consumers of the JSON output see `Title`, `PostUrl`, etc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    /// Site the record came from (always "ZipRecruiter" here)
    #[serde(rename = "Domain")]
    pub domain: String,

    /// URL of the detail page the record was extracted from
    #[serde(rename = "PostUrl")]
    pub post_url: String,

    /// Not populated by the extractor; empty sentinel
    #[serde(rename = "JobID")]
    pub job_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "State")]
    pub state: String,

    /// Not populated by the extractor; empty sentinel
    #[serde(rename = "Speciality")]
    pub speciality: String,

    /// Employment type as published (e.g. FULL_TIME)
    #[serde(rename = "JobType")]
    pub job_type: String,

    /// Full description, flattened to plain text
    #[serde(rename = "JobDetails")]
    pub job_details: String,

    /// Not populated by the extractor; empty sentinel
    #[serde(rename = "Industry")]
    pub industry: String,

    #[serde(rename = "Company")]
    pub company: String,

    /// Publication date as published by the site
    #[serde(rename = "PostedOn")]
    pub posted_on: String,

    /// Not populated by the extractor; empty sentinel
    #[serde(rename = "SalaryFrom")]
    pub salary_from: String,

    /// Not populated by the extractor; empty sentinel
    #[serde(rename = "SalaryUpto")]
    pub salary_upto: String,

    /// Not populated by the extractor; empty sentinel
    #[serde(rename = "PayoutTerm")]
    pub payout_term: String,

    #[serde(rename = "IsEstimatedSalary")]
    pub is_estimated_salary: bool,

    /// UTC timestamp of the scrape, formatted with [`SCRAPED_ON_FORMAT`]
    #[serde(rename = "ScrapedOn")]
    pub scraped_on: String,
}

/// Returns the current UTC time formatted for the `scraped_on` field
pub fn scrape_timestamp() -> String {
    Utc::now().format(SCRAPED_ON_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> JobRecord {
        JobRecord {
            domain: "ZipRecruiter".to_string(),
            post_url: "https://www.ziprecruiter.in/jobs/engineer-1".to_string(),
            job_id: String::new(),
            title: "Platform Engineer".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            speciality: String::new(),
            job_type: "FULL_TIME".to_string(),
            job_details: "Build things.".to_string(),
            industry: String::new(),
            company: "Acme".to_string(),
            posted_on: "2024-05-01".to_string(),
            salary_from: String::new(),
            salary_upto: String::new(),
            payout_term: String::new(),
            is_estimated_salary: false,
            scraped_on: scrape_timestamp(),
        }
    }

    #[test]
    fn test_serializes_with_export_column_names() {
        let value = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(value["Domain"], "ZipRecruiter");
        assert_eq!(value["PostUrl"], "https://www.ziprecruiter.in/jobs/engineer-1");
        assert_eq!(value["Title"], "Platform Engineer");
        assert_eq!(value["JobID"], "");
        assert_eq!(value["IsEstimatedSalary"], false);
    }

    #[test]
    fn test_scrape_timestamp_format() {
        let ts = scrape_timestamp();
        // e.g. "2024-05-01 12:34:56"
        assert_eq!(ts.len(), 19);
        assert_eq!(ts.as_bytes()[4], b'-');
        assert_eq!(ts.as_bytes()[10], b' ');
        assert_eq!(ts.as_bytes()[13], b':');
    }
}
