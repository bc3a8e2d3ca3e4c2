//! ZipRecruiter page extraction
//!
//! Listing pages carry their job links as `a.jobList-title` anchors and the
//! pagination control as an `a[rel="next"]` anchor whose text is the next
//! page number. Detail pages embed a schema.org JobPosting block in a
//! `script[type="application/ld+json"]` tag; that block is the only source
//! of record fields.

use crate::extract::{ExtractionError, ListingPage, PageExtractor, PageToken};
use crate::record::{scrape_timestamp, JobRecord};
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

/// Site name recorded in every JobRecord
pub const SOURCE_DOMAIN: &str = "ZipRecruiter";

/// Extractor for ZipRecruiter listing and detail pages
pub struct ZipRecruiterExtractor;

impl ZipRecruiterExtractor {
    fn selector(css: &'static str) -> Result<Selector, ExtractionError> {
        Selector::parse(css).map_err(|e| ExtractionError::Selector(format!("{}: {:?}", css, e)))
    }
}

impl PageExtractor for ZipRecruiterExtractor {
    fn extract_listing(
        &self,
        html: &str,
        page_url: &Url,
    ) -> Result<ListingPage, ExtractionError> {
        let document = Html::parse_document(html);
        let link_selector = Self::selector("a.jobList-title")?;
        let next_selector = Self::selector("a[rel='next']")?;

        let mut links = Vec::new();
        for element in document.select(&link_selector) {
            if let Some(href) = element.value().attr("href") {
                match page_url.join(href) {
                    Ok(resolved) => links.push(resolved.to_string()),
                    Err(e) => {
                        tracing::debug!("Skipping unresolvable link '{}': {}", href, e);
                    }
                }
            }
        }

        // The next-page anchor's text is the page number. A label that does
        // not parse ends the walk rather than failing the page, so the links
        // above are still harvested.
        let next_page = document.select(&next_selector).next().and_then(|element| {
            let label = element.text().collect::<String>();
            let label = label.trim();
            match label.parse::<u32>() {
                Ok(number) => Some(PageToken(number)),
                Err(_) => {
                    tracing::warn!(
                        "Next-page label '{}' is not a page number, ending pagination",
                        label
                    );
                    None
                }
            }
        });

        Ok(ListingPage { links, next_page })
    }

    fn extract_detail(&self, html: &str, page_url: &str) -> Result<JobRecord, ExtractionError> {
        let document = Html::parse_document(html);
        let json_selector = Self::selector("script[type='application/ld+json']")?;

        let block = document
            .select(&json_selector)
            .next()
            .ok_or(ExtractionError::MissingStructuredData)?;
        let raw = block.text().collect::<String>();
        let data: Value = serde_json::from_str(&raw)?;

        let title = required_str(&data, &["title"], "title")?;
        let city = required_str(
            &data,
            &["jobLocation", "address", "addressLocality"],
            "jobLocation.address.addressLocality",
        )?;
        let state = required_str(
            &data,
            &["jobLocation", "address", "addressRegion"],
            "jobLocation.address.addressRegion",
        )?;
        let job_type = required_str(&data, &["employmentType"], "employmentType")?;
        let description = required_str(&data, &["description"], "description")?;
        let company = required_str(
            &data,
            &["hiringOrganization", "name"],
            "hiringOrganization.name",
        )?;
        let posted_on = required_str(&data, &["datePosted"], "datePosted")?;

        // Job ID, speciality, industry, and the salary fields are not
        // present in the structured data; they stay at their empty
        // sentinels.
        Ok(JobRecord {
            domain: SOURCE_DOMAIN.to_string(),
            post_url: page_url.to_string(),
            job_id: String::new(),
            title: title.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            speciality: String::new(),
            job_type: job_type.to_string(),
            job_details: flatten_html(description),
            industry: String::new(),
            company: company.to_string(),
            posted_on: posted_on.to_string(),
            salary_from: String::new(),
            salary_upto: String::new(),
            payout_term: String::new(),
            is_estimated_salary: false,
            scraped_on: scrape_timestamp(),
        })
    }
}

/// Walks `path` through nested JSON objects and returns the string at the end
fn required_str<'a>(
    data: &'a Value,
    path: &[&str],
    name: &'static str,
) -> Result<&'a str, ExtractionError> {
    let mut value = data;
    for key in path {
        value = value.get(key).ok_or(ExtractionError::MissingField(name))?;
    }
    value.as_str().ok_or(ExtractionError::MissingField(name))
}

/// Flattens an HTML fragment (the published description) to trimmed text
fn flatten_html(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    parsed
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}
