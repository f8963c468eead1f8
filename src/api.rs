use serde::Deserialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

use crate::domain::{api_timestamp, ContributionRecord, DateRange};
use crate::error::FetchError;

/// Largest `uclimit` an unprivileged client may request.
pub const PAGE_LIMIT: u32 = 500;
const CONTRIB_PROPS: &str = "title|timestamp|flags|comment|parsedcomment|ids";
const USER_AGENT: &str = concat!("wikidata-stats/", env!("CARGO_PKG_VERSION"));

/// Transport seam for the fetch loop, so pagination can be driven without a network.
pub trait HttpClient {
    /// Perform a GET with the given query string and return the response body.
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError>;
}

/// Blocking reqwest client used by the binary.
#[derive(Debug)]
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, FetchError> {
        let inner = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let response = self.inner.get(url).query(query).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    error: Option<ApiErrorBody>,
    #[serde(default)]
    warnings: Option<Value>,
    #[serde(default)]
    query: Option<UserContribs>,
    #[serde(rename = "continue", default)]
    continuation: Option<Continuation>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct UserContribs {
    #[serde(default)]
    usercontribs: Vec<ContributionRecord>,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    #[serde(default)]
    uccontinue: Option<String>,
}

/// One decoded page: its records and the token for the next one, if any.
#[derive(Debug)]
struct Page {
    records: Vec<ContributionRecord>,
    next: Option<String>,
}

fn base_query(username: &str, range: &DateRange) -> Vec<(&'static str, String)> {
    vec![
        ("action", "query".to_string()),
        ("format", "json".to_string()),
        ("formatversion", "2".to_string()),
        ("list", "usercontribs".to_string()),
        ("ucuser", username.to_string()),
        ("uclimit", PAGE_LIMIT.to_string()),
        ("ucprop", CONTRIB_PROPS.to_string()),
        ("ucdir", "newer".to_string()),
        ("ucstart", api_timestamp(range.start())),
        ("ucend", api_timestamp(range.end())),
    ]
}

fn decode_page(body: &str) -> Result<Page, FetchError> {
    let response: ApiResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(FetchError::Api {
            code: error.code,
            info: error.info,
        });
    }

    if let Some(warnings) = response.warnings {
        warn!(
            action = "decode",
            component = "usercontribs",
            warnings = %warnings,
            "API returned warnings"
        );
    }

    let next = match response.continuation {
        Some(continuation) => Some(
            continuation
                .uccontinue
                .ok_or(FetchError::MissingContinuation)?,
        ),
        None => None,
    };

    Ok(Page {
        records: response.query.map(|q| q.usercontribs).unwrap_or_default(),
        next,
    })
}

/// Fetch every contribution `username` made inside `range`, oldest first.
///
/// Pages are requested one after another until the API stops returning a
/// continuation token. Any failure discards what was gathered so far.
pub fn fetch_contributions(
    client: &impl HttpClient,
    endpoint: &str,
    username: &str,
    range: &DateRange,
) -> Result<Vec<ContributionRecord>, FetchError> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "contribution_fetch",
        username = username,
        endpoint = endpoint,
        "Fetching contributions"
    );

    let base = base_query(username, range);
    let mut contributions = Vec::new();
    let mut token: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        page_number += 1;
        let mut query = base.clone();
        if let Some(token) = &token {
            query.push(("uccontinue", token.clone()));
        }

        info!(
            action = "request",
            component = "contribution_fetch",
            page = page_number,
            continued = token.is_some(),
            "Requesting page"
        );
        let body = client.get(endpoint, &query)?;
        let page = decode_page(&body)?;

        let last_revid = page.records.last().and_then(|r| r.revid);
        let last_timestamp = page.records.last().and_then(|r| r.timestamp);
        contributions.extend(page.records);
        info!(
            action = "page",
            component = "contribution_fetch",
            page = page_number,
            total = contributions.len(),
            last_revid = ?last_revid,
            last_timestamp = ?last_timestamp,
            "Page received"
        );

        match page.next {
            Some(next) => {
                println!("  ...fetched {} contributions so far...", contributions.len());
                token = Some(next);
            }
            None => break,
        }
    }

    info!(
        action = "complete",
        component = "contribution_fetch",
        pages = page_number,
        contributions = contributions.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Contribution fetch completed"
    );
    Ok(contributions)
}
