use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::Deserialize;

/// Namespace holding Wikidata items.
pub const MAIN_NAMESPACE: i64 = 0;

/// Inclusive UTC window a report covers. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// The whole calendar month, from the 1st at 00:00:00 to its last day at 23:59:59.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Self::days(first, last)
    }

    /// From 00:00:00 on `start` through 23:59:59 on `end`. `None` when `end` precedes `start`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self {
            start: start.and_hms_opt(0, 0, 0)?.and_utc(),
            end: end.and_hms_opt(23, 59, 59)?.and_utc(),
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }
}

/// Timestamp form accepted by `ucstart`/`ucend`.
pub fn api_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// One entry of a `list=usercontribs` response (formatversion 2).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionRecord {
    #[serde(rename = "ns")]
    pub namespace: i64,
    pub title: String,
    #[serde(rename = "parentid", default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub revid: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ContributionRecord {
    pub fn new(namespace: i64, title: impl Into<String>, parent_id: u64) -> Self {
        Self {
            namespace,
            title: title.into(),
            parent_id: Some(parent_id),
            revid: None,
            timestamp: None,
        }
    }

    /// A revision with no parent is the one that created the page.
    pub fn is_creation(&self) -> bool {
        self.parent_id == Some(0)
    }

    pub fn is_main_namespace(&self) -> bool {
        self.namespace == MAIN_NAMESPACE
    }
}
