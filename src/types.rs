use std::{fmt, str::FromStr};

use actix_web::web;
use libsql::Database;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::guard::RunGuard;

/// Calendar-date key format used everywhere a date crosses a boundary
/// (db column, query param, JSON).
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

// DB Types

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AgeOrZodiac,
    DateRelated,
    Statistics,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::AgeOrZodiac => "age_or_zodiac",
            Category::DateRelated => "date_related",
            Category::Statistics => "statistics",
            Category::Other => "other",
        })
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "age_or_zodiac" => Ok(Category::AgeOrZodiac),
            "date_related" => Ok(Category::DateRelated),
            "statistics" => Ok(Category::Statistics),
            "other" => Ok(Category::Other),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// One classified link within a snapshot. Identity inside a single
/// crawl is the (title, url) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub category: Category,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub observed_at: OffsetDateTime,
}

/// One calendar day's captured link set. At most one exists per date;
/// a repeat crawl on the same date replaces `entries` and `captured_at`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: Date,
    pub entries: Vec<Entry>,
    pub captured_at: OffsetDateTime,
}

// Server Types

#[derive(Serialize)]
pub struct CrawlSummary {
    pub snapshot_date: Date,
    pub entry_count: usize,
    pub captured_at: OffsetDateTime,
}

#[derive(Serialize)]
pub struct CrawlAccepted {
    pub success: bool,
    #[serde(flatten)]
    pub summary: CrawlSummary,
}

#[derive(Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

pub struct AppState {
    pub db: Database,
    pub crawl_guard: RunGuard,
}

pub type AppData = web::Data<AppState>;

// Errors

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("unexpected status: {0}")]
    Http(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] libsql::Error),
    #[error("snapshot could not be encoded: {0}")]
    Encode(String),
    #[error("stored snapshot could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("a crawl is already running")]
    AlreadyRunning,
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
}
