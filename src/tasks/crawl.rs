use log::{error, info, warn};
use time::OffsetDateTime;

use crate::{
    crawler::{dedupe::dedupe, extract::extract, fetch},
    queries::snapshots::upsert_snapshot,
    types::{AppData, CrawlError, CrawlSummary, Snapshot, StoreError},
};

/// One full pipeline run: fetch, extract, dedupe, upsert. Fail-fast — any
/// error aborts the run and nothing is stored for it.
pub async fn run_crawl(data: &AppData) -> Result<CrawlSummary, CrawlError> {
    let Some(_permit) = data.crawl_guard.try_start() else {
        return Err(CrawlError::AlreadyRunning);
    };

    let started = OffsetDateTime::now_utc();
    info!("[Crawl] Started at {started}");

    let document = fetch::fetch_directory().await?;
    info!("[Crawl] Fetched {} bytes from {}", document.len(), fetch::SOURCE_URL);

    let entries = dedupe(extract(&document, started));
    info!("[Crawl] Extracted {} unique entries", entries.len());

    let snapshot = Snapshot {
        date: started.date(),
        entries,
        captured_at: started,
    };

    let db = data.db.connect().map_err(StoreError::Db)?;
    upsert_snapshot(db, &snapshot).await?;

    let finished = OffsetDateTime::now_utc();
    info!(
        "[Crawl] Stored snapshot for {} with {} entries, took {}",
        snapshot.date,
        snapshot.entries.len(),
        finished - started
    );

    Ok(CrawlSummary {
        snapshot_date: snapshot.date,
        entry_count: snapshot.entries.len(),
        captured_at: snapshot.captured_at,
    })
}

/// Timer entry point: outcome is only logged, never surfaced.
pub async fn scheduled_crawl(data: &AppData) {
    match run_crawl(data).await {
        Ok(summary) => {
            info!(
                "[Crawl] Scheduled run stored {} entries for {}",
                summary.entry_count, summary.snapshot_date
            );
        }
        Err(CrawlError::AlreadyRunning) => {
            warn!("[Crawl] Scheduled run skipped, a crawl is already in flight");
        }
        Err(err) => {
            error!("[Crawl] Scheduled run failed: {err}");
        }
    }
}
