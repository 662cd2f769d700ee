use libsql::{Connection, Row, params};
use time::{Date, OffsetDateTime};

use crate::{
    db::SNAPSHOTS_T,
    types::{Category, DATE_FORMAT, Entry, Snapshot, StoreError},
};

/// Insert the snapshot, or replace the existing row for the same date.
/// A single statement, so readers never observe a half-written day.
pub async fn upsert_snapshot(db: Connection, snapshot: &Snapshot) -> Result<(), StoreError> {
    let date = snapshot
        .date
        .format(&DATE_FORMAT)
        .map_err(|err| StoreError::Encode(err.to_string()))?;
    let entries = serde_json::to_string(&snapshot.entries)
        .map_err(|err| StoreError::Encode(err.to_string()))?;
    let captured_at = serde_json::to_string(&snapshot.captured_at)
        .map_err(|err| StoreError::Encode(err.to_string()))?;

    db.execute(
        &format!(
            "INSERT INTO {SNAPSHOTS_T} (date, entries, captured_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(date) DO UPDATE SET
                entries = excluded.entries,
                captured_at = excluded.captured_at"
        ),
        params![date, entries, captured_at],
    )
    .await?;

    Ok(())
}

/// Snapshot for a given date, or the most recent one when no date is given.
pub async fn get_snapshot(
    db: Connection,
    date: Option<Date>,
) -> Result<Option<Snapshot>, StoreError> {
    let mut result = match date {
        Some(date) => {
            let date = date
                .format(&DATE_FORMAT)
                .map_err(|err| StoreError::Encode(err.to_string()))?;
            db.query(
                &format!(
                    "SELECT date, entries, captured_at FROM {SNAPSHOTS_T} WHERE date = ?1"
                ),
                params![date],
            )
            .await?
        }
        None => {
            db.query(
                &format!(
                    "SELECT date, entries, captured_at FROM {SNAPSHOTS_T}
                    ORDER BY date DESC LIMIT 1"
                ),
                params!(),
            )
            .await?
        }
    };

    let Some(row) = result.next().await? else {
        return Ok(None);
    };

    snapshot_from_row(&row).map(Some)
}

/// Entries of the most recent snapshot filtered by category. Empty when the
/// store is empty or nothing matches.
pub async fn entries_by_category(
    db: Connection,
    category: Category,
) -> Result<Vec<Entry>, StoreError> {
    let Some(snapshot) = get_snapshot(db, None).await? else {
        return Ok(Vec::new());
    };

    Ok(snapshot
        .entries
        .into_iter()
        .filter(|entry| entry.category == category)
        .collect())
}

fn snapshot_from_row(row: &Row) -> Result<Snapshot, StoreError> {
    let date = Date::parse(row.get_str(0)?, &DATE_FORMAT)
        .map_err(|err| StoreError::Decode(err.to_string()))?;
    let entries: Vec<Entry> = serde_json::from_str(row.get_str(1)?)
        .map_err(|err| StoreError::Decode(err.to_string()))?;
    let captured_at: OffsetDateTime = serde_json::from_str(row.get_str(2)?)
        .map_err(|err| StoreError::Decode(err.to_string()))?;

    Ok(Snapshot {
        date,
        entries,
        captured_at,
    })
}
