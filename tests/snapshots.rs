use caldex::{
    db,
    queries::snapshots::{entries_by_category, get_snapshot, upsert_snapshot},
    types::{Category, Entry, Snapshot},
};
use libsql::{Builder, Connection};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

async fn test_db() -> Connection {
    let database = Builder::new_local(":memory:").build().await.unwrap();
    let conn = database.connect().unwrap();
    db::migrate_db(conn.clone()).await.unwrap();
    conn
}

fn entry(category: Category, title: &str, url: &str, observed_at: OffsetDateTime) -> Entry {
    Entry {
        category,
        title: title.into(),
        url: url.into(),
        description: None,
        observed_at,
    }
}

fn snapshot(day: Date, entries: Vec<Entry>, captured_at: OffsetDateTime) -> Snapshot {
    Snapshot {
        date: day,
        entries,
        captured_at,
    }
}

#[tokio::test]
async fn upsert_then_get_roundtrips() {
    let conn = test_db().await;
    let captured = datetime!(2025-03-01 00:00:05 UTC);
    let stored = snapshot(
        date!(2025 - 03 - 01),
        vec![entry(
            Category::AgeOrZodiac,
            "만나이 계산기",
            "https://superkts.com/age-calc",
            captured,
        )],
        captured,
    );

    upsert_snapshot(conn.clone(), &stored).await.unwrap();

    let loaded = get_snapshot(conn, Some(date!(2025 - 03 - 01)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.date, stored.date);
    assert_eq!(loaded.captured_at, captured);
    assert_eq!(loaded.entries, stored.entries);
}

#[tokio::test]
async fn second_upsert_for_same_date_overwrites() {
    let conn = test_db().await;
    let day = date!(2025 - 03 - 02);
    let first_captured = datetime!(2025-03-02 00:00:05 UTC);
    let second_captured = datetime!(2025-03-02 09:30:00 UTC);

    let first = snapshot(
        day,
        vec![entry(Category::Other, "old", "https://superkts.com/old", first_captured)],
        first_captured,
    );
    let second = snapshot(
        day,
        vec![
            entry(Category::Statistics, "로또 통계", "https://superkts.com/cal/stats", second_captured),
            entry(Category::Other, "new", "https://superkts.com/new", second_captured),
        ],
        second_captured,
    );

    upsert_snapshot(conn.clone(), &first).await.unwrap();
    upsert_snapshot(conn.clone(), &second).await.unwrap();

    // Exactly one row for the day, holding the second call's entries.
    let mut rows = conn
        .query("SELECT COUNT(*) FROM snapshots", libsql::params!())
        .await
        .unwrap();
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row.get::<i64>(0).unwrap(), 1);

    let loaded = get_snapshot(conn, Some(day)).await.unwrap().unwrap();
    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.entries[1].title, "new");
    assert_eq!(loaded.captured_at, second_captured);
}

#[tokio::test]
async fn no_date_returns_most_recent() {
    let conn = test_db().await;
    for day in [date!(2025 - 02 - 27), date!(2025 - 03 - 01), date!(2025 - 02 - 28)] {
        let captured = day.midnight().assume_utc();
        upsert_snapshot(conn.clone(), &snapshot(day, Vec::new(), captured))
            .await
            .unwrap();
    }

    let latest = get_snapshot(conn, None).await.unwrap().unwrap();
    assert_eq!(latest.date, date!(2025 - 03 - 01));
}

#[tokio::test]
async fn missing_date_and_empty_store_return_none() {
    let conn = test_db().await;
    assert!(get_snapshot(conn.clone(), None).await.unwrap().is_none());

    let captured = datetime!(2025-03-01 00:00:05 UTC);
    upsert_snapshot(
        conn.clone(),
        &snapshot(date!(2025 - 03 - 01), Vec::new(), captured),
    )
    .await
    .unwrap();

    assert!(
        get_snapshot(conn, Some(date!(2025 - 03 - 02)))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn entries_by_category_filters_most_recent_snapshot() {
    let conn = test_db().await;
    let captured = datetime!(2025-03-01 00:00:05 UTC);
    let stored = snapshot(
        date!(2025 - 03 - 01),
        vec![
            entry(Category::AgeOrZodiac, "만나이", "https://superkts.com/a", captured),
            entry(Category::Statistics, "로또 통계", "https://superkts.com/b", captured),
            entry(Category::AgeOrZodiac, "띠 계산", "https://superkts.com/c", captured),
        ],
        captured,
    );
    upsert_snapshot(conn.clone(), &stored).await.unwrap();

    let age = entries_by_category(conn.clone(), Category::AgeOrZodiac)
        .await
        .unwrap();
    assert_eq!(age.len(), 2);
    assert!(age.iter().all(|e| e.category == Category::AgeOrZodiac));

    let dates = entries_by_category(conn, Category::DateRelated).await.unwrap();
    assert!(dates.is_empty());
}

#[tokio::test]
async fn entries_by_category_empty_when_store_empty() {
    let conn = test_db().await;
    let entries = entries_by_category(conn, Category::Other).await.unwrap();
    assert!(entries.is_empty());
}
