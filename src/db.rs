use std::env;

use libsql::{Builder, Connection, Database, OpenFlags};

pub async fn get_database() -> Database {
    let use_local = env::var("USE_LOCAL").unwrap_or("false".into());
    if use_local == "false" {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let auth_key = env::var("DATABASE_AUTH_KEY").expect("DATABASE_AUTH_KEY must be set");
        Builder::new_remote(database_url, auth_key)
            .build()
            .await
            .unwrap()
    } else {
        Builder::new_local(env::var("LOCAL_DB_URL").expect("LOCAL_DB_URL must be set"))
            .flags(OpenFlags::default())
            .build()
            .await
            .unwrap()
    }
}

pub const SNAPSHOTS_T: &str = "snapshots";

async fn v1(conn: Connection) -> anyhow::Result<()> {
    // Uniqueness on `date` backs the insert-or-replace contract of the store.
    #[rustfmt::skip]
    let stmnts = [
        format!(
            "CREATE TABLE IF NOT EXISTS `{SNAPSHOTS_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `date` TEXT NOT NULL UNIQUE,
                `entries` TEXT NOT NULL,
                `captured_at` TEXT NOT NULL
            )"
        ),
        format!("CREATE INDEX IF NOT EXISTS idx_date ON {SNAPSHOTS_T} (date)"),
    ];

    conn.execute_transactional_batch(&stmnts.join(";\n")).await?;

    Ok(())
}

pub async fn migrate_db(conn: Connection) -> anyhow::Result<()> {
    v1(conn).await
}
