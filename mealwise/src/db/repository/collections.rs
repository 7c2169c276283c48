use crate::db::traits::Collection;
use crate::error::Result;
use chrono::Utc;
use libsql::Connection;

pub struct CollectionRepository;

impl CollectionRepository {
    pub async fn get(conn: &Connection, collection: Collection) -> Result<Option<String>> {
        let mut rows = conn
            .query(
                "SELECT value FROM collections WHERE key = ?",
                [collection.key()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(row.get::<String>(0)?))
        } else {
            Ok(None)
        }
    }

    pub async fn set(conn: &Connection, collection: Collection, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO collections (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [collection.key(), value, &now],
        )
        .await?;
        Ok(())
    }

    pub async fn remove(conn: &Connection, collection: Collection) -> Result<bool> {
        let affected = conn
            .execute("DELETE FROM collections WHERE key = ?", [collection.key()])
            .await?;
        Ok(affected > 0)
    }
}
