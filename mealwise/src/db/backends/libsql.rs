use crate::db::connection::Database;
use crate::db::repository::CollectionRepository;
use crate::db::traits::{Collection, CollectionStore, DatabaseBackend};
use crate::error::Result;
use async_trait::async_trait;

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CollectionStore for LibSqlBackend {
    async fn get(&self, collection: Collection) -> Result<Option<String>> {
        let conn = self.db.connect()?;
        CollectionRepository::get(&conn, collection).await
    }
    async fn set(&self, collection: Collection, value: &str) -> Result<()> {
        let conn = self.db.connect()?;
        CollectionRepository::set(&conn, collection, value).await
    }
    async fn remove(&self, collection: Collection) -> Result<bool> {
        let conn = self.db.connect()?;
        CollectionRepository::remove(&conn, collection).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn ping(&self) -> Result<()> {
        self.db.ping().await
    }
}
