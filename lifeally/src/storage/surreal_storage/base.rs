//! Base SurrealDB storage

use async_trait::async_trait;
use surrealdb::{Connection, Surreal};

use super::{CountRow, query_error};
use crate::storage::errors::StorageError;
use crate::storage::traits::BaseStore;

const TABLES: [&str; 4] = ["user", "user_query", "prediction_result", "profile_memory"];

/// Storage backed by a SurrealDB client
#[derive(Debug, Clone)]
pub struct SurrealStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) client: Surreal<C>,
}

impl<C> SurrealStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Select namespace/database and make sure the schema exists
    pub async fn new(
        client: Surreal<C>,
        namespace: &str,
        database: &str,
    ) -> Result<Self, StorageError> {
        client.use_ns(namespace).use_db(database).await.map_err(|e| {
            StorageError::Connection(format!("Failed to set namespace/database: {}", e))
        })?;

        super::schema::initialize_schema(&client).await?;

        Ok(Self { client })
    }

    /// Get the underlying client for advanced operations
    pub fn client(&self) -> &Surreal<C> {
        &self.client
    }

    pub(crate) async fn count_table(&self, table: &str) -> Result<usize, StorageError> {
        let mut response = self
            .client
            .query(format!("SELECT count() AS total FROM {} GROUP ALL", table))
            .await
            .map_err(query_error("count records"))?;

        let row: Option<CountRow> = response.take(0).map_err(query_error("read count"))?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }
}

#[async_trait]
impl<C> BaseStore for SurrealStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn health_check(&self) -> Result<bool, StorageError> {
        Ok(self.client.query("RETURN true").await.is_ok())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let statements: String = TABLES
            .iter()
            .map(|table| format!("DELETE {};", table))
            .collect();

        self.client
            .query(statements)
            .await
            .map_err(query_error("clear storage"))?
            .check()
            .map_err(query_error("clear storage"))?;
        Ok(())
    }

    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError> {
        let mut counts = serde_json::Map::new();
        for table in TABLES {
            counts.insert(table.to_string(), self.count_table(table).await?.into());
        }

        Ok(serde_json::json!({
            "type": "surrealdb",
            "records": counts,
        }))
    }

    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
