//! SurrealDB implementation of the storage traits.

mod base;
mod profile_memory;
mod query;
pub mod schema;
mod user;

pub use base::SurrealStorage;

use crate::config::{StorageConfig, StorageEngine};
use crate::storage::errors::StorageError;
use surrealdb::{RecordId, Surreal};

/// Storage over an embedded engine
pub type EmbeddedStorage = SurrealStorage<surrealdb::engine::local::Db>;

/// Open an embedded database as configured.
pub async fn create_embedded_storage(config: &StorageConfig) -> Result<EmbeddedStorage, StorageError> {
    let client = match config.engine {
        StorageEngine::Memory => {
            tracing::info!("Creating in-memory SurrealDB store");
            Surreal::new::<surrealdb::engine::local::Mem>(())
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create memory client: {}", e))
                })?
        }
        StorageEngine::RocksDb => {
            let path = config.database_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let path = path.to_string_lossy().to_string();
            tracing::info!("Creating RocksDB store at {}", path);
            Surreal::new::<surrealdb::engine::local::RocksDb>(&path)
                .await
                .map_err(|e| {
                    StorageError::Connection(format!("Failed to create RocksDB client: {}", e))
                })?
        }
    };

    SurrealStorage::new(client, &config.namespace, &config.database).await
}

/// Key part of a record id without SurrealDB's escaping.
///
/// Depending on the SurrealDB release, non-simple keys render as `⟨key⟩`
/// or as `` `key` ``.
pub(crate) fn record_key(id: &RecordId) -> String {
    let key = id.key().to_string();
    unescape_key(&key).to_string()
}

fn unescape_key(key: &str) -> &str {
    [('⟨', '⟩'), ('`', '`')]
        .iter()
        .find_map(|(open, close)| key.strip_prefix(*open)?.strip_suffix(*close))
        .unwrap_or(key)
}

/// Row shape of `SELECT count() AS total ... GROUP ALL`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub total: usize,
}

pub(crate) fn query_error(action: &str) -> impl Fn(surrealdb::Error) -> StorageError + '_ {
    move |e| StorageError::Query(format!("Failed to {}: {}", action, e))
}
