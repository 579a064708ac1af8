//! Persistence for users, queries, results and profile memory.
//!
//! Storage is embedded SurrealDB: the in-memory engine for tests and
//! development, RocksDB on disk otherwise.

pub mod errors;
pub mod filters;
pub mod models;
pub mod surreal_storage;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use filters::{Page, Pagination, QueryFilter};
pub use models::{PredictionResult, ProfileMemory, UserProfile, UserQuery, UserRole};
pub use traits::{BaseStore, LifeallyStore, ProfileMemoryStore, QueryStore, UserStore};

use crate::config::StorageConfig;
use std::sync::Arc;

/// Open the store described by `config`.
pub async fn create_storage_service(
    config: &StorageConfig,
) -> Result<Arc<dyn LifeallyStore>, StorageError> {
    let storage = surreal_storage::create_embedded_storage(config).await?;
    Ok(Arc::new(storage))
}
