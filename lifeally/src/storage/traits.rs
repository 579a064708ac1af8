//! Trait definitions for storage components

use async_trait::async_trait;
use std::fmt::Debug;

use crate::pipeline::Profile;
use crate::storage::errors::StorageError;
use crate::storage::filters::{Page, Pagination, QueryFilter};
use crate::storage::models::{PredictionResult, ProfileMemory, UserProfile, UserQuery};

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> Result<(), StorageError>;

    /// Get metadata about the store
    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> Result<(), StorageError>;
}

/// User accounts
#[async_trait]
pub trait UserStore: BaseStore {
    /// Create a user; `AlreadyExists` if the email is taken
    async fn create_user(&self, user: UserProfile) -> Result<UserProfile, StorageError>;

    async fn get_user(&self, id: &str) -> Result<Option<UserProfile>, StorageError>;

    /// Look up by (already normalised) email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StorageError>;

    /// Newest first
    async fn list_users(&self, pagination: Pagination) -> Result<Page<UserProfile>, StorageError>;

    async fn update_user(&self, user: UserProfile) -> Result<UserProfile, StorageError>;

    /// Delete a user with their queries, results and profile memories.
    /// Returns `false` if the user did not exist.
    async fn delete_user(&self, id: &str) -> Result<bool, StorageError>;
}

/// Stored queries and their results
#[async_trait]
pub trait QueryStore: BaseStore {
    async fn create_query(&self, query: UserQuery) -> Result<UserQuery, StorageError>;

    async fn get_query(&self, id: &str) -> Result<Option<UserQuery>, StorageError>;

    /// Newest first
    async fn list_queries(
        &self,
        filter: QueryFilter,
        pagination: Pagination,
    ) -> Result<Page<UserQuery>, StorageError>;

    async fn create_result(&self, result: PredictionResult) -> Result<PredictionResult, StorageError>;

    /// Oldest first
    async fn list_results(&self, query_id: &str) -> Result<Vec<PredictionResult>, StorageError>;

    async fn latest_result(&self, query_id: &str) -> Result<Option<PredictionResult>, StorageError>;
}

/// Per-(user, domain) profile memory
#[async_trait]
pub trait ProfileMemoryStore: BaseStore {
    async fn get_profile_memory(
        &self,
        user_id: &str,
        domain: &str,
    ) -> Result<Option<ProfileMemory>, StorageError>;

    /// Insert or replace the profile for (user, domain)
    async fn upsert_profile_memory(
        &self,
        user_id: &str,
        domain: &str,
        profile: &Profile,
    ) -> Result<ProfileMemory, StorageError>;
}

/// Everything the service needs from storage
pub trait LifeallyStore: UserStore + QueryStore + ProfileMemoryStore {}

impl<T> LifeallyStore for T where T: UserStore + QueryStore + ProfileMemoryStore {}
