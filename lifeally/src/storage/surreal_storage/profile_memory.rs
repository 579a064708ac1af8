//! Profile memory storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::{Connection, RecordId};

use super::base::SurrealStorage;
use super::{query_error, record_key};
use crate::pipeline::Profile;
use crate::storage::errors::StorageError;
use crate::storage::models::ProfileMemory;
use crate::storage::traits::ProfileMemoryStore;

#[derive(Debug, Deserialize)]
struct SurrealProfileMemory {
    id: RecordId,
    user_id: String,
    domain: String,
    #[serde(default)]
    profile: Profile,
    updated_at: DateTime<Utc>,
}

impl From<SurrealProfileMemory> for ProfileMemory {
    fn from(memory: SurrealProfileMemory) -> Self {
        Self {
            id: record_key(&memory.id),
            user_id: memory.user_id,
            domain: memory.domain,
            profile: memory.profile,
            updated_at: memory.updated_at,
        }
    }
}

/// One record per (user, domain)
fn memory_key(user_id: &str, domain: &str) -> String {
    format!("{}_{}", user_id, domain)
}

#[async_trait]
impl<C> ProfileMemoryStore for SurrealStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn get_profile_memory(
        &self,
        user_id: &str,
        domain: &str,
    ) -> Result<Option<ProfileMemory>, StorageError> {
        let memory: Option<SurrealProfileMemory> = self
            .client
            .select(("profile_memory", memory_key(user_id, domain)))
            .await
            .map_err(query_error("get profile memory"))?;

        Ok(memory.map(ProfileMemory::from))
    }

    async fn upsert_profile_memory(
        &self,
        user_id: &str,
        domain: &str,
        profile: &Profile,
    ) -> Result<ProfileMemory, StorageError> {
        let upsert_query = r#"
            UPSERT $record_id SET
                user_id = $user_id,
                domain = $domain,
                profile = $profile,
                updated_at = time::now()
        "#;

        let mut response = self
            .client
            .query(upsert_query)
            .bind((
                "record_id",
                RecordId::from(("profile_memory", memory_key(user_id, domain).as_str())),
            ))
            .bind(("user_id", user_id.to_string()))
            .bind(("domain", domain.to_string()))
            .bind(("profile", profile.clone()))
            .await
            .map_err(query_error("upsert profile memory"))?;

        let memory: Option<SurrealProfileMemory> =
            response.take(0).map_err(query_error("read profile memory"))?;

        memory.map(ProfileMemory::from).ok_or_else(|| {
            StorageError::Internal(format!(
                "Profile memory for user {} in {} was not stored",
                user_id, domain
            ))
        })
    }
}
