//! User storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, RecordId};

use super::base::SurrealStorage;
use super::{CountRow, query_error, record_key};
use crate::storage::errors::StorageError;
use crate::storage::filters::{Page, Pagination};
use crate::storage::models::UserProfile;
use crate::storage::traits::UserStore;

#[derive(Debug, Deserialize)]
struct SurrealUser {
    id: RecordId,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

/// Fields written on create; `created_at` comes from the schema default
#[derive(Debug, Serialize)]
struct CreateUser {
    name: String,
    email: String,
    password_hash: String,
    role: &'static str,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: RecordId,
}

impl From<SurrealUser> for UserProfile {
    fn from(user: SurrealUser) -> Self {
        Self {
            id: record_key(&user.id),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.parse().unwrap_or_default(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[async_trait]
impl<C> UserStore for SurrealStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_user(&self, user: UserProfile) -> Result<UserProfile, StorageError> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {} already exists",
                user.email
            )));
        }

        let content = CreateUser {
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.as_str(),
            is_active: user.is_active,
        };

        let created: Option<SurrealUser> = self
            .client
            .create(("user", user.id.as_str()))
            .content(content)
            .await
            .map_err(|e| {
                let message = e.to_string();
                if message.contains("already contains") {
                    StorageError::AlreadyExists(format!("User already exists: {}", message))
                } else {
                    StorageError::Query(format!("Failed to create user: {}", message))
                }
            })?;

        created
            .map(UserProfile::from)
            .ok_or_else(|| StorageError::Internal("No user created".to_string()))
    }

    async fn get_user(&self, id: &str) -> Result<Option<UserProfile>, StorageError> {
        let user: Option<SurrealUser> = self
            .client
            .select(("user", id))
            .await
            .map_err(query_error("get user"))?;

        Ok(user.map(UserProfile::from))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StorageError> {
        let mut response = self
            .client
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await
            .map_err(query_error("get user by email"))?;

        let user: Option<SurrealUser> = response.take(0).map_err(query_error("read user"))?;
        Ok(user.map(UserProfile::from))
    }

    async fn list_users(&self, pagination: Pagination) -> Result<Page<UserProfile>, StorageError> {
        let query = format!(
            "SELECT * FROM user ORDER BY created_at DESC LIMIT {} START {}; \
             SELECT count() AS total FROM user GROUP ALL;",
            pagination.per_page,
            pagination.offset()
        );

        let mut response = self
            .client
            .query(query)
            .await
            .map_err(query_error("list users"))?;

        let users: Vec<SurrealUser> = response.take(0).map_err(query_error("read users"))?;
        let total: Option<CountRow> = response.take(1).map_err(query_error("count users"))?;

        Ok(Page::new(
            users.into_iter().map(UserProfile::from).collect(),
            total.map(|row| row.total).unwrap_or(0),
            pagination,
        ))
    }

    async fn update_user(&self, user: UserProfile) -> Result<UserProfile, StorageError> {
        let update_query = r#"
            UPDATE $record_id MERGE {
                name: $name,
                email: $email,
                password_hash: $password_hash,
                role: $role,
                is_active: $is_active
            }
        "#;

        let mut response = self
            .client
            .query(update_query)
            .bind(("record_id", RecordId::from(("user", user.id.as_str()))))
            .bind(("name", user.name.clone()))
            .bind(("email", user.email.clone()))
            .bind(("password_hash", user.password_hash.clone()))
            .bind(("role", user.role.as_str()))
            .bind(("is_active", user.is_active))
            .await
            .map_err(query_error("update user"))?;

        let updated: Option<SurrealUser> =
            response.take(0).map_err(query_error("read updated user"))?;

        updated
            .map(UserProfile::from)
            .ok_or_else(|| StorageError::NotFound(format!("User with id {} not found", user.id)))
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StorageError> {
        if self.get_user(id).await?.is_none() {
            return Ok(false);
        }

        let mut response = self
            .client
            .query("SELECT id FROM user_query WHERE user_id = $user_id")
            .bind(("user_id", id.to_string()))
            .await
            .map_err(query_error("find user queries"))?;
        let rows: Vec<IdRow> = response.take(0).map_err(query_error("read user queries"))?;
        let query_ids: Vec<String> = rows.iter().map(|row| record_key(&row.id)).collect();

        let cascade = r#"
            DELETE prediction_result WHERE query_id IN $query_ids;
            DELETE user_query WHERE user_id = $user_id;
            DELETE profile_memory WHERE user_id = $user_id;
            DELETE $record_id;
        "#;

        self.client
            .query(cascade)
            .bind(("query_ids", query_ids.clone()))
            .bind(("user_id", id.to_string()))
            .bind(("record_id", RecordId::from(("user", id))))
            .await
            .map_err(query_error("delete user"))?
            .check()
            .map_err(query_error("delete user"))?;

        tracing::debug!(user_id = id, queries = query_ids.len(), "Deleted user and related records");
        Ok(true)
    }
}
