//! Schema initialization

use crate::storage::errors::StorageError;
use surrealdb::{Connection, Surreal};

const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS user SCHEMAFULL
        COMMENT "Registered accounts";
    DEFINE FIELD IF NOT EXISTS name ON user TYPE string;
    DEFINE FIELD IF NOT EXISTS email ON user TYPE string;
    DEFINE FIELD IF NOT EXISTS password_hash ON user TYPE string;
    DEFINE FIELD IF NOT EXISTS role ON user TYPE string DEFAULT "user"
        ASSERT $value IN ["user", "admin"];
    DEFINE FIELD IF NOT EXISTS is_active ON user TYPE bool DEFAULT true;
    DEFINE FIELD IF NOT EXISTS created_at ON user TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS user_email_idx ON user FIELDS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS user_created_at_idx ON user FIELDS created_at;

    DEFINE TABLE IF NOT EXISTS user_query SCHEMAFULL
        COMMENT "Questions asked through the pipeline";
    DEFINE FIELD IF NOT EXISTS user_id ON user_query TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS domain ON user_query TYPE string;
    DEFINE FIELD IF NOT EXISTS query_text ON user_query TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON user_query TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS user_query_user_idx ON user_query FIELDS user_id;
    DEFINE INDEX IF NOT EXISTS user_query_domain_idx ON user_query FIELDS domain;

    DEFINE TABLE IF NOT EXISTS prediction_result SCHEMAFULL
        COMMENT "Advice produced for a query";
    DEFINE FIELD IF NOT EXISTS query_id ON prediction_result TYPE string;
    DEFINE FIELD IF NOT EXISTS result_text ON prediction_result TYPE string;
    DEFINE FIELD IF NOT EXISTS created_at ON prediction_result TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS prediction_result_query_idx ON prediction_result FIELDS query_id;

    DEFINE TABLE IF NOT EXISTS profile_memory SCHEMALESS
        COMMENT "Known feature values per user and domain";
    DEFINE FIELD IF NOT EXISTS user_id ON profile_memory TYPE string;
    DEFINE FIELD IF NOT EXISTS domain ON profile_memory TYPE string;
    DEFINE FIELD IF NOT EXISTS profile ON profile_memory TYPE object DEFAULT {};
    DEFINE FIELD IF NOT EXISTS updated_at ON profile_memory TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS profile_memory_user_domain_idx ON profile_memory FIELDS user_id, domain UNIQUE;
"#;

/// Define every table, field and index. Safe to run on every start.
pub async fn initialize_schema<C>(client: &Surreal<C>) -> Result<(), StorageError>
where
    C: Connection,
{
    client
        .query(SCHEMA)
        .await
        .map_err(|e| StorageError::Query(format!("Failed to initialize schema: {}", e)))?
        .check()
        .map_err(|e| StorageError::Query(format!("Schema definition failed: {}", e)))?;

    tracing::debug!("Storage schema initialized");
    Ok(())
}
