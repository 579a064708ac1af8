//! Query and result storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, RecordId};

use super::base::SurrealStorage;
use super::{query_error, record_key};
use crate::storage::errors::StorageError;
use crate::storage::filters::{Page, Pagination, QueryFilter};
use crate::storage::models::{PredictionResult, UserQuery};
use crate::storage::traits::QueryStore;

#[derive(Debug, Deserialize)]
struct SurrealQuery {
    id: RecordId,
    user_id: Option<String>,
    domain: String,
    query_text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct CreateQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    domain: String,
    query_text: String,
}

#[derive(Debug, Deserialize)]
struct SurrealResult {
    id: RecordId,
    query_id: String,
    result_text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct CreateResult {
    query_id: String,
    result_text: String,
}

impl From<SurrealQuery> for UserQuery {
    fn from(query: SurrealQuery) -> Self {
        Self {
            id: record_key(&query.id),
            user_id: query.user_id,
            domain: query.domain,
            query_text: query.query_text,
            created_at: query.created_at,
        }
    }
}

impl From<SurrealResult> for PredictionResult {
    fn from(result: SurrealResult) -> Self {
        Self {
            id: record_key(&result.id),
            query_id: result.query_id,
            result_text: result.result_text,
            created_at: result.created_at,
        }
    }
}

#[async_trait]
impl<C> QueryStore for SurrealStorage<C>
where
    C: Connection + Clone + Send + Sync + std::fmt::Debug + 'static,
{
    async fn create_query(&self, query: UserQuery) -> Result<UserQuery, StorageError> {
        let content = CreateQuery {
            user_id: query.user_id,
            domain: query.domain,
            query_text: query.query_text,
        };

        let created: Option<SurrealQuery> = self
            .client
            .create(("user_query", query.id.as_str()))
            .content(content)
            .await
            .map_err(query_error("create query"))?;

        created
            .map(UserQuery::from)
            .ok_or_else(|| StorageError::Internal("No query created".to_string()))
    }

    async fn get_query(&self, id: &str) -> Result<Option<UserQuery>, StorageError> {
        let query: Option<SurrealQuery> = self
            .client
            .select(("user_query", id))
            .await
            .map_err(query_error("get query"))?;

        Ok(query.map(UserQuery::from))
    }

    async fn list_queries(
        &self,
        filter: QueryFilter,
        pagination: Pagination,
    ) -> Result<Page<UserQuery>, StorageError> {
        let mut conditions = Vec::new();
        if filter.domain.is_some() {
            conditions.push("domain = $domain");
        }
        if filter.user_id.is_some() {
            conditions.push("user_id = $user_id");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT * FROM user_query{where_clause} ORDER BY created_at DESC LIMIT {} START {}; \
             RETURN array::len((SELECT VALUE id FROM user_query{where_clause}));",
            pagination.per_page,
            pagination.offset()
        );

        let mut request = self.client.query(query);
        if let Some(domain) = filter.domain {
            request = request.bind(("domain", domain));
        }
        if let Some(user_id) = filter.user_id {
            request = request.bind(("user_id", user_id));
        }

        let mut response = request.await.map_err(query_error("list queries"))?;

        let queries: Vec<SurrealQuery> = response.take(0).map_err(query_error("read queries"))?;
        // GROUP ALL counts come back split per condition when filters are combined
        let total: Option<usize> = response.take(1).map_err(query_error("count queries"))?;

        Ok(Page::new(
            queries.into_iter().map(UserQuery::from).collect(),
            total.unwrap_or(0),
            pagination,
        ))
    }

    async fn create_result(&self, result: PredictionResult) -> Result<PredictionResult, StorageError> {
        let content = CreateResult {
            query_id: result.query_id,
            result_text: result.result_text,
        };

        let created: Option<SurrealResult> = self
            .client
            .create(("prediction_result", result.id.as_str()))
            .content(content)
            .await
            .map_err(query_error("create result"))?;

        created
            .map(PredictionResult::from)
            .ok_or_else(|| StorageError::Internal("No result created".to_string()))
    }

    async fn list_results(&self, query_id: &str) -> Result<Vec<PredictionResult>, StorageError> {
        let mut response = self
            .client
            .query("SELECT * FROM prediction_result WHERE query_id = $query_id ORDER BY created_at ASC")
            .bind(("query_id", query_id.to_string()))
            .await
            .map_err(query_error("list results"))?;

        let results: Vec<SurrealResult> = response.take(0).map_err(query_error("read results"))?;
        Ok(results.into_iter().map(PredictionResult::from).collect())
    }

    async fn latest_result(&self, query_id: &str) -> Result<Option<PredictionResult>, StorageError> {
        let mut response = self
            .client
            .query(
                "SELECT * FROM prediction_result WHERE query_id = $query_id \
                 ORDER BY created_at DESC LIMIT 1",
            )
            .bind(("query_id", query_id.to_string()))
            .await
            .map_err(query_error("get latest result"))?;

        let result: Option<SurrealResult> =
            response.take(0).map_err(query_error("read latest result"))?;
        Ok(result.map(PredictionResult::from))
    }
}
