//! Data Transfer Objects for the API

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use lifeally::service::PredictOutcome;
use lifeally::storage::{Pagination, UserProfile, UserQuery};

/// Characters of the latest advice shown in query listings
pub const RESULT_PREVIEW_CHARS: usize = 200;

/// Request to run the pipeline
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictRequestDto {
    /// One of career, finance, health, relationship
    pub domain: Option<String>,
    /// The user's question
    pub text: Option<String>,
    /// Known user; enables profile memory
    pub user_id: Option<String>,
}

/// Pipeline result as stored
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    pub query_id: String,
    pub prediction_id: String,
    pub result_text: String,
    pub model_version: String,
    /// Always null; models report no confidence
    pub confidence: Option<f64>,
    /// Feature values known after this run
    pub profile_memory: Option<BTreeMap<String, String>>,
}

impl From<PredictOutcome> for PredictResponse {
    fn from(outcome: PredictOutcome) -> Self {
        Self {
            query_id: outcome.query_id,
            prediction_id: outcome.prediction_id,
            result_text: outcome.result_text,
            model_version: outcome.model_version,
            confidence: outcome.confidence,
            profile_memory: outcome.profile_memory.map(|profile| profile.into_inner()),
        }
    }
}

/// User as shown to admins
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserDto {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Stored query with its owner and a preview of the latest advice
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryDto {
    pub id: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub domain: String,
    pub query_text: String,
    pub created_at: DateTime<Utc>,
    pub latest_result: Option<String>,
}

impl QueryDto {
    pub fn new(query: UserQuery, user_email: Option<String>, latest_result: Option<String>) -> Self {
        Self {
            id: query.id,
            user_id: query.user_id,
            user_email,
            domain: query.domain,
            query_text: query.query_text,
            created_at: query.created_at,
            latest_result: latest_result.map(|text| preview(&text)),
        }
    }
}

/// First [`RESULT_PREVIEW_CHARS`] characters of `text`
pub fn preview(text: &str) -> String {
    text.chars().take(RESULT_PREVIEW_CHARS).collect()
}

/// One page of users
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserPage {
    pub items: Vec<UserDto>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// One page of queries
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryPage {
    pub items: Vec<QueryDto>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Pagination parameters for list endpoints
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based)
    pub page: Option<usize>,
    /// Items per page (max 100)
    pub per_page: Option<usize>,
}

impl PaginationParams {
    pub fn to_pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }
}

/// Filters for the admin query listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct QueryListParams {
    /// Page number (1-based)
    pub page: Option<usize>,
    /// Items per page (max 100)
    pub per_page: Option<usize>,
    /// Only this domain
    pub domain: Option<String>,
    /// Only this user's queries
    pub user_id: Option<String>,
}

impl QueryListParams {
    pub fn to_pagination(&self) -> Pagination {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
        .to_pagination()
    }
}

/// Plain acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
