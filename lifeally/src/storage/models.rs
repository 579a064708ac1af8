//! Records kept in storage.

use crate::pipeline::Profile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    /// Unique, stored normalised
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// A question asked in a domain, optionally by a known user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserQuery {
    pub id: String,
    pub user_id: Option<String>,
    pub domain: String,
    pub query_text: String,
    pub created_at: DateTime<Utc>,
}

impl UserQuery {
    pub fn new(user_id: Option<String>, domain: impl Into<String>, query_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            domain: domain.into(),
            query_text: query_text.into(),
            created_at: Utc::now(),
        }
    }
}

/// The advice produced for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub id: String,
    pub query_id: String,
    pub result_text: String,
    pub created_at: DateTime<Utc>,
}

impl PredictionResult {
    pub fn new(query_id: impl Into<String>, result_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            query_id: query_id.into(),
            result_text: result_text.into(),
            created_at: Utc::now(),
        }
    }
}

/// What is known about a user in one domain. One per (user, domain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMemory {
    pub id: String,
    pub user_id: String,
    pub domain: String,
    pub profile: Profile,
    pub updated_at: DateTime<Utc>,
}
