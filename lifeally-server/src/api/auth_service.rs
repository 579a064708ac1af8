//! Authentication service over the user store

use lifeally::storage::{LifeallyStore, UserProfile, UserRole};

use crate::{
    api::auth::{
        AuthContext, generate_admin_password, generate_jwt_token, hash_password,
        normalize_email, validate_jwt_token, verify_password,
    },
    config::ServerConfig,
    error::{ServerError, ServerResult},
};

/// Fields accepted when registering
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Authentication service
#[derive(Debug)]
pub struct AuthService {
    jwt_secret: String,
    jwt_expiration_hours: u64,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(jwt_secret: String, jwt_expiration_hours: u64, hash_cost: u32) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_hours,
            hash_cost,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.jwt_expiration_hours,
            config.password_hash_cost,
        )
    }

    /// Create the bootstrap admin unless an account with that email exists.
    ///
    /// Returns the generated password when none was supplied.
    pub async fn bootstrap_admin(
        &self,
        storage: &dyn LifeallyStore,
        email: &str,
        password: Option<String>,
    ) -> ServerResult<Option<String>> {
        let email = normalize_email(email);
        if let Some(existing) = storage.get_user_by_email(&email).await? {
            if !existing.is_admin() {
                tracing::warn!(email = %email, "Bootstrap admin email belongs to a non-admin account");
            } else {
                tracing::info!(email = %email, "Admin account already exists");
            }
            return Ok(None);
        }

        let generated = password.is_none();
        let password = password.unwrap_or_else(generate_admin_password);

        self.register(
            storage,
            NewUser {
                name: "Administrator".to_string(),
                email: email.clone(),
                password: password.clone(),
                role: UserRole::Admin,
            },
        )
        .await?;
        tracing::info!(email = %email, "Admin account created");

        Ok(generated.then_some(password))
    }

    /// Create a user with a hashed password; 409 if the email is taken
    pub async fn register(
        &self,
        storage: &dyn LifeallyStore,
        new_user: NewUser,
    ) -> ServerResult<UserProfile> {
        let email = normalize_email(&new_user.email);
        if storage.get_user_by_email(&email).await?.is_some() {
            return Err(ServerError::Conflict(
                "A user with that email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&new_user.password, self.hash_cost)?;
        let user = UserProfile::new(new_user.name.trim(), email, password_hash, new_user.role);

        storage.create_user(user).await.map_err(|e| match e {
            lifeally::storage::StorageError::AlreadyExists(_) => {
                ServerError::Conflict("A user with that email already exists".to_string())
            }
            other => other.into(),
        })
    }

    /// Check credentials and issue a token
    pub async fn authenticate(
        &self,
        storage: &dyn LifeallyStore,
        email: &str,
        password: &str,
    ) -> ServerResult<(String, UserProfile, i64)> {
        let invalid = || ServerError::Auth("Invalid email or password".to_string());

        let email = normalize_email(email);
        let Some(user) = storage.get_user_by_email(&email).await? else {
            tracing::warn!(email = %email, "Login failed: unknown email");
            return Err(invalid());
        };

        if !user.is_active || !verify_password(password, &user.password_hash) {
            tracing::warn!(user_id = %user.id, "Login failed: bad password or inactive account");
            return Err(invalid());
        }

        let (token, expires_at) = generate_jwt_token(
            &user.id,
            user.role.as_str(),
            &self.jwt_secret,
            self.jwt_expiration_hours,
        )?;

        Ok((token, user, expires_at))
    }

    /// Resolve a bearer token to an existing admin account
    pub async fn authorize_admin(
        &self,
        storage: &dyn LifeallyStore,
        token: &str,
    ) -> ServerResult<AuthContext> {
        let context = validate_jwt_token(token, &self.jwt_secret)?;

        // Role is re-read from storage; the claim may be stale
        let user = storage.get_user(&context.user_id).await?;
        match user {
            Some(user) if user.is_admin() && user.is_active => Ok(AuthContext {
                user_id: user.id,
                role: user.role.to_string(),
            }),
            _ => Err(ServerError::Forbidden("Admin access required".to_string())),
        }
    }
}
