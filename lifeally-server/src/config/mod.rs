//! Server configuration module

use anyhow::Result;
use lifeally::config::{ConfigLoader, LifeallyConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Origins allowed by CORS when none are configured
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

/// Server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT token expiration time in hours
    pub jwt_expiration_hours: u64,

    /// bcrypt work factor for new password hashes
    pub password_hash_cost: u32,

    /// Allow `role: "admin"` on the public register endpoint
    pub allow_admin_signup: bool,

    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,

    /// Admin account created at startup if it does not exist
    pub admin_email: Option<String>,

    /// Password for the bootstrap admin (generated if not set)
    pub admin_password: Option<String>,

    /// Library configuration file (toml/yaml/json)
    pub config_file_path: Option<PathBuf>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("password_hash_cost", &self.password_hash_cost)
            .field("allow_admin_signup", &self.allow_admin_signup)
            .field("cors_origins", &self.cors_origins)
            .field("admin_email", &self.admin_email)
            .field("config_file_path", &self.config_file_path)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            jwt_secret: "".to_string(), // Generated at runtime if not provided
            jwt_expiration_hours: 24,
            password_hash_cost: bcrypt::DEFAULT_COST,
            allow_admin_signup: false,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            admin_email: None,
            admin_password: None,
            config_file_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("LIFEALLY_PORT") {
            config.port = port.parse()?;
        }

        if let Some(jwt_secret) = cli_args.jwt_secret {
            config.jwt_secret = jwt_secret;
        } else if let Ok(jwt_secret) = env::var("LIFEALLY_JWT_SECRET") {
            config.jwt_secret = jwt_secret;
        }
        if config.jwt_secret.is_empty() {
            config.jwt_secret = Self::generate_jwt_secret();
        }

        if let Some(exp_hours) = cli_args.jwt_expiration_hours {
            config.jwt_expiration_hours = exp_hours;
        } else if let Ok(exp_hours) = env::var("LIFEALLY_JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = exp_hours.parse()?;
        }

        if let Some(allow) = cli_args.allow_admin_signup {
            config.allow_admin_signup = allow;
        } else if let Ok(allow) = env::var("LIFEALLY_ALLOW_ADMIN_SIGNUP") {
            config.allow_admin_signup = allow.parse().unwrap_or(false);
        }

        if let Some(origins) = cli_args.cors_origins {
            config.cors_origins = origins;
        } else if let Ok(origins) = env::var("LIFEALLY_CORS_ORIGINS") {
            config.cors_origins = parse_origins(&origins);
        }

        if let Some(email) = cli_args.admin_email {
            config.admin_email = Some(email);
        } else if let Ok(email) = env::var("LIFEALLY_ADMIN_EMAIL") {
            config.admin_email = Some(email);
        }

        if let Some(password) = cli_args.admin_password {
            config.admin_password = Some(password);
        } else if let Ok(password) = env::var("LIFEALLY_ADMIN_PASSWORD") {
            config.admin_password = Some(password);
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file_path = Some(config_path);
        } else if let Ok(config_path) = env::var("LIFEALLY_CONFIG_FILE") {
            config.config_file_path = Some(PathBuf::from(config_path));
        }

        Ok(config)
    }

    /// Library configuration: the configured file or the default locations,
    /// then `LIFEALLY_*` and `GEMINI_*` variables.
    pub fn load_lifeally_config(&self) -> Result<LifeallyConfig> {
        let mut loader = ConfigLoader::new();

        match &self.config_file_path {
            Some(path) => {
                tracing::info!("Loading Lifeally configuration from: {}", path.display());
                loader.load_file(path)?;
            }
            None => {
                tracing::info!("No config file provided, checking default locations");
                loader.load_default_files();
            }
        }

        Ok(loader.load_env().extract()?)
    }

    /// Generate a secure random JWT secret
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;
        use rand::distr::Alphanumeric;
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }
}

/// Comma-separated origins, blanks dropped.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
