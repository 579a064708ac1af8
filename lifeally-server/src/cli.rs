use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for lifeally-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub allow_admin_signup: Option<bool>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: Option<u64>,
    pub cors_origins: Option<Vec<String>>,
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl CliArgs {
    fn command() -> Command {
        Command::new("lifeally-server")
            .version(lifeally::VERSION)
            .about("HTTP API server for the Lifeally advice pipeline")
            .long_about(
                r#"Lifeally Server exposes the life-domain advice pipeline over HTTP
together with user registration, login and admin endpoints.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.
Library settings (models directory, storage, LLM) come from the config file
and LIFEALLY_* variables.

Examples:
  lifeally-server --port 8080
  lifeally-server --config lifeally.toml --admin-email admin@example.com
  lifeally-server --cors-origin https://app.example.com --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: LIFEALLY_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to the library configuration file (toml, yaml or json).
Environment variable: LIFEALLY_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("allow_admin_signup")
                    .long("allow-admin-signup")
                    .value_name("BOOL")
                    .help("Allow registering admin accounts")
                    .long_help(
                        "Allow the public register endpoint to create accounts with the
admin role. Leave disabled in production.
Environment variable: LIFEALLY_ALLOW_ADMIN_SIGNUP",
                    )
                    .value_parser(clap::value_parser!(bool)),
            )
            .arg(
                Arg::new("admin_email")
                    .long("admin-email")
                    .value_name("EMAIL")
                    .help("Bootstrap admin email")
                    .long_help(
                        "Create an admin account with this email at startup if none exists.
Environment variable: LIFEALLY_ADMIN_EMAIL",
                    )
                    .value_hint(ValueHint::EmailAddress),
            )
            .arg(
                Arg::new("admin_password")
                    .long("admin-password")
                    .value_name("PASSWORD")
                    .help("Bootstrap admin password")
                    .long_help(
                        "Password for the bootstrap admin. If not provided, a random
password is generated and logged once.
Environment variable: LIFEALLY_ADMIN_PASSWORD",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("JWT signing secret")
                    .long_help(
                        "Secret key used for signing JWT tokens. Should be a
long, random string. If not provided, one will be generated automatically.
Environment variable: LIFEALLY_JWT_SECRET",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_expiration")
                    .long("jwt-expiration")
                    .value_name("HOURS")
                    .help("JWT token expiration time in hours")
                    .long_help(
                        "How long JWT tokens remain valid before expiring.
Default is 24 hours.
Environment variable: LIFEALLY_JWT_EXPIRATION_HOURS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("cors_origin")
                    .long("cors-origin")
                    .value_name("ORIGIN")
                    .help("Allowed CORS origin (repeatable)")
                    .long_help(
                        "Origin allowed to call the API from a browser. Repeat the flag
for several origins.
Environment variable: LIFEALLY_CORS_ORIGINS (comma-separated)",
                    )
                    .action(ArgAction::Append)
                    .value_hint(ValueHint::Url),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
    }

    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Self::command().get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self::from_matches(&matches)
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            port: matches.get_one::<u16>("port").copied(),
            allow_admin_signup: matches.get_one::<bool>("allow_admin_signup").copied(),
            admin_email: matches.get_one::<String>("admin_email").cloned(),
            admin_password: matches.get_one::<String>("admin_password").cloned(),
            jwt_secret: matches.get_one::<String>("jwt_secret").cloned(),
            jwt_expiration_hours: matches.get_one::<u64>("jwt_expiration").copied(),
            cors_origins: matches
                .get_many::<String>("cors_origin")
                .map(|values| values.cloned().collect()),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Lifeally Server Environment Variables");
        println!("=====================================");
        println!();
        println!("Server Configuration:");
        println!("  LIFEALLY_PORT                  - Server port (default: 5000)");
        println!("  LIFEALLY_CONFIG_FILE           - Library config file");
        println!("  LIFEALLY_CORS_ORIGINS          - Comma-separated allowed origins");
        println!();
        println!("Authentication:");
        println!("  LIFEALLY_JWT_SECRET            - JWT signing secret (auto-generated if not set)");
        println!("  LIFEALLY_JWT_EXPIRATION_HOURS  - JWT expiration in hours (default: 24)");
        println!("  LIFEALLY_ALLOW_ADMIN_SIGNUP    - Allow admin registration (default: false)");
        println!("  LIFEALLY_ADMIN_EMAIL           - Bootstrap admin email");
        println!("  LIFEALLY_ADMIN_PASSWORD        - Bootstrap admin password");
        println!();
        println!("Library (nested keys use a double underscore):");
        println!("  LIFEALLY_MODELS__DIR           - Directory with model artifacts");
        println!("  LIFEALLY_STORAGE__ENGINE       - memory or rocksdb");
        println!("  LIFEALLY_STORAGE__DATA_DIR     - Storage data directory");
        println!("  GEMINI_API_KEY                 - Language model API key");
        println!("  GEMINI_MODEL_NAME              - Language model name");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                       - Logging level (error, warn, info, debug, trace)");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let matches = CliArgs::command().get_matches_from([
            "lifeally-server",
            "--port",
            "8080",
            "--allow-admin-signup",
            "true",
            "--cors-origin",
            "http://a.test",
            "--cors-origin",
            "http://b.test",
            "--log-level",
            "debug",
        ]);
        let args = CliArgs::from_matches(&matches);

        assert_eq!(args.port, Some(8080));
        assert_eq!(args.allow_admin_signup, Some(true));
        assert_eq!(
            args.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.admin_email.is_none());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let result =
            CliArgs::command().try_get_matches_from(["lifeally-server", "--log-level", "loud"]);
        assert!(result.is_err());
    }
}
