use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};

use lifeally_server::cli::CliArgs;
use lifeally_server::config::ServerConfig;
use lifeally_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let filter = match cli_args.log_level.as_deref() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    }
    .add_directive("surrealdb_core=warn".parse()?)
    .add_directive("surrealdb=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Lifeally server v{}", lifeally::VERSION);

    let server_config = ServerConfig::from_cli_and_env(cli_args)?;
    info!("Server configuration loaded");

    let lifeally_config = server_config.load_lifeally_config()?;
    let lifeally = lifeally::init(lifeally_config).await?;
    info!(
        models = lifeally.pipeline().registry().len(),
        llm = %lifeally.pipeline().model_version(),
        "Lifeally initialized"
    );

    let app_state = Arc::new(AppState::new(lifeally, server_config.clone()));

    if let Some(email) = &server_config.admin_email {
        match app_state
            .auth_service
            .bootstrap_admin(
                app_state.storage().as_ref(),
                email,
                server_config.admin_password.clone(),
            )
            .await
        {
            Ok(Some(password)) => {
                info!("Admin email: {}", email);
                info!("Admin password: {}", password);
                warn!(
                    "IMPORTANT: Save the admin password above! Set LIFEALLY_ADMIN_PASSWORD to choose it."
                );
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to create admin account: {}", e),
        }
    }

    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);
    if server_config.allow_admin_signup {
        warn!("Admin signup is enabled");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
