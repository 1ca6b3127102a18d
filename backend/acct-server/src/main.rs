use acct_server::{AppState, build_identity_provider, build_router, logger};

use acct_auth::TokenService;
use acct_db::ProfileRepository;

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = acct_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = acct_config::Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting acct-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Profile store
    let database_url = config.database_url()?;
    info!("Connecting to database: {}", database_url);
    let pool = acct_db::connect(&database_url, config.database.max_connections).await?;
    let store = Arc::new(ProfileRepository::new(pool));

    // Identity provider
    let identity = build_identity_provider(&config.identity)?;

    // Session tokens
    let tokens = Arc::new(TokenService::with_hs256(config.auth.secret_bytes()));
    info!("Session tokens: {}", tokens.algorithm());

    let app = build_router(AppState::new(store, identity, tokens));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
