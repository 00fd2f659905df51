//! Userbase: a small user-creation HTTP service.
//!
//! This is the application entry point. It initializes tracing, loads configuration
//! from a TOML file, runs the database readiness gate, sets up the Axum router
//! and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userbase::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use userbase::db::Database;
use userbase::http::start_server;
use userbase::routes::create_router;
use userbase::startup::{run_gate, GateOutcome, Readiness};
use userbase::state::AppState;
use userbase::AppError;

/// Userbase: create users over HTTP
#[derive(Parser, Debug)]
#[command(name = "userbase", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "userbase=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Database URL, overrides [database] url
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration first so the log format is known
    let config = AppConfig::load(&args.config, args.database_url)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(config = %args.config, "Loaded configuration");

    let db = Database::connect_lazy(&config.database)?;
    tracing::info!(
        kind = db.kind().as_str(),
        max_connections = config.database.max_connections,
        "Database pool created"
    );

    // Wait for the database before accepting connections; never fatal
    let readiness = Readiness::new();
    match run_gate(&db, &config.startup.policy(), &readiness).await {
        GateOutcome::Ready { attempts } => {
            tracing::info!(attempts, "Application started successfully");
        }
        GateOutcome::Exhausted {
            attempts,
            last_error,
        } => {
            tracing::warn!(
                attempts,
                error = %last_error,
                "Starting without a ready database"
            );
        }
    }

    let state = AppState::new(config.clone(), db.clone(), readiness);
    let app = create_router(state);

    start_server(app, &config).await?;

    db.close().await;
    Ok(())
}
