use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use bank_api::auth::TokenService;
use bank_api::config::AppConfig;
use bank_api::database::{Account, InMemoryStore, PostgresStore, Storage};
use bank_api::{app, AppState};

#[derive(Parser)]
#[command(name = "bank-api")]
#[command(about = "Bank account REST API")]
#[command(version)]
struct Cli {
    #[arg(long, env = "BANK_API_PORT", help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Create a demo account at startup (bank number logged at debug level)")]
    seed: bool,

    #[arg(long, default_value = "demo-password", help = "Password for the --seed account")]
    seed_password: String,

    #[arg(long, help = "Keep accounts in memory instead of Postgres")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    info!("Starting bank API in {:?} mode", config.environment);

    if !config.security.jwt_secret.is_set() {
        warn!("JWT_SECRET is not set; login and protected account routes will fail");
    }

    // Kept aside so the pool can be drained after the server stops
    let mut postgres: Option<PostgresStore> = None;
    let store: Arc<dyn Storage> = if cli.in_memory {
        info!("Using in-memory account store");
        Arc::new(InMemoryStore::new())
    } else {
        let store = PostgresStore::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        store.init().await.context("failed to create account table")?;
        postgres = Some(store.clone());
        Arc::new(store)
    };

    if cli.seed {
        seed_account(store.as_ref(), &cli.seed_password).await?;
    }

    let state = AppState::new(store, TokenService::new(&config.security));
    let mut router = app(state);
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Bank API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(postgres) = postgres {
        postgres.close().await;
    }

    info!("Server stopped");
    Ok(())
}

async fn seed_account(store: &dyn Storage, password: &str) -> anyhow::Result<()> {
    let account = Account::new("Demo", "Account", password)?;
    let created = store
        .create_account(&account)
        .await
        .context("failed to seed demo account")?;

    info!(id = created.id, "Seeded demo account");
    debug!(number = created.number, "Demo account bank number");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
