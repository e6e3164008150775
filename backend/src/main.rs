//! FitPass API server.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fitpass::adapters::auth::{AccountSessionValidator, Argon2PasswordHasher, JwtTokenService};
use fitpass::adapters::http::{api_router, with_http_layers, AppState, Credentials, Policy};
use fitpass::adapters::postgres::{self, PostgresStore};
use fitpass::application::handlers::auth::{
    EnsureBootstrapAdminCommand, EnsureBootstrapAdminHandler,
};
use fitpass::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    info!(environment = ?config.server.environment, "Starting FitPass API");

    let pool = postgres::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.run_migrations {
        postgres::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;
        info!("Database migrations applied");
    }
    let store = Arc::new(PostgresStore::new(pool));

    let tokens = Arc::new(JwtTokenService::new(
        config.auth.jwt_secret.expose_secret().as_bytes(),
        config.auth.issuer.clone(),
        config.auth.token_ttl_hours,
    ));
    let credentials = Credentials {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: tokens.clone(),
        sessions: Arc::new(AccountSessionValidator::new(tokens, store.clone())),
    };

    if let Some((email, password)) = config.auth.bootstrap_admin() {
        let outcome = EnsureBootstrapAdminHandler::new(store.clone(), credentials.hasher.clone())
            .handle(EnsureBootstrapAdminCommand {
                email: email.to_string(),
                password: password.expose_secret().to_string(),
            })
            .await
            .context("failed to bootstrap admin account")?;
        info!(?outcome, "Bootstrap admin ensured");
    }

    let policy = Policy::from_config(&config).context("invalid reward settings")?;
    let state = AppState::new(store, credentials, policy);
    let app = with_http_layers(api_router(state), &config.server);

    let addr = config.server.bind_addr().context("invalid bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` overrides `server.log_level`.
fn init_tracing(config: &AppConfig) {
    if !config.features.enable_tracing {
        return;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.server.log_format() {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(false)).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
