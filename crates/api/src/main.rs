use std::future::IntoFuture;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrm_api::bootstrap::{ensure_bootstrap_admin, BootstrapAdmin};
use hrm_api::config::ServerConfig;
use hrm_api::router::build_app_router;
use hrm_api::state::AppState;
use hrm_calendar::GoogleCalendarClient;
use hrm_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Arc::new(ServerConfig::from_env());
    tracing::info!(host = %config.host, port = config.port, "Configuration loaded");

    let pool = prepare_database().await;

    if let Some(admin) = BootstrapAdmin::from_env() {
        match ensure_bootstrap_admin(&pool, &admin).await {
            Ok(Some(user_id)) => tracing::info!(user_id, "Bootstrap admin ready"),
            Ok(None) => tracing::debug!("Admin already present, bootstrap skipped"),
            Err(e) => tracing::warn!(error = %e, "Bootstrap admin provisioning failed"),
        }
    }

    if !config.google.is_configured() {
        tracing::warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set, calendar calls will fail");
    }

    let state = AppState {
        pool,
        calendar: Arc::new(GoogleCalendarClient::new(config.google.clone())),
        config: Arc::clone(&config),
    };
    let app = build_app_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!(%addr, "Listening");

    serve(listener, app, &config).await;
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hrm_api=debug,hrm_calendar=debug,tower_http=info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify connectivity, and migrate. Any failure aborts startup.
async fn prepare_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = hrm_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    hrm_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    hrm_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready");
    pool
}

/// Serve until SIGINT/SIGTERM, then give in-flight requests
/// `shutdown_timeout_secs` to finish.
async fn serve(listener: TcpListener, app: Router, config: &ServerConfig) {
    let (signalled_tx, mut signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    let drained = tokio::select! {
        result = &mut server => Some(result),
        _ = &mut signalled_rx => tokio::time::timeout(config.shutdown_timeout(), &mut server)
            .await
            .ok(),
    };

    match drained {
        Some(Ok(())) => {}
        Some(Err(e)) => tracing::error!(error = %e, "Server error"),
        None => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "In-flight requests did not drain before the shutdown timeout",
        ),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
