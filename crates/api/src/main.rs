use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use encore_core::api_keys::generate_api_key;
use encore_db::repositories::{ApiKeyRepo, UserRepo};
use encore_hooks::{EmailConfig, HookPersistence, Mailer, Notifier};

use encore_api::config::ServerConfig;
use encore_api::router::build_app_router;
use encore_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = encore_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    encore_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    encore_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Outbound email ---
    let mailer = EmailConfig::from_env().map(Mailer::new);
    if mailer.is_some() {
        tracing::info!("SMTP transport configured, client notices will be delivered");
    } else {
        tracing::warn!("SMTP not configured, client notices will be journaled only");
    }
    let notifier = Notifier::new(pool.clone(), mailer);

    // --- App state ---
    let state = AppState::new(pool.clone(), Arc::new(config.clone()), notifier);

    // Spawn hook persistence (writes every published hook to the audit log).
    let persistence_handle = tokio::spawn(HookPersistence::run(
        pool.clone(),
        state.bus.subscribe(),
    ));

    // Spawn the scheduled task runner (daily reminders, lapse sweep).
    let task_cancel = tokio_util::sync::CancellationToken::new();
    let task_runner = state.tasks.clone();
    let task_cancel_clone = task_cancel.clone();
    let task_handle = tokio::spawn(async move {
        task_runner.run(task_cancel_clone).await;
    });

    tracing::info!("Background services started (hook persistence, task runner)");

    // First boot has no credentials at all, so mint one admin key here.
    bootstrap_admin_key(&pool).await;

    // --- Router ---
    let app = build_app_router(state.clone(), &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the task runner.
    task_cancel.cancel();
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        task_handle,
    )
    .await;
    tracing::info!("Task runner stopped");

    // Drop the last bus handle to close the broadcast channel. This signals
    // hook persistence to shut down once the backlog is drained.
    drop(state);
    let _ = tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        persistence_handle,
    )
    .await;
    tracing::info!("Hook persistence shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Mint the very first admin API key when the key table is empty.
///
/// The plaintext is logged exactly once; every later key is created through
/// the authenticated `/admin/api-keys` endpoint. The key is attached to the
/// admin user the seed migration guarantees.
async fn bootstrap_admin_key(pool: &sqlx::PgPool) {
    let count = ApiKeyRepo::count(pool)
        .await
        .expect("Failed to count API keys");
    if count > 0 {
        return;
    }

    let admin = UserRepo::find_first_admin(pool)
        .await
        .expect("Failed to look up admin user")
        .expect("No admin user exists; seed migrations have not run");

    let generated = generate_api_key();
    ApiKeyRepo::create(pool, "bootstrap", &generated.prefix, &generated.hash, admin.id)
        .await
        .expect("Failed to store bootstrap API key");

    tracing::warn!(
        api_key = %generated.plaintext,
        "Bootstrap admin API key created; store it now, it will not be shown again",
    );
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
