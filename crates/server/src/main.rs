use error_stack::ResultExt;
use sheets_feed_core::adapters::config::app_config::AppConfig;
use sheets_feed_core::prettyprint::PrettyFormatter;
use thiserror::Error;
use tracing::{info, instrument};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod handler_factory;
mod http_adapter;

use handler_factory::HandlerFactory;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to load configuration")]
    Config,
    #[error("Failed to set up logging")]
    Logging,
    #[error("Failed to bind {0}")]
    Bind(String),
    #[error("Server stopped unexpectedly")]
    Serve,
}

#[tokio::main]
async fn main() -> error_stack::Result<(), ServerError> {
    let config = AppConfig::load().change_context(ServerError::Config)?;
    let level = config
        .logging
        .level_filter()
        .change_context(ServerError::Config)?;

    setup_tracing(level)?;
    setup_panic_hook();

    run(config).await
}

#[instrument(skip(config))]
async fn run(config: AppConfig) -> error_stack::Result<(), ServerError> {
    let handler = HandlerFactory::create(&config);
    let router = http_adapter::router(handler);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .change_context_lazy(|| ServerError::Bind(address.clone()))?;

    info!(address = %address, feed = %config.feed.url_template, "Serving sheet data");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .change_context(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

fn setup_tracing(level: LevelFilter) -> error_stack::Result<(), ServerError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    Registry::default()
        .with(
            Targets::new()
                .with_target("sheets_feed", level)
                .with_target("sheets_feed_core", level)
                .with_target("tower_http", level),
        )
        .with(stderr_layer)
        .try_init()
        .change_context(ServerError::Logging)
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
