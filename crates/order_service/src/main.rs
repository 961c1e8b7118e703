//! Order service entry point.
//!
//! Loads the cleaner configuration, then serves the order normalization
//! API over HTTP.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use normalizer::NormalizerService;
use order_service::{
    create_router, load_cleaner_config, AppState, InMemoryRepository, OrderService, ServiceConfig,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting order service...");

    let config = ServiceConfig::from_env()?;
    info!("Configuration:");
    info!("  HTTP_PORT: {}", config.http_port);
    info!("  METRICS_PORT: {}", config.metrics_port);
    info!(
        "  CLEANER_CONFIG_PATH: {}",
        config.cleaner_config_path.display()
    );

    // Initialize Prometheus metrics
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], config.metrics_port))
        .install()?;
    info!(
        "Prometheus metrics available at http://0.0.0.0:{}/metrics",
        config.metrics_port
    );

    let cleaners = load_cleaner_config(&config.cleaner_config_path).with_context(|| {
        format!(
            "failed to load cleaner config from {}",
            config.cleaner_config_path.display()
        )
    })?;

    let normalizer = NormalizerService::with_defaults(cleaners);
    info!("Normalizer ready: {:?}", normalizer.registry());

    let repository = InMemoryRepository::new();
    let service = OrderService::new(normalizer, Arc::new(repository.clone()));
    let router = create_router(AppState {
        service,
        repository,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  POST /api/NormalizeOrder - Normalize order line items");
    info!("  GET /health              - Health check");
    info!("  GET /stats               - Persisted batch statistics");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Order service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received terminate signal"),
    }
}
