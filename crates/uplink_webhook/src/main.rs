use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use uplink_decoders::CatalogRegistry;
use uplink_domain::{DecoderResolver, EnvelopeValidator, UplinkService};
use uplink_webhook::config::ServiceConfig;
use uplink_webhook::http::{build_router, AppState};
use uplink_webhook::{metrics, telemetry};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    telemetry::init_telemetry(&config.log_level);

    info!(
        http_port = config.http_port,
        catalog_dir = %config.catalog_dir,
        "Starting uplink-webhook service"
    );

    let metrics_handle = match metrics::init_metrics() {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to install metrics recorder: {}", e);
            std::process::exit(1);
        }
    };
    metrics::spawn_process_collector(Duration::from_secs(config.process_metrics_interval_secs));

    let registry = match CatalogRegistry::load(&config.catalog_dir) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load decoder catalog: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        decoders = registry.len(),
        "Decoder catalog loaded"
    );

    let service = Arc::new(UplinkService::new(
        EnvelopeValidator::new(config.require_received_at),
        DecoderResolver::new(config.honor_legacy_override),
        Arc::new(registry),
        Duration::from_millis(config.decode_timeout_ms),
    ));

    let app = build_router(AppState {
        service,
        metrics: Some(metrics_handle),
    });

    let addr = format!("{}:{}", config.http_host, config.http_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!(addr = %addr, "Listening for uplink webhooks");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
