//! geolocator - IP Geolocation Microservice
//!
//! This is the composition root that wires together all the components.

use geolocator::domain::ports::GeoProvider;
use geolocator::{load_config, HttpServer, IpApiProvider, LookupService};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting {} listen={} provider={}",
        cfg.service_name,
        cfg.listen_addr,
        cfg.provider_base_url
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and services

    // 1. Shared outbound HTTP client - one pooled instance for the whole
    //    process, torn down when the process exits. Construction failure
    //    is the only fatal condition: abort startup.
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.provider_timeout_secs))
        .build()?;

    // 2. Create outbound adapter
    let provider: Arc<dyn GeoProvider> = Arc::new(IpApiProvider::new(
        http_client,
        cfg.provider_base_url.clone(),
    ));
    tracing::info!("geolocation provider: {}", provider.name());

    // 3. Create application service
    let service = Arc::new(LookupService::new(provider));

    // 4. Create inbound adapter and run
    let server = HttpServer::new(service, cfg.listen_addr.clone());

    server.run().await
}
