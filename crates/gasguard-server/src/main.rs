mod config;
mod telemetry;

use config::ServiceConfig;
use gasguard_domain::{
    CommandRelay, CommandTransport, ConnectivityTracker, DeviceChannel,
    InMemoryConnectivityStore, InMemoryReadingStore, InMemoryThresholdStore, ReadingService,
    ThresholdService,
};
use gasguard_http::{AppContext, HttpApi, HttpPushTransport, HttpServerConfig};
use gasguard_runner::Runner;
use std::sync::Arc;
use std::time::Duration;
use telemetry::{init_telemetry, TelemetryConfig};
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
    });

    info!(
        http_port = config.http_port,
        push_configured = config.push_url().is_some(),
        "starting gasguard service"
    );
    debug!("configuration: {:?}", config);

    // Stores are in-memory singletons; durable engines plug in behind
    // the same traits.
    let tracker = Arc::new(ConnectivityTracker::new(Arc::new(
        InMemoryConnectivityStore::new(),
    )));
    let channel = Arc::new(DeviceChannel::new());
    let thresholds = Arc::new(ThresholdService::new(Arc::new(
        InMemoryThresholdStore::new(),
    )));
    let readings = Arc::new(ReadingService::new(Arc::new(InMemoryReadingStore::new())));

    let push: Option<Arc<dyn CommandTransport>> = match config.push_url() {
        Some(url) => {
            let transport = match HttpPushTransport::new(
                url.to_string(),
                Duration::from_secs(config.push_timeout_secs),
            ) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!(error = %e, "failed to build push transport");
                    std::process::exit(1);
                }
            };
            Some(Arc::new(transport))
        }
        None => None,
    };

    let relay = Arc::new(CommandRelay::new(channel.clone(), push));

    let http_api = HttpApi::new(
        AppContext {
            tracker,
            relay,
            channel,
            thresholds,
            readings,
        },
        HttpServerConfig {
            host: config.http_host.clone(),
            port: config.http_port,
        },
    );

    let runner = Runner::new()
        .with_named_process("http_api", http_api.into_runner_process())
        .with_closer(|| async move {
            info!("cleanup complete");
            Ok(())
        })
        .with_closer_timeout(Duration::from_secs(10));

    runner.run().await
}
