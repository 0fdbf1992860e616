//! Cohort HTTP server.

use cohort::{
    bootstrap,
    config::{AppConfig, LogFormat},
    http, telemetry,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            telemetry::init(LogFormat::default());
            error!(error = %err, "invalid configuration");
            return Err(err.into());
        }
    };
    telemetry::init(config.log_format);
    info!(
        bind_address = %config.bind_address,
        postgres = config.database_url.is_some(),
        log_format = ?config.log_format,
        "configuration loaded"
    );

    info!("initialising state");
    let state = bootstrap::state(&config).await?;
    let app = http::app(state, &config.cors_origins);

    let listener = TcpListener::bind(config.bind_address).await?;
    http::serve(listener, app).await?;
    Ok(())
}
