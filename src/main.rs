use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rakshak_honeypot::config::LogFormat;
use rakshak_honeypot::{AppState, Config, build_router, metrics, utils};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false, LogFormat::Text);
            error!("{e}");
            return ExitCode::from(exitcode::CONFIG as u8);
        }
    };

    init_tracing(config.debug, config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::from(exitcode::OK as u8),
        Err(exit_code) => ExitCode::from(exit_code as u8),
    }
}

/// Initialize logging. `RUST_LOG` wins over the `DEBUG`-derived default.
fn init_tracing(debug: bool, format: LogFormat) {
    let default_level = if debug { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .with_thread_ids(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Run the application, returning an exit code on error.
async fn run(config: Config) -> Result<(), exitcode::ExitCode> {
    info!("Starting {} v{}", config.app_name, config.app_version);

    if let Err(e) = config.validate() {
        if config.require_api_key {
            error!("{e}");
            return Err(exitcode::CONFIG);
        }
        warn!("{e}");
        warn!("Please set the required environment variables in your .env file");
    }

    info!(
        host = %config.host,
        port = config.port,
        debug = config.debug,
        "Configuration loaded"
    );

    if let Some(addr) = config.metrics_addr() {
        metrics::try_init_metrics(addr);
    }

    let addr = config.server_addr();
    let app_name = config.app_name.clone();
    let state = AppState::new(config);
    let app = build_router(state.clone());

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        exitcode::UNAVAILABLE
    })?;

    info!("Server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /                  - Health check");
    info!("  POST /honeypot/message  - Honeypot message intake (x-api-key required)");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| {
            error!("Server error: {e}");
            exitcode::SOFTWARE
        })?;

    info!(
        uptime_secs = state.uptime_seconds(),
        "Shutting down {app_name}"
    );
    Ok(())
}
