//! Heartbeat relay entry point.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use heartbeat_relay::app::{AppState, HeartbeatClient};
use heartbeat_relay::config::Config;
use heartbeat_relay::delay::{self, DEFAULT_DELAY_SECONDS};
use heartbeat_relay::server::{self, Service};
use heartbeat_relay::{api, app, metrics};

/// App and API services that relay a heartbeat check.
#[derive(Parser, Debug)]
#[command(name = "heartbeat-relay")]
#[command(about = "Run the API service, the App service, or the start-up delay")]
#[command(version, arg_required_else_help = true)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `GET /heartbeat`.
    Api {
        /// Listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Serve `GET /`, relaying the API service's heartbeat.
    App {
        /// Listen port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Sleep before exiting.
    Delay {
        /// Seconds to wait.
        #[arg(short, long, default_value_t = DEFAULT_DELAY_SECONDS)]
        seconds: u64,
    },

    /// Check configuration validity.
    CheckConfig,
}

impl Command {
    /// Whether this subcommand reads `Config`.
    fn needs_config(&self) -> bool {
        !matches!(self, Command::Delay { .. })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration feeds the log filter, so load it before logging is up
    let config = args.command.needs_config().then(Config::load);

    let (verbose, default_filter, json) = match &config {
        Some(Ok(c)) => (args.verbose || c.verbose, c.rust_log.clone(), c.log_json),
        _ => (args.verbose, "info".to_string(), false),
    };
    init_logging(verbose, &default_filter, json);

    let config = config
        .transpose()
        .map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })?
        .unwrap_or_default();

    match args.command {
        Command::Api { port } => cmd_api(config, port).await,
        Command::App { port } => cmd_app(config, port).await,
        Command::Delay { seconds } => {
            delay::run(Duration::from_secs(seconds)).await;
            Ok(())
        }
        Command::CheckConfig => cmd_check_config(&config),
    }
}

fn init_logging(verbose: bool, default_filter: &str, json: bool) {
    let filter = if verbose {
        EnvFilter::new("heartbeat_relay=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    // Exactly one of the two formatting layers is active
    let (json_layer, text_layer) = if json {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(filter)
        .init();
}

/// Install the Prometheus recorder and describe metrics.
fn init_metrics() -> anyhow::Result<metrics_exporter_prometheus::PrometheusHandle> {
    let handle = metrics::install_recorder()?;
    metrics::init_metrics();
    Ok(handle)
}

/// Run the API service.
async fn cmd_api(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let port = port_override.unwrap_or(config.port);
    let handle = init_metrics()?;

    let router = server::with_metrics(api::create_router(), handle);
    server::serve(router, port, Service::Api).await?;

    Ok(())
}

/// Run the App service.
async fn cmd_app(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let port = port_override.unwrap_or(config.port);
    let client = HeartbeatClient::from_config(&config)?;
    info!(
        "Relaying heartbeat from {} (timeout {}ms)",
        client.url(),
        config.api_timeout_ms
    );

    let handle = init_metrics()?;
    let router = server::with_metrics(app::create_router(AppState::new(client)), handle);
    server::serve(router, port, Service::App).await?;

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HEARTBEAT RELAY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Building heartbeat URL... ");
    let url = match config.heartbeat_url() {
        Ok(url) => {
            println!("OK");
            url
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Heartbeat URL invalid"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Port: {}", config.port);
    println!("  Heartbeat URL: {}", url);
    println!("  Heartbeat Timeout: {}ms", config.api_timeout_ms);
    println!("  Log Level: {}", config.rust_log);
    println!("  Verbose: {}", config.verbose);
    println!("  JSON Logs: {}", config.log_json);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
