use clap::Parser;
use colored::Colorize;
use config_engine::{ConfigEngine, ConfigSource, HospitalConfig, DEVELOPMENT_JWT_SECRET};
use secrecy::ExposeSecret;
use std::{env, net::SocketAddr};
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use error_common::{log_error, HospitalError, Result};
use hospital_server::{create_app, HospitalServer};

/// Hospital management HTTP server
#[derive(Parser, Debug)]
#[command(name = "hospital-server")]
#[command(about = "Appointments, prescriptions and doctor directory REST API")]
struct Args {
    /// Server bind address (overrides server.host)
    #[arg(long, env = "HOSPITAL_HOST")]
    host: Option<String>,

    /// Server port (overrides server.port)
    #[arg(short, long, env = "HOSPITAL_PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "hospital-server.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = ConfigEngine::new()
        .add_source(ConfigSource::file(args.config.clone()))
        .add_source(ConfigSource::env("HOSPITAL"))
        .load_hospital()
        .map_err(|e| HospitalError::ConfigError(e.to_string()))?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config, args.verbose);

    info!("🏥 {}", "Starting Hospital Management Server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!("📄 Config file: {}", args.config.bright_white());

    if config.auth.jwt_secret.expose_secret() == DEVELOPMENT_JWT_SECRET {
        warn!("{}", "auth.jwt_secret is the development default; set HOSPITAL__AUTH__JWT_SECRET in production".bright_yellow());
    }

    let server = HospitalServer::new(&config).await.map_err(|e| {
        let err = HospitalError::DatabaseError(format!("{e:#}"));
        log_error("startup", &err);
        err
    })?;
    let app = create_app(server.clone());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| HospitalError::ConfigError(format!("Invalid bind address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HospitalError::NetworkError(format!("Failed to bind to {addr}: {e}")))?;

    let base = format!(
        "http://{}{}",
        addr,
        config.server.context_path.as_deref().unwrap_or("")
    );
    info!("🚀 {}", format!("Server running on {base}").bright_green());
    info!("📋 {}", format!("Health check available at: {base}/health").bright_blue());
    info!("📘 {}", format!("OpenAPI document at: {base}/api-docs/openapi.json").bright_blue());

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HospitalError::ServerError(format!("HTTP server error: {e}")));
    if let Err(err) = &result {
        log_error("serve", err);
    }

    server.shutdown().await;
    info!("👋 {}", "Server stopped".bright_white());
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(config: &HospitalConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    // JSON in production or when asked for; pretty output otherwise
    let is_production = env::var("HOSPITAL_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production"));
    let use_json = config.logging.json || is_production;
    let use_colors = env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "hospital_server={level},auth_identity={level},database_layer={level},tower_http=info,sqlx=warn"
        )
        .into()
    });

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_colors),
            )
            .init();

        if use_colors {
            print_startup_banner();
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                   🏥 HOSPITAL MANAGEMENT API                  ║".bright_cyan());
    println!("{}", "║          Appointments · Prescriptions · Doctor Directory      ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}
