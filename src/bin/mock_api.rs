//! Mock admin API server
//!
//! Serves fixture data on the admin API paths for local development.

use clap::Parser;
use iprescribe::config::LoggingConfig;
use iprescribe::mock::{serve, MockConfig, MockState, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};

#[derive(Parser)]
#[command(name = "iprescribe-mock-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Local mock of the iPrescribe admin API")]
struct Args {
    /// Host to bind
    #[arg(long, env = "IPRESCRIBE_MOCK_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind
    #[arg(short, long, env = "IPRESCRIBE_MOCK_PORT", default_value_t = 8787)]
    port: u16,

    /// Admin email accepted by /auth/login
    #[arg(long, default_value = DEFAULT_ADMIN_EMAIL)]
    email: String,

    /// Admin password accepted by /auth/login
    #[arg(long, default_value = DEFAULT_ADMIN_PASSWORD)]
    password: String,

    /// Serve admin endpoints without a bearer token
    #[arg(long)]
    open: bool,

    /// Answer the stats endpoint with this HTTP status
    #[arg(long)]
    fail_stats: Option<u16>,

    /// Log level
    #[arg(long, env = "IPRESCRIBE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (pretty, json)
    #[arg(long, env = "IPRESCRIBE_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    iprescribe::logging::init(&LoggingConfig {
        level: args.log_level.clone(),
        format: args.log_format.clone(),
        file: None,
    })?;

    let config = MockConfig {
        host: args.host,
        port: args.port,
    };

    let mut state = MockState::new().with_credentials(args.email, args.password);
    if args.open {
        state = state.with_open_access();
    }
    if let Some(status) = args.fail_stats {
        state = state.with_stats_failure(status);
    }

    tracing::info!("Point the client at {}", config.base_url());
    serve(state, &config).await?;
    Ok(())
}
