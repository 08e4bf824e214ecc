//! Stats feed listener.
//!
//! # Usage
//!
//! ```bash
//! zrcon-stats --host tcp://127.0.0.1:27960 --password secret
//! ```

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zrcon_app::{ConnectionConfig, StatsListener};
use zrcon_client::{ZmqTransport, libzmq_version};
use zrcon_proto::DEFAULT_STATS_ENDPOINT;

/// Quake Live stats listener
#[derive(Parser, Debug)]
#[command(name = "zrcon-stats")]
#[command(about = "Subscribe to a game server's zmq stats feed and log every event")]
#[command(version)]
struct Args {
    /// ZMQ URI to connect to
    #[arg(long, default_value = DEFAULT_STATS_ENDPOINT)]
    host: String,

    /// Stats password
    #[arg(long)]
    password: Option<String>,

    /// Poll timeout in milliseconds
    #[arg(long, default_value = "1000")]
    poll_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(
        "zrcon-stats {}, libzmq version {}",
        env!("CARGO_PKG_VERSION"),
        libzmq_version()
    );

    let config = ConnectionConfig::stats()
        .with_endpoint(args.host)
        .with_password(args.password)
        .with_poll_timeout(Duration::from_millis(args.poll_timeout));

    let transport = ZmqTransport::new(&config)?;
    StatsListener::new(transport, &config).run()?;

    Ok(())
}
