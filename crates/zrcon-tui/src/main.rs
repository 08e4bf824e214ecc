//! zrcon entry point.
//!
//! # Usage
//!
//! ```bash
//! zrcon --host tcp://127.0.0.1:27961 --password secret
//! ```

use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zrcon_app::{ConnectionConfig, Console, InputLine, input_queue};
use zrcon_client::{ZmqTransport, default_identity, libzmq_version};
use zrcon_proto::DEFAULT_RCON_ENDPOINT;
use zrcon_tui::{ConsoleView, TerminalDisplay, collector, log_channel};

/// Quake Live remote console
#[derive(Parser, Debug)]
#[command(name = "zrcon")]
#[command(about = "Interactive remote console for zmq game servers")]
#[command(version)]
struct Args {
    /// ZMQ URI to connect to
    #[arg(long, default_value = DEFAULT_RCON_ENDPOINT)]
    host: String,

    /// Rcon password
    #[arg(long)]
    password: Option<String>,

    /// Socket identity. Random UUID used by default
    #[arg(long)]
    identity: Option<String>,

    /// Poll timeout in milliseconds
    #[arg(long, default_value = "100")]
    poll_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output lines kept for scrolling
    #[arg(long, default_value = "2000")]
    scrollback: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let (sink, logs) = log_channel();
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_ansi(false).with_target(false).with_writer(sink))
        .with(filter)
        .init();

    tracing::info!("zrcon {}, libzmq version {}", env!("CARGO_PKG_VERSION"), libzmq_version());

    let config = ConnectionConfig::rcon()
        .with_endpoint(args.host)
        .with_identity(args.identity.unwrap_or_else(default_identity))
        .with_password(args.password)
        .with_poll_timeout(Duration::from_millis(args.poll_timeout));

    let transport = ZmqTransport::new(&config)?;

    let (queue_tx, queue_rx) = input_queue();
    let (line_tx, line_rx) = watch::channel(InputLine::default());

    let display = TerminalDisplay::new(ConsoleView::new(&config, args.scrollback), logs, line_rx)?;
    let _input_thread = collector::spawn(queue_tx, line_tx)?;

    Console::new(transport, display, queue_rx, &config).run()?;

    Ok(())
}
