//! `bulksms` command-line tool.
//!
//! The binary stays thin: [`cli`] parses arguments and calls into the library,
//! this file sets up logging and turns errors into an exit code.

mod cli;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = cli::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Initializes tracing from `RUST_LOG`, falling back to `info,bulksms=debug`.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bulksms=debug,tower_http=debug"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
