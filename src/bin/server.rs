//! framewire Server Binary
//!
//! Waits for one client and logs every frame it sends.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use framewire::config::{ServerConfig, DEFAULT_PORT};
use framewire::logging::{self, LogConfig};
use framewire::{Server, TracingSink};

/// framewire Server
#[derive(Parser, Debug)]
#[command(name = "framewire-server")]
#[command(about = "Receive messages and record sets from a single client")]
#[command(version)]
struct Args {
    /// Local address to bind
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value = DEFAULT_PORT)]
    port: String,

    /// Log file (in addition to the console)
    #[arg(long, default_value = "server.log")]
    log_file: PathBuf,

    /// Disable the log file
    #[arg(long)]
    no_log_file: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Build config from args
    let config = ServerConfig::builder()
        .bind_host(&args.bind)
        .port(&args.port)
        .log_file((!args.no_log_file).then_some(args.log_file))
        .log_level(&args.log_level)
        .build();

    // Initialize tracing/logging
    if let Err(e) = logging::init(&LogConfig::new(&config.log_level, config.log_file.clone())) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("framewire server v{}", framewire::VERSION);

    let server = match Server::bind(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Server ready to receive the client on port {}", config.port);

    match server.serve(TracingSink) {
        // The loop only ends when the client leaves or misbehaves
        Ok(reason) => tracing::debug!("Dispatch loop ended: {}", reason),
        Err(e) => tracing::error!("Server error: {}", e),
    }

    ExitCode::FAILURE
}
