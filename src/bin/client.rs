//! framewire Client Binary
//!
//! Sends the configured key as a message, then a packet of lines typed at
//! the console.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use framewire::client::read_records;
use framewire::config::DEFAULT_CLIENT_CONFIG;
use framewire::logging::{self, LogConfig};
use framewire::{Client, ClientConfig, Result};

/// framewire Client
#[derive(Parser, Debug)]
#[command(name = "framewire-client")]
#[command(about = "Send a message and a record set to a framewire server")]
#[command(version)]
struct Args {
    /// Configuration file with IP, PUERTO and CLAVE
    #[arg(short, long, default_value = DEFAULT_CLIENT_CONFIG)]
    config: PathBuf,

    /// Log file (in addition to the console)
    #[arg(long, default_value = "client.log")]
    log_file: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(&LogConfig::new(&args.log_level, Some(args.log_file.clone()))) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Hello! I'm a log");

    let config = match ClientConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Could not load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("IP: {}", config.ip);
    tracing::info!("Port: {}", config.port);
    tracing::info!("Key: {}", config.key);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Client error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ClientConfig) -> Result<()> {
    let mut client = Client::connect(config)?;
    client.send_message(&config.key)?;

    let stdin = io::stdin();
    let records = read_records(&mut stdin.lock(), &mut io::stdout())?;
    client.send_records(&records)?;
    tracing::info!("Packet sent successfully");

    client.close()
}
