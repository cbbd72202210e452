//! chat-relay: HTTP relay for a text-generation backend
//!
//! Sits between a chat client and a text-generation HTTP endpoint:
//! - `POST /chat` takes `{message, conversationHistory}` and returns the
//!   generated reply inside a fixed JSON envelope
//! - the backend endpoint comes from config.yaml or the GENERATION_URL
//!   environment variable

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chat_relay::{
    config::{apply_env_overrides, AppConfig},
    run_server, HttpGenerator, TextGenerator,
};

#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(version = "0.1.0")]
#[command(about = "HTTP relay for a text-generation backend")]
#[command(long_about = "
chat-relay forwards chat messages to a text-generation HTTP endpoint and
returns the generated reply in a fixed JSON envelope.

Example usage:
  chat-relay run --config config.yaml
  GENERATION_URL=https://my-tunnel.ngrok-free.app/generate chat-relay run
  chat-relay check-config
  chat-relay test-backend
")]
struct Cli {
    /// Path to config file (built-in defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Run {
        /// Override listen port
        #[arg(short, long)]
        port: Option<u16>,
        /// Override backend endpoint URL
        #[arg(long)]
        backend_url: Option<String>,
    },

    /// Validate configuration and print a summary
    CheckConfig,

    /// Send a short probe generation to the backend
    TestBackend,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .init();

    match cli.command {
        Commands::Run { port, backend_url } => {
            run_relay(cli.config.as_deref(), port, backend_url).await?;
        }
        Commands::CheckConfig => {
            check_config(cli.config.as_deref())?;
        }
        Commands::TestBackend => {
            test_backend(cli.config.as_deref()).await?;
        }
    }

    Ok(())
}

/// Load configuration, then layer environment and CLI overrides on top
fn load_config_with_env(config_path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load_or_default(config_path)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Run the relay server
async fn run_relay(
    config_path: Option<&Path>,
    port_override: Option<u16>,
    backend_url_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config_with_env(config_path)?;

    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(url) = backend_url_override {
        config.backend.url = url;
    }

    config.validate()?;

    run_server(config).await
}

/// Validate configuration and print a summary
fn check_config(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_env(config_path)?;

    match config.validate() {
        Ok(()) => {
            println!("✓ Configuration is valid\n");
            println!("Server:");
            println!("  Listen: {}:{}", config.server.host, config.server.port);
            println!("\nBackend:");
            println!("  URL: {}", config.backend.endpoint());
            println!("  Flavor: {:?}", config.backend.flavor);
            println!("  Timeout: {}s", config.backend.timeout_seconds);
            if config.backend.accept_invalid_certs {
                println!("  TLS: accepting invalid certificates");
            }
            if config.backend.api_key.is_some() {
                println!("  Auth: bearer token configured");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Probe the backend through the real generation path
async fn test_backend(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_env(config_path)?;
    config.validate()?;

    println!("Sending probe generation to {}", config.backend.endpoint());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .danger_accept_invalid_certs(config.backend.accept_invalid_certs)
        .build()?;
    let generator = HttpGenerator::new(client, config.backend.clone());

    match generator.generate("ping", &[]).await {
        Ok(text) => {
            println!("✓ Backend is reachable");
            println!("  Generated: {}", text.trim());
            Ok(())
        }
        Err(e) => {
            println!("✗ Probe failed: {}", e);
            std::process::exit(1);
        }
    }
}
