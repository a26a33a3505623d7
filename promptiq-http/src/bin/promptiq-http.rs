use clap::{Parser, Subcommand};
use promptiq_core::config::{self, SecretConfig};
use promptiq_http::{self, server::ServerConfig};
use std::path::PathBuf;

/// PromptIQ HTTP API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to a JSON secrets file; environment variables are used when omitted
    #[arg(short, long)]
    secrets: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server with a specific configuration file
    Config {
        /// Path to the configuration file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    let secret = match &cli.secrets {
        Some(path) => config::from_file(path)?,
        None => SecretConfig::from_env(),
    };

    // Note: We don't initialize tracing here because it's already initialized
    // in the library start functions

    match &cli.command {
        Some(Commands::Config { file }) => {
            let server_config: ServerConfig = config::from_file(file)?;
            println!(
                "Starting PromptIQ HTTP server on {}:{}",
                server_config.host, server_config.port
            );
            promptiq_http::start_with_config_and_secret(server_config, secret).await?;
        }
        None => {
            let server_config = ServerConfig {
                host: cli.host,
                port: cli.port,
                ..Default::default()
            };
            println!(
                "Starting PromptIQ HTTP server on {}:{}",
                server_config.host, server_config.port
            );
            promptiq_http::start_with_config_and_secret(server_config, secret).await?;
        }
    }

    Ok(())
}
