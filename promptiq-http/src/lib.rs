//! PromptIQ HTTP API Server
//!
//! This crate provides the HTTP API for the PromptIQ prompt evaluation
//! service: prompt evaluation, free-usage accounting, checkout session
//! creation, and payment webhooks.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use promptiq_core::config::SecretConfig;
use server::{ServerConfig, start_server};

/// Start the PromptIQ HTTP server with the default configuration
pub async fn start() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    start_server(ServerConfig::default(), SecretConfig::from_env()).await
}

/// Start the PromptIQ HTTP server with a custom configuration
pub async fn start_with_config(config: ServerConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    start_server(config, SecretConfig::from_env()).await
}

pub async fn start_with_config_and_secret(
    config: ServerConfig,
    secret: SecretConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    start_server(config, secret).await
}
