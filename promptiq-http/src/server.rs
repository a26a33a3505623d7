use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use promptiq_core::config::{CheckoutConfig, EvaluationConfig, SecretConfig, WebhookConfig};
use promptiq_core::evaluation::EvaluationPipeline;
use promptiq_core::payment::{CheckoutClient, WebhookVerifier};
use promptiq_core::provider::{OpenAIChatProviderLLM, ProviderLLM};
use promptiq_core::usage::UsageGate;

use crate::routes::create_api_router;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Evaluation pipeline configuration
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Checkout session configuration
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Webhook verification configuration
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            evaluation: EvaluationConfig::default(),
            checkout: CheckoutConfig::default(),
            webhook: WebhookConfig::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub usage_gate: UsageGate,
    pub pipeline: Arc<EvaluationPipeline>,
    pub checkout: Arc<CheckoutClient>,
    pub webhook: Arc<WebhookVerifier>,
}

impl AppState {
    /// Wire the production provider stack from config and secrets.
    pub fn new(config: &ServerConfig, secret: &SecretConfig) -> Self {
        let llm: Arc<dyn ProviderLLM> =
            Arc::new(OpenAIChatProviderLLM::new("openai_chat", &secret.openai));
        Self::with_llm(config, secret, llm)
    }

    /// Same wiring with a caller-supplied LLM backend; tests hand in a
    /// scripted one.
    pub fn with_llm(
        config: &ServerConfig,
        secret: &SecretConfig,
        llm: Arc<dyn ProviderLLM>,
    ) -> Self {
        Self {
            usage_gate: UsageGate::new(),
            pipeline: Arc::new(EvaluationPipeline::new(llm, config.evaluation.clone())),
            checkout: Arc::new(CheckoutClient::new(
                config.checkout.clone(),
                secret.payment.secret_key.clone(),
            )),
            webhook: Arc::new(WebhookVerifier::new(
                &secret.payment.webhook_secret,
                config.webhook.signature_tolerance,
            )),
        }
    }
}

/// Start the HTTP server
pub async fn start_server(
    config: ServerConfig,
    secret: SecretConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState::new(&config, &secret);

    info!("Initialized application state");

    // Create the router with all routes and add the application state
    let app = create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Parse the socket address
    let addr = format!("{}:{}", config.host, config.port).parse::<SocketAddr>()?;

    // Start the server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
