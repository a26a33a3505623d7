use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufReader, path::Path, time::Duration};
use utoipa::ToSchema;

use crate::{Error, InternalResult};

/// Settings for the evaluation pipeline and its LLM backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationConfig {
    /// Model identifier sent to the completion service
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Upper bound on one completion call; expiry is reported to the caller
    /// as a retryable failure
    #[serde(default = "default_request_timeout", with = "duration_ms")]
    #[schema(value_type = u64, pattern = "uint64 as milliseconds")]
    pub request_timeout: Duration,

    /// Window inside which an identical resubmission is rejected as a duplicate
    #[serde(default = "default_duplicate_window", with = "duration_secs")]
    #[schema(value_type = u64, pattern = "uint64 as seconds")]
    pub duplicate_window: Duration,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout: default_request_timeout(),
            duplicate_window: default_duplicate_window(),
        }
    }
}

/// Settings for hosted checkout session creation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckoutConfig {
    /// Base URL of the payment provider REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Fixed price of one evaluation, in the smallest currency unit
    #[serde(default = "default_unit_amount")]
    pub unit_amount: u64,

    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Origin used for redirect URLs when the request carries none
    #[serde(default = "default_fallback_origin")]
    pub fallback_origin: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            currency: default_currency(),
            unit_amount: default_unit_amount(),
            product_name: default_product_name(),
            fallback_origin: default_fallback_origin(),
        }
    }
}

/// Settings for webhook signature verification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookConfig {
    /// Maximum accepted age of a signed webhook timestamp
    #[serde(default = "default_signature_tolerance", with = "duration_secs")]
    #[schema(value_type = u64, pattern = "uint64 as seconds")]
    pub signature_tolerance: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            signature_tolerance: default_signature_tolerance(),
        }
    }
}

/// Secrets for the external collaborators. Deserialize-only; values never
/// appear in Debug output or serialized form.
#[derive(Clone, Deserialize, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: ProviderSecretConfig,

    #[serde(default)]
    pub payment: PaymentSecretConfig,
}

impl SecretConfig {
    /// Read secrets from the environment. Missing variables resolve to empty
    /// strings, which fail at the collaborator boundary rather than at startup.
    pub fn from_env() -> Self {
        let var = |key: &str| env::var(key).unwrap_or_default();
        Self {
            openai: ProviderSecretConfig {
                api_key: SecretString::from(var("OPENAI_API_KEY")),
            },
            payment: PaymentSecretConfig {
                secret_key: SecretString::from(var("STRIPE_SECRET_KEY")),
                webhook_secret: SecretString::from(var("STRIPE_WEBHOOK_SECRET")),
            },
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct ProviderSecretConfig {
    pub api_key: SecretString,
}

impl Default for ProviderSecretConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct PaymentSecretConfig {
    pub secret_key: SecretString,
    pub webhook_secret: SecretString,
}

impl Default for PaymentSecretConfig {
    fn default() -> Self {
        Self {
            secret_key: SecretString::from(String::new()),
            webhook_secret: SecretString::from(String::new()),
        }
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let file = File::open(path)
        .map_err(|e| Error::Internal(format!("Failed to open config file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Internal(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> usize {
    2048
}
fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}
fn default_duplicate_window() -> Duration {
    Duration::from_secs(60 * 60)
}
fn default_api_base() -> String {
    "https://api.stripe.com".to_string()
}
fn default_currency() -> String {
    "usd".to_string()
}
fn default_unit_amount() -> u64 {
    999
}
fn default_product_name() -> String {
    "PromptIQ Evaluation".to_string()
}
fn default_fallback_origin() -> String {
    "http://localhost:3000".to_string()
}
fn default_signature_tolerance() -> Duration {
    Duration::from_secs(300)
}

pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
