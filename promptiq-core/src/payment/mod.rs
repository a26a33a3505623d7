pub mod checkout;
pub mod webhook;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("No signature provided")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Signature timestamp outside the tolerance window")]
    StaleSignature,

    #[error("checkout API error: {0}")]
    Api(String),

    #[error("malformed webhook payload: {0}")]
    MalformedEvent(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

pub use checkout::{CheckoutClient, CheckoutSession};
pub use webhook::{WebhookEvent, WebhookVerifier};
