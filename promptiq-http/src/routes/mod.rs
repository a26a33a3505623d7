use crate::handlers;
use crate::models::{
    CheckoutRequest, CheckoutResponse, ErrorBody, ErrorKind, EvaluateRequest, EvaluateResponse,
    RecordUsageResponse, UsageResponse, WebhookAck,
};
use crate::server::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use promptiq_core::evaluation::{EvaluationResult, FrameworkFit, StructuralScores};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::evaluate::evaluate_prompt,
        handlers::usage::check_usage,
        handlers::usage::record_usage,
        handlers::checkout::create_checkout_session,
        handlers::webhook::payment_webhook
    ),
    components(schemas(
        EvaluateRequest,
        EvaluateResponse,
        ErrorBody,
        ErrorKind,
        EvaluationResult,
        FrameworkFit,
        StructuralScores,
        UsageResponse,
        RecordUsageResponse,
        CheckoutRequest,
        CheckoutResponse,
        WebhookAck
    ))
)]
struct ApiDoc;

/// Create the main API router with state
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .route("/evaluate", post(handlers::evaluate_prompt))
        .route(
            "/usage",
            get(handlers::check_usage).post(handlers::record_usage),
        )
        .route("/checkout", post(handlers::create_checkout_session))
        .route("/webhooks/payment", post(handlers::payment_webhook))
}

/// Health check endpoint for container health monitoring
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
