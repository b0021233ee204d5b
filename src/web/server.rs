use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::apply::adapter::{apply_matches, ManualOverride, WriteError};
use crate::apply::copper::CopperWriter;
use crate::cli::ServeArgs;
use crate::core::company::CrmCompany;
use crate::core::customer::ErpCustomer;
use crate::matching::engine::{reconcile, MatchResult};

/// Request body cap. Collections in the tens of thousands of records fit
/// comfortably; anything larger should be batched by the host.
pub const MAX_BODY_SIZE: usize = 32 * 1024 * 1024; // 32MB

/// Request body for `POST /api/match`
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub customers: Vec<ErpCustomer>,
    pub companies: Vec<CrmCompany>,
}

/// Request body for `POST /api/apply`
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub matches: Vec<MatchResult>,

    #[serde(default)]
    pub overrides: Vec<ManualOverride>,
}

/// Error body returned by both endpoints
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to clients
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server
/// fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// The two API routes without middleware. Split out so integration tests can
/// drive the handlers without a client socket (the rate limiter needs peer
/// addresses).
pub fn api_router() -> Router {
    Router::new()
        .route("/api/match", post(match_handler))
        .route("/api/apply", post(apply_handler))
}

/// Create the application router with all routes and middleware configured.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
#[must_use]
pub fn create_router() -> Router {
    // Per-IP rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .unwrap();

    api_router().layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router();

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting crm-link server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// `POST /api/match` — run one reconciliation over the posted collections.
async fn match_handler(Json(request): Json<MatchRequest>) -> Response {
    match reconcile(&request.customers, &request.companies) {
        Ok(report) => Json(report).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "invalid_input",
                "A record is missing its id; fix the export and retry",
                Some(&err.to_string()),
            )),
        )
            .into_response(),
    }
}

/// `POST /api/apply` — issue one CRM write per entry, reporting per-entry
/// success/failure so the operator can see partial failures.
async fn apply_handler(Json(request): Json<ApplyRequest>) -> Response {
    // The Copper writer is a blocking HTTP client
    let result = tokio::task::spawn_blocking(move || {
        let writer = CopperWriter::from_env()?;
        Ok::<_, WriteError>(apply_matches(
            &writer,
            &request.matches,
            &request.overrides,
        ))
    })
    .await;

    match result {
        Ok(Ok(report)) => Json(report).into_response(),
        Ok(Err(err @ WriteError::MissingCredentials(_))) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(create_safe_error_response(
                "crm_unconfigured",
                "CRM credentials are not configured on this server",
                Some(&err.to_string()),
            )),
        )
            .into_response(),
        Ok(Err(err)) => (
            StatusCode::BAD_GATEWAY,
            Json(create_safe_error_response(
                "crm_unavailable",
                "Could not reach the CRM",
                Some(&err.to_string()),
            )),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "internal",
                "Apply task failed",
                Some(&err.to_string()),
            )),
        )
            .into_response(),
    }
}
