use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        DefaultBodyLimit, Query, State,
    },
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::ReferenceTables;
use crate::cli::{EngineArgs, ServeArgs};
use crate::core::measurement::Measurement;
use crate::core::types::{Metric, Sex};
use crate::engine::growth::{EngineConfig, EngineError, GrowthEngine};
use crate::utils::age::{age_in_months_from_str, AgeError};
use crate::utils::validation::{
    validate_finite, validate_history_len, validate_percentile, ValidationError,
};

/// Request body limit; a full history at the point cap fits well inside this
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB

/// Shared application state
pub struct AppState {
    pub tables: ReferenceTables,
    pub config: EngineConfig,
}

impl AppState {
    fn engine(&self) -> GrowthEngine<'_> {
        GrowthEngine::new(&self.tables, self.config)
    }
}

/// Enhanced error response
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
        details: None,
    }
}

/// Error type for the API handlers
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Rejected(StatusCode, String),
    Engine(EngineError),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<AgeError> for ApiError {
    fn from(e: AgeError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::Rejected(e.status(), e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::Rejected(e.status(), e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                create_safe_error_response("invalid_request", &msg, None),
            ),
            Self::Rejected(status, msg) => (
                status,
                create_safe_error_response("invalid_request", &msg, None),
            ),
            Self::Engine(e @ EngineError::NoReferenceData { .. }) => (
                StatusCode::NOT_FOUND,
                create_safe_error_response("no_reference_data", &e.to_string(), None),
            ),
            Self::Engine(e @ EngineError::AgeOutOfRange { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                create_safe_error_response("age_out_of_range", &e.to_string(), None),
            ),
            Self::Engine(e @ EngineError::InvalidCode(_)) => (
                StatusCode::BAD_REQUEST,
                create_safe_error_response("invalid_code", &e.to_string(), None),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
pub struct PercentileQuery {
    pub metric: String,
    pub sex: Option<String>,
    pub age_months: f64,
    pub value: f64,
}

#[derive(Deserialize)]
pub struct ValueQuery {
    pub metric: String,
    pub sex: Option<String>,
    pub age_months: f64,
    pub percentile: f64,
}

#[derive(Deserialize)]
pub struct AgeQuery {
    pub birth_date: String,
    pub measured_on: String,
}

#[derive(Deserialize)]
pub struct SeriesRequest {
    pub metric: String,
    #[serde(default)]
    pub sex: Option<String>,
    pub current_age_months: f64,
    #[serde(default = "default_series_percentile")]
    pub percentile: f64,
    #[serde(default)]
    pub history: Vec<Measurement>,
}

fn default_series_percentile() -> f64 {
    50.0
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tables cannot be loaded, the tokio runtime cannot be
/// created, or the server fails to start.
pub fn run(args: ServeArgs, engine_args: &EngineArgs) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;
    let config = engine_args.config();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, tables, config).await })
}

/// Routes and handlers without the network-facing middleware
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/percentile", get(percentile_handler))
        .route("/api/value", get(value_handler))
        .route("/api/series", post(series_handler))
        .route("/api/age", get(age_handler))
        .route("/api/tables", get(tables_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(tables: ReferenceTables, config: EngineConfig) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { tables, config });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = api_router(state).layer(
        ServiceBuilder::new()
            // Security headers
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
                HeaderValue::from_static("no-referrer"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("cache-control"),
                HeaderValue::from_static("no-store"),
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
    );

    Ok(app)
}

async fn run_server(
    args: ServeArgs,
    tables: ReferenceTables,
    config: EngineConfig,
) -> anyhow::Result<()> {
    let app = create_router(tables, config)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting growth-percentile API at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/tables"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn parse_subject(
    engine: &GrowthEngine<'_>,
    metric: &str,
    sex: Option<&str>,
) -> Result<(Metric, Sex), ApiError> {
    let metric = Metric::parse(metric).map_err(EngineError::from)?;
    let sex = engine.sex(sex)?;
    Ok((metric, sex))
}

async fn percentile_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PercentileQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(q) = query?;
    let engine = state.engine();
    let (metric, sex) = parse_subject(&engine, &q.metric, q.sex.as_deref())?;
    let age_months = validate_finite("age_months", q.age_months)?;
    let value = validate_finite("value", q.value)?;

    let a = engine.assess(metric, sex, Measurement::new(age_months, value))?;

    Ok(Json(serde_json::json!({
        "metric": metric,
        "sex": sex,
        "age_months": a.age_months,
        "value": a.value,
        "unit": metric.unit(),
        "z_score": a.z_score,
        "percentile": a.percentile,
    })))
}

async fn value_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ValueQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(q) = query?;
    let engine = state.engine();
    let (metric, sex) = parse_subject(&engine, &q.metric, q.sex.as_deref())?;
    let age_months = validate_finite("age_months", q.age_months)?;
    let percentile = validate_percentile(q.percentile)?;

    let value = engine.value_at_percentile(metric, sex, age_months, percentile)?;

    Ok(Json(serde_json::json!({
        "metric": metric,
        "sex": sex,
        "age_months": age_months,
        "percentile": percentile,
        "value": value,
        "unit": metric.unit(),
    })))
}

async fn series_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SeriesRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = body?;
    let engine = state.engine();
    let (metric, sex) = parse_subject(&engine, &req.metric, req.sex.as_deref())?;
    let current = validate_finite("current_age_months", req.current_age_months)?;
    let percentile = validate_percentile(req.percentile)?;
    validate_history_len(req.history.len())?;

    let points = engine.build_chart_series(metric, sex, current, percentile, &req.history)?;

    Ok(Json(serde_json::json!({
        "metric": metric,
        "sex": sex,
        "current_age_months": current,
        "percentile": percentile,
        "unit": metric.unit(),
        "count": points.len(),
        "points": points,
    })))
}

async fn age_handler(
    query: Result<Query<AgeQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Query(q) = query?;
    let months = age_in_months_from_str(&q.birth_date, &q.measured_on)?;

    Ok(Json(serde_json::json!({
        "birth_date": q.birth_date,
        "measured_on": q.measured_on,
        "age_months": months,
    })))
}

async fn tables_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let tables: Vec<serde_json::Value> = state
        .tables
        .iter()
        .map(|t| {
            serde_json::json!({
                "metric": t.metric(),
                "sex": t.sex(),
                "unit": t.metric().unit(),
                "rows": t.len(),
                "max_age_months": t.max_age(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": tables.len(),
        "source": state.tables.source(),
        "tables": tables,
    }))
}
