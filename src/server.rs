//! HTTP surface: localize JSON records posted by clients.
//!
//! Preferences come from the `Accept-Language` header unless a per-field
//! request carries its own list in the body.

use crate::config::Config;
use crate::i18n::{
    parse_accept_language, transform_by_field, try_transform, FieldLocalization, FieldSpec,
    LanguagePreference, LocalizeError, Record, TranslationSet,
};
use crate::metrics::{LocalizationMetrics, MetricsReport};
use crate::security::is_authorized;
use axum::extract::State;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Header carrying the API key when one is configured
pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: Arc<LocalizationMetrics>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            metrics: Arc::new(LocalizationMetrics::new()),
        }
    }
}

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or wrong API key
    #[error("Unauthorized")]
    Unauthorized,

    /// No translation satisfies the client's languages
    #[error("{0}")]
    NotAcceptable(LocalizeError),

    /// The record cannot be localized field by field
    #[error("{0}")]
    Unprocessable(LocalizeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Body of `POST /localize/fields`.
#[derive(Debug, Deserialize)]
pub struct LocalizeFieldsRequest {
    pub record: Record,

    #[serde(default)]
    pub fields: FieldSpec,

    /// Overrides the `Accept-Language` header when present
    #[serde(default)]
    pub preferences: Option<Vec<LanguagePreference>>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/localize", post(localize))
        .route("/localize/fields", post(localize_fields))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn localize(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(record): Json<Record>,
) -> Result<Json<Record>, ApiError> {
    authorize(&state, &headers)?;

    let preferences = header_preferences(&headers);
    let has_translations = TranslationSet::from_record(&record).is_some();

    match try_transform(record, &preferences) {
        Ok(localized) => {
            if has_translations {
                state.metrics.record_localized();
            } else {
                state.metrics.record_passthrough();
            }
            Ok(Json(localized))
        }
        Err(e) => {
            debug!("Localization failed: {}", e);
            record_failure(&state.metrics, &e);
            Err(ApiError::NotAcceptable(e))
        }
    }
}

async fn localize_fields(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LocalizeFieldsRequest>,
) -> Result<Json<FieldLocalization>, ApiError> {
    authorize(&state, &headers)?;

    let preferences = request
        .preferences
        .unwrap_or_else(|| header_preferences(&headers));

    match transform_by_field(&request.record, &preferences, &request.fields) {
        Ok(result) => {
            state.metrics.record_fields_localized();
            Ok(Json(result))
        }
        Err(e) => {
            warn!("Per-field localization failed: {}", e);
            record_failure(&state.metrics, &e);
            Err(ApiError::Unprocessable(e))
        }
    }
}

async fn metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MetricsReport>, ApiError> {
    authorize(&state, &headers)?;
    Ok(Json(state.metrics.report()))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let presented = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if is_authorized(state.config.api_key.as_deref(), presented) {
        Ok(())
    } else {
        warn!("Rejected request with missing or invalid API key");
        Err(ApiError::Unauthorized)
    }
}

fn header_preferences(headers: &HeaderMap) -> Vec<LanguagePreference> {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(parse_accept_language)
        .unwrap_or_default()
}

fn record_failure(metrics: &LocalizationMetrics, error: &LocalizeError) {
    match error {
        LocalizeError::NoMatchFound { .. } => metrics.record_no_match(),
        LocalizeError::MissingPrimaryTranslation { .. } => metrics.record_missing_primary(),
    }
}
