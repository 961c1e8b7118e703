//! HTTP API handlers and routes using axum.
//!
//! Routes:
//! - POST /api/NormalizeOrder - Normalize an order's line items
//! - GET /health - Health check
//! - GET /stats - Persisted batch statistics

use crate::error::Error;
use crate::repository::InMemoryRepository;
use crate::service::OrderService;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use normalizer::{NormalizedRecord, RawLineItem};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, warn};

/// Application state shared across handlers.
pub struct AppState {
    pub service: OrderService,
    pub repository: InMemoryRepository,
}

/// Request body: a bare array of line items, or an order wrapping them.
///
/// ```json
/// [{ "no": 1, "platformProductId": "FG0A-CLEAR-IPHONE16PROMAX", "qty": 2, "unitPrice": 50, "totalPrice": 100 }]
/// { "no": 7, "items": [ ... ] }
/// ```
///
/// The body shape is picked from its first token, so errors inside an item
/// keep serde's field and position.
#[derive(Debug)]
pub enum NormalizeRequest {
    Items(Vec<RawLineItem>),
    Order { no: Option<u32>, items: Vec<RawLineItem> },
}

#[derive(Deserialize)]
struct OrderBody {
    #[serde(default)]
    no: Option<u32>,
    items: Vec<RawLineItem>,
}

impl<'de> Deserialize<'de> for NormalizeRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, SeqAccess, Visitor};
        use std::fmt;

        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = NormalizeRequest;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of line items or an object with items")
            }

            fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let items = Deserialize::deserialize(de::value::SeqAccessDeserializer::new(seq))?;
                Ok(NormalizeRequest::Items(items))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let body: OrderBody =
                    Deserialize::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(NormalizeRequest::Order {
                    no: body.no,
                    items: body.items,
                })
            }
        }

        deserializer.deserialize_any(RequestVisitor)
    }
}

impl NormalizeRequest {
    fn order_no(&self) -> Option<u32> {
        match self {
            NormalizeRequest::Items(_) => None,
            NormalizeRequest::Order { no, .. } => *no,
        }
    }

    fn into_items(self) -> Vec<RawLineItem> {
        match self {
            NormalizeRequest::Items(items) | NormalizeRequest::Order { items, .. } => items,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/NormalizeOrder", post(normalize_order_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Serialize)]
struct NormalizeResponse {
    status: &'static str,
    message: &'static str,
    data: Vec<NormalizedRecord>,
}

/// Normalize an order.
/// POST /api/NormalizeOrder
async fn normalize_order_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NormalizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if let Some(no) = request.order_no() {
        debug!("Normalizing order no {}", no);
    }
    let items = request.into_items();

    let records = state.service.normalize_order(&items).await?;

    Ok(Json(NormalizeResponse {
        status: "OK",
        message: "Order normalized successfully.",
        data: records,
    }))
}

/// Health check endpoint.
/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Get persisted batch statistics.
/// GET /stats
async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.repository.stats())
}

// ============================================================================
// Error Handling
// ============================================================================

/// API error types.
#[derive(Debug)]
pub enum ApiError {
    /// Body is not a valid order.
    BadRequest(String),
    /// A line item could not be normalized.
    Unprocessable(String),
    InternalError(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::Normalize(e) => ApiError::Unprocessable(e.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        warn!("Request failed ({}): {}", status, message);

        let body = Json(ErrorResponse {
            status: "Error",
            message,
        });

        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}
