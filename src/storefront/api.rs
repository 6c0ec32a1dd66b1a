use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CatalogError, MetadataError};

use super::Storefront;
use super::display::ListingEntry;
use super::metadata::MicrolinkClient;
use super::models::{LinkMetadata, NewProduct};

const URL_REQUIRED: &str = "URL is required";
const METADATA_FAILED: &str = "Failed to fetch metadata";
const PREVIEW_FAILED: &str = "Failed to fetch link preview";
const CREATE_FAILED: &str = "상품 추가에 실패했습니다";

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub storefront: Storefront,
    pub unfurler: MicrolinkClient,
}

pub type SharedState = Arc<AppState>;

// ── Request payload types ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LinkMetadataRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Deserialize)]
pub struct LinkPreviewQuery {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct CacheStatus {
    pub links: Vec<String>,
}

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/link-metadata", post(link_metadata))
        .route("/api/link-preview", get(link_preview))
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/cache", get(cache_status).delete(reset_cache))
        .route("/health", get(health_check))
}

fn required_url(url: Option<String>) -> Result<String, ApiError> {
    url.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest(URL_REQUIRED.into()))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

/// `POST /api/link-metadata {url}` → `{company, logo, title, description}`.
async fn link_metadata(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<LinkMetadata>, ApiError> {
    let request: LinkMetadataRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "unreadable link-metadata request");
        ApiError::Internal(METADATA_FAILED.into())
    })?;
    let url = required_url(request.url)?;

    match state.unfurler.lookup(&url).await {
        Ok(meta) => Ok(Json(meta)),
        Err(e @ MetadataError::Rejected { .. }) => {
            tracing::warn!(url = %url, error = %e, "metadata lookup rejected");
            Err(ApiError::BadRequest(METADATA_FAILED.into()))
        }
        Err(e) => {
            tracing::error!(url = %url, error = %e, "metadata lookup failed");
            Err(ApiError::Internal(METADATA_FAILED.into()))
        }
    }
}

/// `GET /api/link-preview?url=` → upstream body as-is.
async fn link_preview(
    State(state): State<SharedState>,
    Query(query): Query<LinkPreviewQuery>,
) -> Result<Json<Value>, ApiError> {
    let url = required_url(query.url)?;
    state.unfurler.preview(&url).await.map(Json).map_err(|e| {
        tracing::error!(url = %url, error = %e, "link preview proxy failed");
        ApiError::Internal(PREVIEW_FAILED.into())
    })
}

async fn list_products(State(state): State<SharedState>) -> Json<Vec<ListingEntry>> {
    Json(state.storefront.listing().await)
}

async fn create_product(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let product: NewProduct = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid product: {}", e)))?;

    match state.storefront.add_product(product).await {
        Ok(sent) => Ok((StatusCode::CREATED, Json(sent))),
        Err(e @ CatalogError::Invalid(_)) => Err(ApiError::BadRequest(e.to_string())),
        Err(e) => {
            tracing::error!(error = %e, "product creation failed");
            Err(ApiError::Internal(CREATE_FAILED.into()))
        }
    }
}

async fn cache_status(State(state): State<SharedState>) -> Json<CacheStatus> {
    Json(CacheStatus {
        links: state.storefront.cached_links().await,
    })
}

async fn reset_cache(State(state): State<SharedState>) -> StatusCode {
    state.storefront.reset_cache().await;
    tracing::info!("metadata cache cleared");
    StatusCode::NO_CONTENT
}
