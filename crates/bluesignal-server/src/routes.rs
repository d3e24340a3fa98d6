//! HTTP route handlers

use crate::auth::{Identity, Role};
use crate::state::{topics, AppState, Envelope};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use bluesignal_core::{Report, SecondaryReport};
use serde::Deserialize;
use tracing::{error, info};

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Report intake
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitReportRequest {
    pub text: String,
    pub image_ref: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Most recent record from the independent secondary feed, when available
    pub secondary: Option<SecondaryReport>,
}

/// Submit a citizen report: persist, verify, persist the artifact, publish.
///
/// Malformed input is rejected before the pipeline runs; everything after
/// that always completes — classification outages degrade the artifact
/// rather than failing the submission.
pub async fn submit_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitReportRequest>,
) -> impl IntoResponse {
    let identity = match bearer_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response.into_response(),
    };
    if identity.role != Role::Citizen {
        return error_response(StatusCode::FORBIDDEN, "citizen role required").into_response();
    }

    if req.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "text is required").into_response();
    }

    let mut report = Report::new(identity.user_id, req.text);
    if let Some(image_ref) = req.image_ref {
        report = report.with_image(image_ref);
    }
    if let (Some(lat), Some(lon)) = (req.latitude, req.longitude) {
        report = report.with_coordinates(lat, lon);
    }

    let report_id = match state.store.persist_report(&report).await {
        Ok(id) => id,
        Err(e) => {
            error!("failed to persist report: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "persistence failure")
                .into_response();
        }
    };

    let artifact = state.pipeline.process(&report, req.secondary.as_ref()).await;

    // Publish only after the artifact is durable. The post payload carries the
    // same record shape the posts snapshot uses.
    let artifact_json = match serde_json::to_value(&artifact) {
        Ok(value) => value,
        Err(e) => {
            error!("failed to serialize artifact: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "serialization failure")
                .into_response();
        }
    };
    let post_json = match crate::persistence::post_record(report_id, &report) {
        Ok(value) => value,
        Err(e) => {
            error!("failed to serialize post: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "serialization failure")
                .into_response();
        }
    };
    if let Err(e) = state.store.persist_artifact(&artifact).await {
        error!("failed to persist artifact: {e}");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "persistence failure")
            .into_response();
    }

    state
        .hub
        .publish(topics::HOTSPOTS, Envelope::Hotspot(artifact_json.clone()));
    state.hub.publish(topics::POSTS, Envelope::Post(post_json));

    info!(artifact = %artifact.id, status = ?artifact.status, "report submitted");
    (StatusCode::OK, Json(artifact_json)).into_response()
}

// ============================================================================
// Authority views
// ============================================================================

pub async fn get_hotspots(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let identity = match bearer_identity(&state, &headers) {
        Ok(identity) => identity,
        Err(response) => return response.into_response(),
    };
    if identity.role != Role::Authority {
        return error_response(StatusCode::FORBIDDEN, "authority role required").into_response();
    }

    match state.store.snapshot(topics::HOTSPOTS).await {
        Ok(hotspots) => Json(serde_json::json!({ "hotspots": hotspots })).into_response(),
        Err(e) => {
            error!("failed to load hotspots: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "persistence failure")
                .into_response()
        }
    }
}

// ============================================================================
// Single-shot classification endpoints
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClassifyTextRequest {
    pub text: String,
}

pub async fn classify_text(
    State(state): State<AppState>,
    Json(req): Json<ClassifyTextRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "text is required").into_response();
    }

    let (urgency, category) = tokio::join!(
        state.gateway.classify_urgency(&req.text),
        state.gateway.classify_category(&req.text),
    );

    Json(serde_json::json!({
        "text": req.text,
        "urgency_classification": urgency,
        "category_classification": category,
    }))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ClassifyImageRequest {
    pub image_ref: String,
}

pub async fn classify_image(
    State(state): State<AppState>,
    Json(req): Json<ClassifyImageRequest>,
) -> impl IntoResponse {
    if req.image_ref.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "image_ref is required").into_response();
    }

    let result = state.gateway.classify_image(&req.image_ref).await;
    Json(serde_json::json!({ "image_classification": result })).into_response()
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Resolve the Authorization bearer header to an identity
pub fn bearer_identity(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Identity, (StatusCode, Json<serde_json::Value>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "no token provided"))?;

    state
        .auth
        .authenticate(token)
        .map_err(|_| error_response(StatusCode::UNAUTHORIZED, "invalid token"))
}

pub fn error_response(
    status: StatusCode,
    message: &str,
) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": message })))
}
