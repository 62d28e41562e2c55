// --- File: crates/calbridge_booking/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tracing::error;

use crate::error::ScheduleError;
use crate::logic::{
    schedule_meeting, ResponseShape, ScheduleMeetingRequest, ScheduleResponse, SchedulingSettings,
};
use crate::service::BookingService;
use crate::tools::{MCP_MANIFEST, TOOL_LIST};

// Shared, read-only state for the booking routes.
#[derive(Clone)]
pub struct BookingState {
    pub settings: Arc<SchedulingSettings>,
    pub booking_service: Arc<dyn BookingService>,
}

/// Runs the scheduling pipeline for one raw request body.
async fn handle_schedule(
    state: &BookingState,
    shape: ResponseShape,
    body: &[u8],
) -> Result<Json<ScheduleResponse>, ScheduleError> {
    let request: ScheduleMeetingRequest = serde_json::from_slice(body).map_err(|e| {
        error!("Rejecting malformed request body: {}", e);
        ScheduleError::Internal(e.to_string())
    })?;

    let response = schedule_meeting(
        state.booking_service.as_ref(),
        &state.settings,
        shape,
        request,
        Utc::now(),
    )
    .await?;

    Ok(Json(response))
}

/// Books a meeting and echoes the whole upstream body.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/schedule",
    request_body = ScheduleMeetingRequest,
    responses(
        (status = 200, description = "Meeting booked", body = ScheduleResponse),
        (status = 400, description = "Missing fields, invalid timezone, unparsable time or unavailable slot"),
        (status = 500, description = "Cal.com rejected the booking or an internal error occurred")
    ),
    tag = "Booking"
))]
pub async fn schedule_handler(
    State(state): State<Arc<BookingState>>,
    body: Bytes,
) -> Result<Json<ScheduleResponse>, ScheduleError> {
    handle_schedule(&state, ResponseShape::Script, &body).await
}

/// MCP tool invocation; echoes only the upstream `data`.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/tools/schedule_meeting",
    request_body = ScheduleMeetingRequest,
    responses(
        (status = 200, description = "Meeting booked", body = ScheduleResponse),
        (status = 400, description = "Missing fields, invalid timezone, unparsable time or unavailable slot"),
        (status = 500, description = "Cal.com rejected the booking or an internal error occurred")
    ),
    tag = "MCP"
))]
pub async fn schedule_meeting_tool_handler(
    State(state): State<Arc<BookingState>>,
    body: Bytes,
) -> Result<Json<ScheduleResponse>, ScheduleError> {
    handle_schedule(&state, ResponseShape::Mcp, &body).await
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "MCP tool manifest")),
    tag = "MCP"
))]
pub async fn mcp_root_handler() -> Json<Value> {
    Json(MCP_MANIFEST.clone())
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/tools",
    responses((status = 200, description = "Available tools")),
    tag = "MCP"
))]
pub async fn list_tools_handler() -> Json<Value> {
    Json(TOOL_LIST.clone())
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", example = json!({"status": "ok"}))),
    tag = "Booking"
))]
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Renders a handler panic as the regular internal-error body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!("Request handler panicked: {}", details);
    ScheduleError::Internal(details).into_response()
}
