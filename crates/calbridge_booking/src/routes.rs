// --- File: crates/calbridge_booking/src/routes.rs ---

use crate::handlers::{
    health_handler, list_tools_handler, mcp_root_handler, panic_response, schedule_handler,
    schedule_meeting_tool_handler, BookingState,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// All booking and discovery routes, without middleware.
pub fn routes(state: BookingState) -> Router {
    Router::new()
        .route("/", get(mcp_root_handler))
        .route("/tools", get(list_tools_handler))
        .route("/health", get(health_handler))
        .route("/schedule", post(schedule_handler))
        .route("/tools/schedule_meeting", post(schedule_meeting_tool_handler))
        .with_state(Arc::new(state))
}

/// [`routes`] wrapped in the middleware the service runs with.
pub fn app(state: BookingState) -> Router {
    routes(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
