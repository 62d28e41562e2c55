// File: crates/calbridge_booking/src/doc.rs
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::handlers;
use crate::logic::{ScheduleMeetingRequest, ScheduleResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::schedule_handler,
        handlers::schedule_meeting_tool_handler,
        handlers::mcp_root_handler,
        handlers::list_tools_handler,
        handlers::health_handler,
    ),
    components(schemas(ScheduleMeetingRequest, ScheduleResponse)),
    tags(
        (name = "Booking", description = "Meeting booking relayed to Cal.com"),
        (name = "MCP", description = "Tool discovery and invocation for calling agents")
    )
)]
pub struct BookingApiDoc;
