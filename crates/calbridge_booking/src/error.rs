// --- File: crates/calbridge_booking/src/error.rs ---
use axum::response::{IntoResponse, Response};
use calbridge_common::{ErrorBody, HttpStatusCode, IntoHttpResponse};
use serde_json::{json, Value};
use thiserror::Error;

/// Everything that can end a scheduling request early.
///
/// All variants are terminal for the request; nothing is retried.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Missing required fields: name, email, time")]
    MissingFields,

    #[error("Invalid timezone: {timezone}")]
    InvalidTimezone { timezone: String },

    #[error("Could not parse date: {input}")]
    UnparsableTime { input: String, details: String },

    #[error("Requested time is not available")]
    SlotUnavailable { reason: String, availability: String },

    /// The booking API answered, but not with a created booking.
    #[error("Failed to create Cal.com booking")]
    UpstreamBookingFailure { status: u16, details: Value },

    #[error("Internal Server Error")]
    Internal(String),
}

/// Errors from the outbound booking call itself (no usable answer at all).
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking API request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

impl From<BookingError> for ScheduleError {
    fn from(err: BookingError) -> Self {
        ScheduleError::Internal(err.to_string())
    }
}

impl HttpStatusCode for ScheduleError {
    fn status_code(&self) -> u16 {
        match self {
            ScheduleError::MissingFields => 400,
            ScheduleError::InvalidTimezone { .. } => 400,
            ScheduleError::UnparsableTime { .. } => 400,
            ScheduleError::SlotUnavailable { .. } => 400,
            ScheduleError::UpstreamBookingFailure { .. } => 500,
            ScheduleError::Internal(_) => 500,
        }
    }
}

impl ErrorBody for ScheduleError {
    fn error_body(&self) -> Value {
        let error = self.to_string();
        match self {
            ScheduleError::MissingFields | ScheduleError::InvalidTimezone { .. } => {
                json!({ "error": error })
            }
            ScheduleError::UnparsableTime { details, .. } => {
                json!({ "error": error, "details": details })
            }
            ScheduleError::SlotUnavailable {
                reason,
                availability,
            } => json!({
                "error": error,
                "reason": reason,
                "availability": availability,
            }),
            ScheduleError::UpstreamBookingFailure { status, details } => json!({
                "error": error,
                "upstream_status": status,
                "details": details,
            }),
            ScheduleError::Internal(details) => json!({ "error": error, "details": details }),
        }
    }
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
