// --- File: crates/calbridge_booking/src/logic.rs ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::availability::{check_in_zone, parse_zone};
use crate::error::ScheduleError;
use crate::normalizer::normalize_in_zone;
use crate::service::BookingService;
use crate::translator::translate;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const DEFAULT_DURATION_MINUTES: i64 = 30;
pub const SCRIPT_DEFAULT_TIMEZONE: &str = "UTC";

// --- Data Structures ---

/// Body of both scheduling endpoints, as sent by the caller.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScheduleMeetingRequest {
    /// Full name of the attendee
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: Option<String>,
    /// Email of the attendee
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: Option<String>,
    /// Natural language time
    #[cfg_attr(feature = "openapi", schema(example = "next Monday at 3pm"))]
    pub time: Option<String>,
    /// Meeting duration in minutes (accepted, not forwarded)
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub duration: Option<i64>,
    /// IANA timezone name
    #[cfg_attr(feature = "openapi", schema(example = "Europe/Amsterdam"))]
    pub timezone: Option<String>,
}

/// A request with every required field present and defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    pub name: String,
    pub email: String,
    pub time: String,
    pub duration: i64,
    pub timezone: String,
}

impl ScheduleMeetingRequest {
    /// Name and email must be non-blank and time must be present. An empty
    /// time string is let through and fails later as unparsable.
    pub fn validate(self, default_timezone: &str) -> Result<MeetingRequest, ScheduleError> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        match (non_blank(self.name), non_blank(self.email), self.time) {
            (Some(name), Some(email), Some(time)) => Ok(MeetingRequest {
                name,
                email,
                time,
                duration: self.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
                timezone: self
                    .timezone
                    .unwrap_or_else(|| default_timezone.to_string()),
            }),
            _ => Err(ScheduleError::MissingFields),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScheduleResponse {
    pub success: bool,
    #[cfg_attr(feature = "openapi", schema(example = "Meeting scheduled for 2025-01-10T15:00:00+00:00"))]
    pub message: String,
    /// Booking details as returned by Cal.com.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub booking: Value,
}

/// Read-only settings shared by every request, built once at startup.
#[derive(Debug, Clone)]
pub struct SchedulingSettings {
    pub event_type_id: i64,
    /// Timezone assumed by the MCP tool endpoint.
    pub mcp_default_timezone: String,
}

/// The two public endpoint flavours. They share one pipeline and differ
/// only in defaults and in what they echo back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `POST /schedule`
    Script,
    /// `POST /tools/schedule_meeting`
    Mcp,
}

impl ResponseShape {
    pub fn default_timezone<'a>(&self, settings: &'a SchedulingSettings) -> &'a str {
        match self {
            ResponseShape::Script => SCRIPT_DEFAULT_TIMEZONE,
            ResponseShape::Mcp => &settings.mcp_default_timezone,
        }
    }

    pub fn availability_window(&self) -> &'static str {
        match self {
            ResponseShape::Script => "Monday-Friday, 9:00 AM - 5:00 PM UTC",
            ResponseShape::Mcp => "Monday-Friday, 9:00 AM - 5:00 PM in your timezone",
        }
    }

    /// What goes into the `booking` field of a successful response.
    pub fn booking_details(&self, upstream_body: Value) -> Value {
        match self {
            ResponseShape::Script => upstream_body,
            ResponseShape::Mcp => match upstream_body {
                Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
                _ => Value::Null,
            },
        }
    }
}

// --- Core Logic ---

/// Validates, normalizes and availability-checks a meeting request, then books it.
///
/// Steps run in a fixed order and the first failure ends the request:
/// missing fields, timezone, time parsing, availability, upstream booking.
pub async fn schedule_meeting(
    booking_service: &dyn BookingService,
    settings: &SchedulingSettings,
    shape: ResponseShape,
    request: ScheduleMeetingRequest,
    now: DateTime<Utc>,
) -> Result<ScheduleResponse, ScheduleError> {
    let request = request.validate(shape.default_timezone(settings))?;
    let zone = parse_zone(&request.timezone)?;

    let instant = normalize_in_zone(&request.time, zone, now)?;
    info!("Parsed '{}' -> {}", request.time, instant.to_rfc3339());
    debug!("Requested duration: {} minutes", request.duration);

    let verdict = check_in_zone(&instant, zone);
    if !verdict.available {
        info!("Slot unavailable: {}", verdict.reason);
        return Err(ScheduleError::SlotUnavailable {
            reason: verdict.reason,
            availability: shape.availability_window().to_string(),
        });
    }

    let payload = translate(&request, &instant, settings.event_type_id);
    debug!("Sending booking request: {:?}", payload);

    let upstream = booking_service.create_booking(&payload).await?;
    info!("Booking API responded with status {}", upstream.status);

    if !upstream.is_success() {
        error!(
            "Cal.com booking failed ({}): {}",
            upstream.status, upstream.body
        );
        return Err(ScheduleError::UpstreamBookingFailure {
            status: upstream.status,
            details: upstream.body,
        });
    }

    log_booking(&upstream.body);

    Ok(ScheduleResponse {
        success: true,
        message: format!("Meeting scheduled for {}", payload.start),
        booking: shape.booking_details(upstream.body),
    })
}

fn log_booking(body: &Value) {
    let data = &body["data"];
    let attendee = &data["bookingFieldsResponses"];
    info!(
        title = %data["title"],
        attendee_name = %attendee["name"],
        attendee_email = %attendee["email"],
        start = %data["start"],
        end = %data["end"],
        duration = %data["duration"],
        meeting_url = %data["meetingUrl"],
        booking_id = %data["id"],
        "Booking created successfully"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use crate::service::UpstreamResponse;
    use crate::translator::BookingPayload;
    use calbridge_common::BoxFuture;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every payload and answers with a canned response.
    struct RecordingService {
        response: UpstreamResponse,
        sent: Mutex<Vec<BookingPayload>>,
    }

    impl RecordingService {
        fn answering(status: u16, body: Value) -> Self {
            Self {
                response: UpstreamResponse { status, body },
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<BookingPayload> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl BookingService for RecordingService {
        fn create_booking<'a>(
            &'a self,
            payload: &'a BookingPayload,
        ) -> BoxFuture<'a, UpstreamResponse, BookingError> {
            self.sent.lock().unwrap().push(payload.clone());
            let response = self.response.clone();
            Box::pin(async move { Ok(response) })
        }
    }

    fn settings() -> SchedulingSettings {
        SchedulingSettings {
            event_type_id: 777,
            mcp_default_timezone: "Europe/Amsterdam".to_string(),
        }
    }

    // Wednesday, 2025-01-08 12:00 UTC.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap()
    }

    fn request(time: &str, timezone: Option<&str>) -> ScheduleMeetingRequest {
        ScheduleMeetingRequest {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            time: Some(time.to_string()),
            duration: None,
            timezone: timezone.map(str::to_string),
        }
    }

    fn created() -> Value {
        json!({ "status": "success", "data": { "id": 5, "title": "Intro" } })
    }

    #[test]
    fn validate_applies_defaults() {
        let validated = request("tomorrow 10am", None).validate("UTC").unwrap();
        assert_eq!(validated.duration, 30);
        assert_eq!(validated.timezone, "UTC");
    }

    #[test]
    fn validate_rejects_any_missing_or_blank_required_field() {
        let cases = [
            ScheduleMeetingRequest {
                name: None,
                ..request("tomorrow", None)
            },
            ScheduleMeetingRequest {
                email: Some("  ".to_string()),
                ..request("tomorrow", None)
            },
            ScheduleMeetingRequest {
                time: None,
                ..request("tomorrow", None)
            },
            ScheduleMeetingRequest::default(),
        ];
        for case in cases {
            assert!(matches!(
                case.validate("UTC"),
                Err(ScheduleError::MissingFields)
            ));
        }
    }

    #[tokio::test]
    async fn books_with_utc_start_and_declared_zone() {
        let service = RecordingService::answering(201, created());
        let response = schedule_meeting(
            &service,
            &settings(),
            ResponseShape::Mcp,
            request("2025-01-10 10:00", Some("America/New_York")),
            now(),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(
            response.message,
            "Meeting scheduled for 2025-01-10T15:00:00+00:00"
        );
        assert_eq!(response.booking, json!({ "id": 5, "title": "Intro" }));

        let sent = service.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].event_type_id, 777);
        assert_eq!(sent[0].attendee.time_zone, "America/New_York");
    }

    #[tokio::test]
    async fn shapes_pick_their_own_default_zone_and_booking_field() {
        let service = RecordingService::answering(201, created());

        let mcp = schedule_meeting(
            &service,
            &settings(),
            ResponseShape::Mcp,
            request("2025-01-10 10:00", None),
            now(),
        )
        .await
        .unwrap();
        let script = schedule_meeting(
            &service,
            &settings(),
            ResponseShape::Script,
            request("2025-01-10 10:00", None),
            now(),
        )
        .await
        .unwrap();

        let sent = service.sent();
        // 10:00 in Amsterdam (UTC+1) and 10:00 in UTC.
        assert_eq!(sent[0].start, "2025-01-10T09:00:00+00:00");
        assert_eq!(sent[0].attendee.time_zone, "Europe/Amsterdam");
        assert_eq!(sent[1].start, "2025-01-10T10:00:00+00:00");
        assert_eq!(sent[1].attendee.time_zone, "UTC");

        assert_eq!(mcp.booking, json!({ "id": 5, "title": "Intro" }));
        assert_eq!(script.booking, created());
    }

    #[tokio::test]
    async fn weekend_is_rejected_before_any_booking_call() {
        let service = RecordingService::answering(201, created());
        let result = schedule_meeting(
            &service,
            &settings(),
            ResponseShape::Script,
            request("2025-01-11 10:00", None),
            now(),
        )
        .await;

        match result {
            Err(ScheduleError::SlotUnavailable {
                reason,
                availability,
            }) => {
                assert_eq!(reason, "Not available on Saturday");
                assert_eq!(availability, "Monday-Friday, 9:00 AM - 5:00 PM UTC");
            }
            other => panic!("expected SlotUnavailable, got {:?}", other),
        }
        assert!(service.sent().is_empty());
    }

    #[tokio::test]
    async fn timezone_is_checked_before_time_is_parsed() {
        let service = RecordingService::answering(201, created());
        let result = schedule_meeting(
            &service,
            &settings(),
            ResponseShape::Mcp,
            request("", Some("Mars/Phobos")),
            now(),
        )
        .await;

        assert!(matches!(
            result,
            Err(ScheduleError::InvalidTimezone { timezone }) if timezone == "Mars/Phobos"
        ));
    }

    #[tokio::test]
    async fn upstream_rejection_is_forwarded() {
        for (status, body) in [
            (500, json!({ "message": "boom" })),
            (201, json!({ "status": "error", "error": { "message": "slot taken" } })),
            (200, json!({ "status": "success", "data": {} })),
        ] {
            let service = RecordingService::answering(status, body.clone());
            let result = schedule_meeting(
                &service,
                &settings(),
                ResponseShape::Mcp,
                request("2025-01-10 10:00", None),
                now(),
            )
            .await;

            match result {
                Err(ScheduleError::UpstreamBookingFailure {
                    status: got_status,
                    details,
                }) => {
                    assert_eq!(got_status, status);
                    assert_eq!(details, body);
                }
                other => panic!("expected UpstreamBookingFailure, got {:?}", other),
            }
        }
    }

    #[test]
    fn mcp_booking_without_data_is_null() {
        assert_eq!(
            ResponseShape::Mcp.booking_details(json!({ "status": "success" })),
            Value::Null
        );
        assert_eq!(
            ResponseShape::Mcp.booking_details(Value::String("ok".into())),
            Value::Null
        );
    }
}
