// --- File: crates/calbridge_booking/src/translator.rs ---
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::logic::MeetingRequest;

/// Body of `POST /v2/bookings`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    /// ISO-8601, always UTC.
    pub start: String,
    pub event_type_id: i64,
    pub attendee: Attendee,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub name: String,
    pub email: String,
    /// The zone name the caller sent, used by Cal.com to render local times.
    pub time_zone: String,
}

/// Builds the outbound booking payload for a validated request.
pub fn translate<T: TimeZone>(
    request: &MeetingRequest,
    instant: &DateTime<T>,
    event_type_id: i64,
) -> BookingPayload {
    BookingPayload {
        start: instant.with_timezone(&Utc).to_rfc3339(),
        event_type_id,
        attendee: Attendee {
            name: request.name.clone(),
            email: request.email.clone(),
            time_zone: request.timezone.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Kyiv;
    use serde_json::json;

    fn request() -> MeetingRequest {
        MeetingRequest {
            name: "Olena Petrenko".to_string(),
            email: "olena@example.com".to_string(),
            time: "2025-01-10 11:00".to_string(),
            duration: 30,
            timezone: "Europe/Kyiv".to_string(),
        }
    }

    #[test]
    fn start_is_sent_in_utc() {
        let instant = Kyiv.with_ymd_and_hms(2025, 1, 10, 11, 0, 0).unwrap();
        let payload = translate(&request(), &instant, 42);
        assert_eq!(payload.start, "2025-01-10T09:00:00+00:00");
    }

    #[test]
    fn wire_format_uses_cal_com_field_names() {
        let instant = Kyiv.with_ymd_and_hms(2025, 1, 10, 11, 0, 0).unwrap();
        let payload = translate(&request(), &instant, 42);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "start": "2025-01-10T09:00:00+00:00",
                "eventTypeId": 42,
                "attendee": {
                    "name": "Olena Petrenko",
                    "email": "olena@example.com",
                    "timeZone": "Europe/Kyiv",
                }
            })
        );
    }
}
