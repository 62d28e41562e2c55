// --- File: crates/calbridge_booking/src/availability.rs ---
//! The fixed weekly availability window: Monday to Friday, 09:00 to 17:00
//! local time in the caller's timezone. A slot is bookable when it *starts*
//! inside the window.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use chrono_tz::Tz;
use serde::Serialize;
use std::str::FromStr;

use crate::error::ScheduleError;

/// First bookable hour (inclusive).
pub const WORK_START_HOUR: u32 = 9;
/// End of the working day (exclusive).
pub const WORK_END_HOUR: u32 = 17;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityVerdict {
    pub available: bool,
    /// Human-readable, always populated.
    pub reason: String,
}

impl AvailabilityVerdict {
    fn available() -> Self {
        Self {
            available: true,
            reason: "Available".to_string(),
        }
    }

    fn unavailable(reason: String) -> Self {
        Self {
            available: false,
            reason,
        }
    }
}

/// Resolves an IANA zone name such as `Europe/Kyiv`.
pub fn parse_zone(zone_name: &str) -> Result<Tz, ScheduleError> {
    Tz::from_str(zone_name).map_err(|_| ScheduleError::InvalidTimezone {
        timezone: zone_name.to_string(),
    })
}

/// Checks `instant` against the availability window of the zone named `zone_name`.
pub fn check<T: TimeZone>(
    instant: &DateTime<T>,
    zone_name: &str,
) -> Result<AvailabilityVerdict, ScheduleError> {
    let zone = parse_zone(zone_name)?;
    Ok(check_in_zone(instant, zone))
}

/// Same as [`check`] for an already resolved zone.
pub fn check_in_zone<T: TimeZone>(instant: &DateTime<T>, zone: Tz) -> AvailabilityVerdict {
    let local = instant.with_timezone(&zone);

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return AvailabilityVerdict::unavailable(format!(
            "Not available on {}",
            local.format("%A")
        ));
    }

    let hour = local.hour();
    if !(WORK_START_HOUR..WORK_END_HOUR).contains(&hour) {
        return AvailabilityVerdict::unavailable(format!(
            "Outside business hours (9 AM - 5 PM). Requested: {}:00",
            hour
        ));
    }

    AvailabilityVerdict::available()
}
