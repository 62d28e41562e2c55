// --- File: crates/calbridge_booking/src/normalizer.rs ---
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::availability::parse_zone;
use crate::error::ScheduleError;
use crate::parser::{parse_fuzzy, ParsedTime};

/// A zone-aware instant. Never zone-naive once normalized.
pub type NormalizedInstant = DateTime<Tz>;

/// Turns free text into an instant expressed in the zone named `zone_name`.
pub fn normalize(text: &str, zone_name: &str) -> Result<NormalizedInstant, ScheduleError> {
    let zone = parse_zone(zone_name)?;
    normalize_in_zone(text, zone, Utc::now())
}

/// Zone-naive text is read as wall-clock time in `zone`; text with an
/// explicit offset keeps its instant and is re-expressed in `zone`.
pub fn normalize_in_zone(
    text: &str,
    zone: Tz,
    now: DateTime<Utc>,
) -> Result<NormalizedInstant, ScheduleError> {
    let unparsable = |details: String| ScheduleError::UnparsableTime {
        input: text.to_string(),
        details,
    };

    match parse_fuzzy(text, zone, now).map_err(|e| unparsable(e.to_string()))? {
        ParsedTime::Aware(dt) => Ok(dt.with_timezone(&zone)),
        ParsedTime::Naive(naive) => localize(zone, naive)
            .ok_or_else(|| unparsable(format!("{naive} does not exist in {}", zone.name()))),
    }
}

/// Attaches `zone` to a wall-clock time. Ambiguous times (DST fall-back)
/// take the earlier instant; times inside a spring-forward gap move one hour on.
fn localize(zone: Tz, naive: NaiveDateTime) -> Option<NormalizedInstant> {
    zone.from_local_datetime(&naive).earliest().or_else(|| {
        naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| zone.from_local_datetime(&shifted).earliest())
    })
}
