// --- File: crates/calbridge_booking/src/parser.rs ---
//! Fuzzy date/time extraction from free text.
//!
//! Callers write things like "let's meet next Monday at 3pm please" or
//! "January 10, 2025 at 3pm". The text is split into words and the longest
//! run of words that parses as a date wins; everything around it is ignored.
//! When that run carries no time of day, the nearest clock time elsewhere in
//! the text ("3pm", "10:00", "3 pm") is attached to it.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;
use thiserror::Error;

/// Longest input (in words) that is searched for a date.
pub const MAX_WORDS: usize = 512;

/// Longest run of words tried as a single date expression.
const MAX_RUN: usize = 8;

/// Words that join a date to a time and carry no meaning of their own.
const CONNECTIVES: [&str; 3] = ["at", "on", "@"];

const MERIDIEMS: [&str; 2] = ["am", "pm"];

/// Plain words the relative-date grammar understands. Any other word makes a
/// run unparsable, so "marketing" is never read as March.
const DATE_WORDS: [&str; 64] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday", "sunday", "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat",
    "sun", "now", "today", "tomorrow", "yesterday", "next", "last", "ago", "am", "pm", "min",
    "mins", "minute", "minutes", "hour", "hours", "day", "days", "week", "weeks", "month",
    "months", "year", "years",
];

const NAIVE_DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %I:%M%p",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I%p",
    "%Y-%m-%d %I %p",
];

const NAIVE_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// "January 10 2025", "Jan 10 2025", "10 January 2025".
const MONTH_NAME_DATE_FORMATS: [&str; 2] = ["%B %d %Y", "%d %B %Y"];

const OFFSET_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// A parsed timestamp, before any timezone policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTime {
    /// The text carried an explicit offset or `Z`.
    Aware(DateTime<FixedOffset>),
    /// Wall-clock time with no zone information.
    Naive(NaiveDateTime),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTimeError {
    #[error("no date or time found in empty input")]
    Empty,
    #[error("input too long: {words} words (limit {limit})")]
    TooLong { words: usize, limit: usize },
    #[error("invalid time of day: {0}")]
    InvalidTime(String),
    #[error("{0}")]
    Unrecognized(String),
}

/// A run of words `tokens[start..end]` that parsed as a date.
struct DateRun {
    parsed: ParsedTime,
    start: usize,
    end: usize,
    has_time: bool,
}

/// Extracts a date/time from `text`.
///
/// Relative phrases ("tomorrow 10am", "next friday 3pm") are resolved against
/// `now` as seen on a wall clock in `zone` and come back as [`ParsedTime::Naive`].
/// "next <weekday>" means the first such weekday after today.
pub fn parse_fuzzy(
    text: &str,
    zone: Tz,
    now: DateTime<Utc>,
) -> Result<ParsedTime, ParseTimeError> {
    let tokens = tokenize(text);

    if tokens.is_empty() {
        return Err(ParseTimeError::Empty);
    }
    if tokens.len() > MAX_WORDS {
        return Err(ParseTimeError::TooLong {
            words: tokens.len(),
            limit: MAX_WORDS,
        });
    }

    // A malformed clock time must not be dropped in favour of a bare date.
    if let Some(bad) = tokens
        .iter()
        .find(|token| looks_like_clock(token) && parse_clock(token).is_none())
    {
        return Err(ParseTimeError::InvalidTime(bad.clone()));
    }

    // Relative phrases are evaluated on a UTC clock showing the local wall
    // time, so DST gaps in `zone` can never produce a non-existent instant here.
    let wall_clock_now = Utc.from_utc_datetime(&now.with_timezone(&zone).naive_local());

    let run = find_date_run(&tokens, wall_clock_now)?;
    if run.has_time {
        return Ok(run.parsed);
    }

    Ok(match (run.parsed, find_clock(&tokens, run.start, run.end)) {
        (ParsedTime::Naive(dt), Some(time)) => ParsedTime::Naive(dt.date().and_time(time)),
        (parsed, _) => parsed,
    })
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(trim_token)
        .filter(|token| !token.is_empty())
        .filter(|token| !CONNECTIVES.contains(&token.to_lowercase().as_str()))
        .map(strip_ordinal)
        .collect()
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, ',' | '.' | '!' | '?' | ';' | '"' | '\'' | '(' | ')'))
}

/// "10th" -> "10".
fn strip_ordinal(token: &str) -> String {
    let lower = token.to_ascii_lowercase();
    ["st", "nd", "rd", "th"]
        .iter()
        .filter_map(|suffix| lower.strip_suffix(*suffix))
        .find(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_else(|| token.to_string())
}

/// Longest run first; among runs of equal length the earliest wins.
fn find_date_run(tokens: &[String], now: DateTime<Utc>) -> Result<DateRun, ParseTimeError> {
    let mut first_error = None;

    for len in (1..=tokens.len().min(MAX_RUN)).rev() {
        for start in 0..=tokens.len() - len {
            let end = start + len;
            match parse_run(&tokens[start..end], now) {
                Ok((parsed, has_time)) => {
                    return Ok(DateRun {
                        parsed,
                        start,
                        end,
                        has_time,
                    })
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
    }

    Err(ParseTimeError::Unrecognized(
        first_error.unwrap_or_else(|| "unrecognized date/time".to_string()),
    ))
}

/// Parses one run of words; the flag tells whether it fixed a time of day.
fn parse_run(run: &[String], now: DateTime<Utc>) -> Result<(ParsedTime, bool), String> {
    let candidate = run.join(" ");

    if let Some(parsed) = parse_absolute(&candidate, run.len(), now.year()) {
        return Ok(parsed);
    }

    if run.iter().all(|word| word.chars().all(|c| c.is_ascii_digit())) {
        return Err(format!("'{candidate}' is not a date"));
    }
    if let Some(word) = run.iter().find(|word| {
        word.chars().all(char::is_alphabetic) && !DATE_WORDS.contains(&word.to_lowercase().as_str())
    }) {
        return Err(format!("unknown word '{word}'"));
    }

    let english = |words: &[String]| {
        parse_date_string(&words.join(" ").to_lowercase(), now, Dialect::Us)
            .map_err(|e| e.to_string())
    };
    let parsed = english(run)?;

    // The grammar stops at the first word it cannot use. A run whose last
    // word changes nothing is left to a shorter run.
    if run.len() > 1 && english(&run[..run.len() - 1]).ok() == Some(parsed) {
        return Err(format!("'{}' is not part of the date", run[run.len() - 1]));
    }

    let has_time = (0..run.len()).any(|i| clock_at(run, i).is_some());
    Ok((ParsedTime::Naive(parsed.naive_utc()), has_time))
}

fn parse_absolute(candidate: &str, words: usize, this_year: i32) -> Option<(ParsedTime, bool)> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(candidate) {
        return Some((ParsedTime::Aware(dt), true));
    }

    let with_offset = match candidate
        .strip_suffix('Z')
        .or_else(|| candidate.strip_suffix('z'))
    {
        Some(stripped) => format!("{stripped}+00:00"),
        None => candidate.to_string(),
    };
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, format) {
            return Some((ParsedTime::Aware(dt), true));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(candidate, format) {
            return Some((ParsedTime::Naive(naive), true));
        }
    }

    let midnight = |date: NaiveDate| (ParsedTime::Naive(date.and_time(NaiveTime::MIN)), false);

    if let Some(date) = NAIVE_DATE_FORMATS
        .iter()
        .chain(MONTH_NAME_DATE_FORMATS.iter())
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
    {
        return Some(midnight(date));
    }

    // "January 10" / "10 January" fall in the current year.
    if words == 2 {
        let with_year = format!("{candidate} {this_year}");
        return MONTH_NAME_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&with_year, format).ok())
            .map(midnight);
    }

    None
}

/// Digits with `:` or an am/pm suffix, e.g. "15:00", "3pm", "99:99".
fn looks_like_clock(token: &str) -> bool {
    let lower = token.to_ascii_lowercase();
    let (clock, meridiem) = split_meridiem(&lower);
    clock.starts_with(|c: char| c.is_ascii_digit())
        && clock.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.')
        && (meridiem.is_some() || clock.contains(':'))
}

fn split_meridiem(lower: &str) -> (&str, Option<bool>) {
    if let Some(clock) = lower.strip_suffix("am") {
        (clock, Some(false))
    } else if let Some(clock) = lower.strip_suffix("pm") {
        (clock, Some(true))
    } else {
        (lower, None)
    }
}

/// Parses a single clock token: "15:00", "15:00:30", "3pm", "3:30pm", "8.30pm", "noon".
fn parse_clock(token: &str) -> Option<NaiveTime> {
    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return Some(NaiveTime::MIN),
        _ => {}
    }

    let (clock, meridiem) = split_meridiem(&lower);
    // Without am/pm only "H:MM" counts, so prices like "10.50" stay out.
    let mut parts = clock.split(|c: char| c == ':' || (meridiem.is_some() && c == '.'));

    let hour: u32 = parts.next().filter(|h| h.len() <= 2)?.parse().ok()?;
    let minute = match parts.next() {
        Some(m) if m.len() == 2 => m.parse().ok()?,
        Some(_) => return None,
        None if meridiem.is_some() => 0,
        None => return None,
    };
    let second = match parts.next() {
        Some(s) if s.len() == 2 => s.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    let hour = match meridiem {
        Some(_) if !(1..=12).contains(&hour) => return None,
        Some(pm) => hour % 12 + if pm { 12 } else { 0 },
        None => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// A clock time starting at `tokens[i]`, either one token or "3 pm".
fn clock_at(tokens: &[String], i: usize) -> Option<NaiveTime> {
    if let Some(time) = parse_clock(&tokens[i]) {
        return Some(time);
    }
    let next = tokens.get(i + 1)?;
    if MERIDIEMS.contains(&next.to_lowercase().as_str())
        && tokens[i].chars().all(|c| c.is_ascii_digit() || c == ':')
    {
        parse_clock(&format!("{}{}", tokens[i], next))
    } else {
        None
    }
}

/// The clock time closest after the date run, else closest before it.
fn find_clock(tokens: &[String], start: usize, end: usize) -> Option<NaiveTime> {
    (end..tokens.len())
        .chain((0..start).rev())
        .find_map(|i| clock_at(tokens, i))
}
