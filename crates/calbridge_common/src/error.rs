// --- File: crates/calbridge_common/src/error.rs ---
use serde_json::Value;

/// A trait for converting errors to HTTP status codes.
///
/// Domain error enums implement this so the HTTP layer does not need to know
/// about individual variants.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

/// The JSON document sent to the caller when a request fails.
///
/// Every body carries an `error` field; variants add `reason` or `details`
/// where they have something to say.
pub trait ErrorBody {
    fn error_body(&self) -> Value;
}
