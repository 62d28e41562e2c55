// --- File: crates/calbridge_booking/src/service.rs ---
//! The outbound booking call.
//!
//! Handlers depend on the [`BookingService`] trait; the process wires in
//! [`CalComBookingService`], tests wire in stubs.

use calbridge_common::{create_client, log_result, BoxFuture};
use calbridge_config::{BookingCredentials, CalConfig};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::BookingError;
use crate::translator::BookingPayload;

/// Header pinning the Cal.com API version.
pub const CAL_API_VERSION_HEADER: &str = "cal-api-version";

/// Status code and body of the booking API's answer, forwarded as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// Parsed JSON, or the raw text as a JSON string when the body was not JSON.
    pub body: Value,
}

impl UpstreamResponse {
    /// A booking exists only on `201 Created` with `"status": "success"`.
    pub fn is_success(&self) -> bool {
        self.status == 201 && self.body.get("status").and_then(Value::as_str) == Some("success")
    }
}

pub trait BookingService: Send + Sync {
    fn create_booking<'a>(
        &'a self,
        payload: &'a BookingPayload,
    ) -> BoxFuture<'a, UpstreamResponse, BookingError>;
}

pub struct CalComBookingService {
    client: Client,
    bookings_url: String,
    api_key: String,
    api_version: String,
}

impl CalComBookingService {
    pub fn new(config: &CalConfig, credentials: &BookingCredentials) -> Result<Self, BookingError> {
        Ok(Self {
            client: create_client(config.timeout_secs, true)?,
            bookings_url: config.bookings_url.clone(),
            api_key: credentials.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }
}

impl BookingService for CalComBookingService {
    fn create_booking<'a>(
        &'a self,
        payload: &'a BookingPayload,
    ) -> BoxFuture<'a, UpstreamResponse, BookingError> {
        Box::pin(async move {
            debug!("Sending booking request to {}", self.bookings_url);
            let response = log_result(
                self.client
                    .post(&self.bookings_url)
                    .bearer_auth(&self.api_key)
                    .header(CAL_API_VERSION_HEADER, &self.api_version)
                    .json(payload)
                    .send()
                    .await,
                "Booking API reached",
                "Booking API request failed",
            )?;

            let status = response.status().as_u16();
            let text = response.text().await?;
            let body = match serde_json::from_str::<Value>(&text) {
                Ok(json) => json,
                Err(_) => Value::String(text),
            };

            Ok(UpstreamResponse { status, body })
        })
    }
}
