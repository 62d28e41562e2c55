// --- File: crates/services/calbridge_backend/src/app_state.rs ---
use calbridge_booking::{BookingState, CalComBookingService, SchedulingSettings};
use calbridge_config::AppConfig;
use std::error::Error;
use std::sync::Arc;
use tracing::info;

/// Builds the booking state from the loaded configuration.
///
/// Fails when the Cal.com credentials are missing so the process never
/// starts accepting requests it cannot book.
pub fn build_booking_state(config: &AppConfig) -> Result<BookingState, Box<dyn Error>> {
    let credentials = config.booking_credentials()?;

    if config.mcp.secret.is_some() {
        info!("MCP_SECRET is set (the X-MCP-SECRET header is not enforced)");
    }

    let booking_service = CalComBookingService::new(&config.cal, &credentials)?;
    info!(
        "Cal.com bookings go to {} (event type {}, timeout {}s)",
        config.cal.bookings_url, credentials.event_type_id, config.cal.timeout_secs
    );

    Ok(BookingState {
        settings: Arc::new(SchedulingSettings {
            event_type_id: credentials.event_type_id,
            mcp_default_timezone: config.mcp.default_timezone.clone(),
        }),
        booking_service: Arc::new(booking_service),
    })
}
