// --- File: crates/calbridge_booking/src/lib.rs ---
pub mod availability;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod normalizer;
pub mod parser;
pub mod routes;
pub mod service;
pub mod tools;
pub mod translator;

pub use error::{BookingError, ScheduleError};
pub use handlers::BookingState;
pub use logic::{ResponseShape, SchedulingSettings};
pub use service::{BookingService, CalComBookingService, UpstreamResponse};
