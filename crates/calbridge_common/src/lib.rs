// --- File: crates/calbridge_common/src/lib.rs ---

pub mod error; // Status-code mapping for domain errors
pub mod http; // Axum responses and the outbound client
pub mod logging; // Tracing subscriber setup
pub mod services; // Service abstractions

pub use error::{ErrorBody, HttpStatusCode};

pub use http::{client::create_client, IntoHttpResponse};

pub use logging::{init, init_with_level, log_result};

pub use services::BoxFuture;
