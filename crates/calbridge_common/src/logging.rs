//! Logging utilities for the Calbridge service.
//!
//! Every crate logs through `tracing`; the binary calls [`init`] once at
//! startup to install the subscriber.

use tracing::{error, info, Level};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// `RUST_LOG` is honoured on top of the default directive, so
/// `RUST_LOG=calbridge_booking=debug` turns on payload logging.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level for the
/// `calbridge*` targets.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("calbridge={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init();
        init_with_level(Level::DEBUG);
    }

    #[test]
    fn log_result_passes_the_value_through() {
        let ok: Result<u8, String> = log_result(Ok(7), "fine", "broken");
        assert_eq!(ok, Ok(7));

        let err: Result<u8, String> = log_result(Err("nope".to_string()), "fine", "broken");
        assert_eq!(err, Err("nope".to_string()));
    }
}
