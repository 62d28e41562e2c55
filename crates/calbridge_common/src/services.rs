// --- File: crates/calbridge_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Traits for outbound collaborators return boxed futures so they can be held
//! as `Arc<dyn Trait>` in handler state and swapped for stubs in tests.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
