//! Error types for the ring library.

use thiserror::Error;

/// Result type alias for the ring library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by ring operations.
///
/// Lookup is the only fallible operation; membership changes on unknown
/// or duplicate nodes are defined no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No node is present on the ring (none ever added, or all removed).
    ///
    /// A retryable precondition failure: callers should wait for
    /// membership rather than treat it as fatal.
    #[error("hash ring is empty")]
    EmptyRing,
}
