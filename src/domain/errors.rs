//! Errors surfaced by the caching aspect.

use thiserror::Error;

/// Errors that can occur while intercepting a call.
///
/// The aspect never masks a failure as a cache miss: store errors,
/// key-generation errors, and underlying-method failures all propagate
/// to the caller unchanged.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store failed (connectivity, storage).
    #[error("Cache store error: {0}")]
    Store(String),

    /// A cached or computed value could not be converted to the
    /// method's declared return type.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key generator could not produce a key for this invocation.
    #[error("Cache key generation failed for {method}: {reason}")]
    KeyGeneration {
        /// Method the key was being generated for.
        method: String,
        /// Why generation failed.
        reason: String,
    },

    /// The underlying method failed. Carries the original error so the
    /// host can re-raise exactly what an uncached call would have raised.
    #[error("Underlying call failed: {0}")]
    Invocation(anyhow::Error),

    /// The invocation was driven outside its protocol (double proceed,
    /// unwrapping a return value that was never set).
    #[error("Invalid invocation state: {0}")]
    InvalidInvocation(String),

    /// A method identity was registered twice.
    #[error("Method already registered: {0}")]
    DuplicateMethod(String),
}

/// Result alias used throughout the crate.
pub type CacheResult<T> = Result<T, CacheError>;
