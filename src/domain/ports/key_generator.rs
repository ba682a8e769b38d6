//! Port for cache-key construction.

use serde_json::Value;

use crate::domain::errors::CacheResult;
use crate::domain::models::method::MethodDescriptor;

/// Produces cache keys and key prefixes for intercepted methods.
///
/// Generators must be deterministic: the same method identity, argument
/// values, and configured prefix always yield the same key, including
/// across process restarts when the store is persistent.
pub trait KeyGenerator: Send + Sync {
    /// Key for one `(method, arguments, prefix)` combination.
    ///
    /// # Errors
    /// Returns [`crate::CacheError::KeyGeneration`] when an argument
    /// cannot be rendered into a key.
    fn cache_key(
        &self,
        descriptor: &MethodDescriptor,
        arguments: &[Value],
        prefix: &str,
    ) -> CacheResult<String>;

    /// Prefix shared by every key this method produces under `prefix`,
    /// used to scope bulk eviction. No argument binding.
    fn cache_key_prefix(&self, descriptor: &MethodDescriptor, prefix: &str)
        -> CacheResult<String>;
}
