//! Caching directives attached to method identities.

use std::time::Duration;

/// Declarative caching behavior for a single method.
///
/// A method carries at most one directive; a method with none passes
/// through the interception pipeline untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachingDirective {
    /// Read-through: on a hit, return the cached value without invoking
    /// the method; on a miss, invoke it and store the result.
    Cacheable {
        /// Key prefix grouping this method's entries.
        prefix: String,
        /// How long stored entries live.
        ttl: Duration,
    },

    /// Write-through: always invoke the method, then store its result.
    Put {
        /// Key prefix grouping this method's entries.
        prefix: String,
        /// How long stored entries live.
        ttl: Duration,
    },

    /// Invalidation: remove one entry or a whole prefix, either before
    /// or after the method runs.
    Evict {
        /// Key prefix to evict under.
        prefix: String,
        /// Remove every entry sharing the prefix instead of one key.
        all: bool,
        /// Evict before the underlying call instead of after it.
        before: bool,
    },
}

impl CachingDirective {
    /// Expiration applied when the caller does not pick one.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

    /// Read-through directive.
    pub fn cacheable(prefix: impl Into<String>, ttl: Duration) -> Self {
        Self::Cacheable {
            prefix: prefix.into(),
            ttl,
        }
    }

    /// Write-through directive.
    pub fn put(prefix: impl Into<String>, ttl: Duration) -> Self {
        Self::Put {
            prefix: prefix.into(),
            ttl,
        }
    }

    /// Eviction directive.
    pub fn evict(prefix: impl Into<String>, all: bool, before: bool) -> Self {
        Self::Evict {
            prefix: prefix.into(),
            all,
            before,
        }
    }

    /// The directive's key prefix.
    pub fn prefix(&self) -> &str {
        match self {
            Self::Cacheable { prefix, .. } | Self::Put { prefix, .. } | Self::Evict { prefix, .. } => {
                prefix
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let d = CachingDirective::cacheable("users", Duration::from_secs(60));
        assert_eq!(
            d,
            CachingDirective::Cacheable {
                prefix: "users".to_string(),
                ttl: Duration::from_secs(60),
            }
        );

        let d = CachingDirective::evict("users", true, false);
        assert_eq!(d.prefix(), "users");
    }

    #[test]
    fn test_default_ttl() {
        assert_eq!(CachingDirective::DEFAULT_TTL, Duration::from_secs(30));
    }
}
