//! Composition-time registry of interceptable methods.
//!
//! Directives are bound to method identities once, at startup; per-call
//! resolution is a hash lookup. This replaces reflective attribute
//! discovery with explicit registration.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::method::{MethodDescriptor, MethodId};

/// Lookup from method identity to its registered descriptor.
#[derive(Debug, Default)]
pub struct MethodRegistry {
    methods: HashMap<MethodId, Arc<MethodDescriptor>>,
}

impl MethodRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method descriptor, returning the shared handle used to
    /// build invocations for it.
    ///
    /// # Errors
    /// [`CacheError::DuplicateMethod`] when the identity is already
    /// registered.
    pub fn register(&mut self, descriptor: MethodDescriptor) -> CacheResult<Arc<MethodDescriptor>> {
        let id = descriptor.id().clone();
        if self.methods.contains_key(&id) {
            return Err(CacheError::DuplicateMethod(id.to_string()));
        }

        let descriptor = Arc::new(descriptor);
        self.methods.insert(id, Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Resolve a method identity to its descriptor, if registered.
    pub fn resolve(&self, service: &str, method: &str) -> Option<Arc<MethodDescriptor>> {
        self.methods.get(&MethodId::new(service, method)).cloned()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::directive::CachingDirective;
    use crate::domain::models::method::ReturnShape;
    use std::time::Duration;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = MethodRegistry::new();
        registry
            .register(
                MethodDescriptor::new("UserService", "GetUser", ReturnShape::value_of::<u32>())
                    .with_directive(CachingDirective::cacheable("users", Duration::from_secs(60))),
            )
            .unwrap();

        let descriptor = registry.resolve("UserService", "GetUser").unwrap();
        assert!(descriptor.directive().is_some());
        assert!(registry.resolve("UserService", "Missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = MethodRegistry::new();
        let descriptor =
            MethodDescriptor::new("UserService", "GetUser", ReturnShape::value_of::<u32>());
        registry.register(descriptor.clone()).unwrap();

        let err = registry.register(descriptor).unwrap_err();
        assert!(matches!(err, CacheError::DuplicateMethod(_)));
    }
}
