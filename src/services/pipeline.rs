//! The interception pipeline.
//!
//! Every intercepted call runs the same four phases in fixed order
//! against one [`Invocation`]:
//!
//! 1. early evict (`Evict` with `before = true`)
//! 2. read-through or proceed (`Cacheable`, or plain invocation)
//! 3. write-through (`Put`)
//! 4. late evict (`Evict` with `before = false`)
//!
//! Each phase decides independently whether its directive applies; since
//! a method carries at most one directive, at most one phase has an
//! effect per call. The underlying method runs at most once, only in
//! phase 2, and never on a cache hit.
//!
//! Any error (store failure, key generation failure, or a failure of
//! the underlying method) aborts the remaining phases and propagates to
//! the caller. In particular, Put and late-evict do not run after the
//! underlying call has failed.

use std::sync::Arc;

use crate::domain::errors::CacheResult;
use crate::domain::models::directive::CachingDirective;
use crate::domain::models::invocation::Invocation;
use crate::domain::ports::{CacheProvider, KeyGenerator};
use crate::services::async_bridge::AsyncBridge;

/// Orchestrates caching behavior around intercepted calls.
///
/// Holds the store and key generator; one pipeline serves any number of
/// methods and is cheap to share.
pub struct InterceptionPipeline<P, K>
where
    P: CacheProvider,
    K: KeyGenerator,
{
    provider: Arc<P>,
    key_generator: Arc<K>,
}

impl<P, K> InterceptionPipeline<P, K>
where
    P: CacheProvider,
    K: KeyGenerator,
{
    /// Build a pipeline over a store and a key generator.
    pub fn new(provider: Arc<P>, key_generator: Arc<K>) -> Self {
        Self {
            provider,
            key_generator,
        }
    }

    /// Run the four-phase sequence for one invocation.
    ///
    /// On success the invocation's return slot holds the method's result
    /// (cached or fresh) in the method's declared shape. On error the
    /// remaining phases were skipped; [`crate::CacheError::Invocation`]
    /// carries the underlying method's own failure.
    pub fn intercept(&self, invocation: &mut Invocation) -> CacheResult<()> {
        self.process_evict(invocation, true)?;
        self.proceed_with_cache(invocation)?;
        self.process_put(invocation)?;
        self.process_evict(invocation, false)
    }

    /// Phase 2: read-through for `Cacheable` methods, plain `proceed`
    /// for everything else.
    fn proceed_with_cache(&self, invocation: &mut Invocation) -> CacheResult<()> {
        let descriptor = Arc::clone(invocation.descriptor());
        let Some(CachingDirective::Cacheable { prefix, ttl }) = descriptor.directive() else {
            return invocation.proceed();
        };

        let key = self
            .key_generator
            .cache_key(&descriptor, invocation.arguments(), prefix)?;

        let cached = AsyncBridge::wait(self.provider.get(&key, descriptor.returns()))?;
        if let Some(value) = cached {
            tracing::debug!(key = %key, method = %descriptor.id(), "Cache hit");
            invocation.set_return_value(AsyncBridge::completed(descriptor.returns(), value));
            return Ok(());
        }

        tracing::debug!(key = %key, method = %descriptor.id(), "Cache miss");
        invocation.proceed()?;

        // A blank key from a custom generator disables the store step
        if key.trim().is_empty() {
            return Ok(());
        }

        let value = AsyncBridge::unwrap_return(invocation)?;
        if !value.is_null() {
            AsyncBridge::wait(self.provider.set(&key, value, *ttl))?;
            tracing::debug!(key = %key, "Stored fresh value");
        }
        Ok(())
    }

    /// Phase 3: write-through for `Put` methods with a non-null result.
    fn process_put(&self, invocation: &mut Invocation) -> CacheResult<()> {
        let descriptor = Arc::clone(invocation.descriptor());
        let Some(CachingDirective::Put { prefix, ttl }) = descriptor.directive() else {
            return Ok(());
        };
        if !invocation.return_value().is_set() {
            return Ok(());
        }

        let key = self
            .key_generator
            .cache_key(&descriptor, invocation.arguments(), prefix)?;

        let value = AsyncBridge::unwrap_return(invocation)?;
        if value.is_null() {
            return Ok(());
        }

        AsyncBridge::wait(self.provider.set(&key, value, *ttl))?;
        tracing::debug!(key = %key, method = %descriptor.id(), "Cache put");
        Ok(())
    }

    /// Phases 1 and 4: eviction, when the directive's timing matches.
    fn process_evict(&self, invocation: &mut Invocation, before: bool) -> CacheResult<()> {
        let descriptor = Arc::clone(invocation.descriptor());
        let Some(CachingDirective::Evict {
            prefix,
            all,
            before: evict_before,
        }) = descriptor.directive()
        else {
            return Ok(());
        };
        if *evict_before != before {
            return Ok(());
        }

        if *all {
            let key_prefix = self.key_generator.cache_key_prefix(&descriptor, prefix)?;
            AsyncBridge::wait(self.provider.remove_by_prefix(&key_prefix))?;
            tracing::debug!(prefix = %key_prefix, method = %descriptor.id(), "Cache evict by prefix");
        } else {
            let key = self
                .key_generator
                .cache_key(&descriptor, invocation.arguments(), prefix)?;
            AsyncBridge::wait(self.provider.remove(&key))?;
            tracing::debug!(key = %key, method = %descriptor.id(), "Cache evict");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{DefaultKeyGenerator, MemoryCacheProvider};
    use crate::domain::models::invocation::ReturnValue;
    use crate::domain::models::method::{MethodDescriptor, ReturnShape};
    use serde_json::json;

    fn pipeline() -> InterceptionPipeline<MemoryCacheProvider, DefaultKeyGenerator> {
        InterceptionPipeline::new(
            Arc::new(MemoryCacheProvider::new()),
            Arc::new(DefaultKeyGenerator::new()),
        )
    }

    #[test]
    fn test_no_directive_proceeds_once() {
        let pipeline = pipeline();
        let descriptor = Arc::new(MethodDescriptor::new(
            "Svc",
            "plain",
            ReturnShape::value_of::<u32>(),
        ));
        let mut inv = Invocation::new(descriptor, vec![json!(1)], |args| {
            Ok(ReturnValue::Ready(args[0].clone()))
        });

        pipeline.intercept(&mut inv).unwrap();
        assert!(matches!(inv.return_value(), ReturnValue::Ready(v) if *v == json!(1)));
    }
}
