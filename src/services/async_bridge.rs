//! Bridge between the synchronous pipeline and asynchronous values.
//!
//! The interception pipeline runs on the caller's thread. Whenever it
//! needs the result of a future (a store operation or a pending return
//! value) it blocks that thread until the future resolves. This is a
//! deliberate bridge, not a cooperative yield: callers on a thread that
//! must itself drive the awaited future (e.g. a current-thread runtime
//! hosting the cache backend) will deadlock.
//!
//! The reverse direction never blocks: turning a cache hit back into the
//! method's declared return shape builds an already-completed future.

use std::any::TypeId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde_json::Value;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::invocation::{Invocation, ReturnValue};
use crate::domain::models::method::{ReturnKind, ReturnShape};

type CompletedFn = Arc<dyn Fn(Value) -> ReturnValue + Send + Sync>;

/// Process-wide map from return-type identity to its completed-future
/// factory. Populated lazily, entries are never invalidated.
fn completed_factories() -> &'static RwLock<HashMap<TypeId, CompletedFn>> {
    static FACTORIES: OnceLock<RwLock<HashMap<TypeId, CompletedFn>>> = OnceLock::new();
    FACTORIES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolves asynchronous return values and rebuilds completed ones.
pub struct AsyncBridge;

impl AsyncBridge {
    /// Block the current thread until `future` resolves.
    ///
    /// The pipeline's only suspension point. No timeout or cancellation:
    /// a hung future hangs the caller.
    pub fn wait<F: Future>(future: F) -> F::Output {
        futures::executor::block_on(future)
    }

    /// Resolve the invocation's return value to a plain value.
    ///
    /// A `Ready` value is returned as-is and the slot is left unchanged.
    /// A `Pending` future is driven to completion on the calling thread;
    /// the slot is then restored to an already-completed value of the
    /// method's declared shape so the host can still consume it.
    ///
    /// # Errors
    /// A faulted future surfaces as [`CacheError::Invocation`]; an unset
    /// slot is an [`CacheError::InvalidInvocation`].
    pub fn unwrap_return(invocation: &mut Invocation) -> CacheResult<Value> {
        let descriptor = Arc::clone(invocation.descriptor());
        match invocation.take_return_value() {
            ReturnValue::Unset => Err(CacheError::InvalidInvocation(format!(
                "no return value to unwrap for {}",
                descriptor.id()
            ))),
            ReturnValue::Ready(value) => {
                invocation.set_return_value(ReturnValue::Ready(value.clone()));
                Ok(value)
            }
            ReturnValue::Pending(future) => {
                let value = Self::wait(future).map_err(CacheError::Invocation)?;
                invocation.set_return_value(Self::completed(descriptor.returns(), value.clone()));
                Ok(value)
            }
        }
    }

    /// Build a return value of the method's declared shape around an
    /// already-known value. Never blocks.
    ///
    /// For future-returning methods the factory is resolved once per
    /// distinct return type and reused across calls.
    pub fn completed(shape: &ReturnShape, value: Value) -> ReturnValue {
        match shape.kind() {
            ReturnKind::Value => ReturnValue::Ready(value),
            ReturnKind::Future => (Self::future_factory(shape.type_id()))(value),
        }
    }

    fn future_factory(type_id: TypeId) -> CompletedFn {
        if let Some(factory) = completed_factories()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(factory);
        }

        let mut factories = completed_factories()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            factories
                .entry(type_id)
                .or_insert_with(|| Arc::new(ReturnValue::completed)),
        )
    }

    #[cfg(test)]
    fn has_factory(type_id: TypeId) -> bool {
        completed_factories()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&type_id)
    }
}
