//! One in-flight intercepted call.
//!
//! The host constructs an [`Invocation`] per call from the registered
//! descriptor, the argument values, and a `proceed` closure that runs
//! the real method. The pipeline drives it; afterwards the host reads
//! the return value back out of the slot.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::method::MethodDescriptor;

/// Capability that invokes the real underlying method.
pub type ProceedFn = Box<dyn FnOnce(&[Value]) -> anyhow::Result<ReturnValue> + Send>;

/// The mutable return-value slot of an invocation.
pub enum ReturnValue {
    /// Nothing has produced a value yet.
    Unset,
    /// A plain value from a synchronous method.
    Ready(Value),
    /// A future from an asynchronous method, not yet resolved.
    Pending(BoxFuture<'static, anyhow::Result<Value>>),
}

impl ReturnValue {
    /// An already-completed future carrying `value`.
    pub fn completed(value: Value) -> Self {
        Self::Pending(Box::pin(futures::future::ready(Ok(value))))
    }

    /// True unless the slot is [`ReturnValue::Unset`].
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// True when the slot holds an unresolved future.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Ready(v) => f.debug_tuple("Ready").field(v).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// One in-flight call: target descriptor, ordered arguments, the return
/// slot, and a one-shot capability to invoke the real method.
///
/// Scoped to a single `intercept` call; never shared across calls.
pub struct Invocation {
    descriptor: Arc<MethodDescriptor>,
    arguments: Vec<Value>,
    return_value: ReturnValue,
    proceed: Option<ProceedFn>,
}

impl Invocation {
    /// Build an invocation around a `proceed` closure.
    pub fn new(
        descriptor: Arc<MethodDescriptor>,
        arguments: Vec<Value>,
        proceed: impl FnOnce(&[Value]) -> anyhow::Result<ReturnValue> + Send + 'static,
    ) -> Self {
        Self {
            descriptor,
            arguments,
            return_value: ReturnValue::Unset,
            proceed: Some(Box::new(proceed)),
        }
    }

    /// The method being intercepted.
    pub fn descriptor(&self) -> &Arc<MethodDescriptor> {
        &self.descriptor
    }

    /// Argument values, in declaration order.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Current return slot.
    pub fn return_value(&self) -> &ReturnValue {
        &self.return_value
    }

    /// Overwrite the return slot.
    pub fn set_return_value(&mut self, value: ReturnValue) {
        self.return_value = value;
    }

    /// Take the return slot, leaving it unset.
    pub fn take_return_value(&mut self) -> ReturnValue {
        std::mem::replace(&mut self.return_value, ReturnValue::Unset)
    }

    /// Consume the invocation, yielding the return slot.
    pub fn into_return_value(self) -> ReturnValue {
        self.return_value
    }

    /// Whether the real method has been invoked.
    pub fn has_proceeded(&self) -> bool {
        self.proceed.is_none()
    }

    /// Invoke the real underlying method, storing its result in the
    /// return slot. May run at most once per invocation.
    ///
    /// # Errors
    ///
    /// [`CacheError::Invocation`] when the method itself fails;
    /// [`CacheError::InvalidInvocation`] on a second call.
    pub fn proceed(&mut self) -> CacheResult<()> {
        let proceed = self.proceed.take().ok_or_else(|| {
            CacheError::InvalidInvocation(format!(
                "proceed already called for {}",
                self.descriptor.id()
            ))
        })?;
        self.return_value = proceed(&self.arguments).map_err(CacheError::Invocation)?;
        Ok(())
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("method", &self.descriptor.id().to_string())
            .field("arguments", &self.arguments)
            .field("return_value", &self.return_value)
            .field("proceeded", &self.has_proceeded())
            .finish()
    }
}
