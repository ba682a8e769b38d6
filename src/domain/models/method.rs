//! Method identity and return-shape descriptors.
//!
//! A [`MethodDescriptor`] is resolved once at registration time and shared
//! across calls as `Arc<MethodDescriptor>`; per-invocation work never
//! re-inspects anything beyond it.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::CacheResult;
use crate::domain::models::directive::CachingDirective;

/// Identifies a method by service and method name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId {
    service: String,
    method: String,
}

impl MethodId {
    /// Create a method identity.
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
        }
    }

    /// Service (type) name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Method name.
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.service, self.method)
    }
}

/// Whether a method returns a plain value or a future of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// The declared return type is the value itself.
    Value,
    /// The declared return type is a future resolving to the value.
    Future,
}

/// The declared return type of a method, with the conversion used for
/// type-aware cache reads.
///
/// Built generically per concrete return type; the conversion
/// deserializes a raw stored value into that type and back, so a read of
/// an entry written under a different type fails instead of leaking a
/// mistyped value to the caller.
#[derive(Clone)]
pub struct ReturnShape {
    kind: ReturnKind,
    type_id: TypeId,
    type_name: &'static str,
    convert: Arc<dyn Fn(Value) -> CacheResult<Value> + Send + Sync>,
}

impl ReturnShape {
    /// Shape of a synchronous method returning `T`.
    pub fn value_of<T>() -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        Self::build::<T>(ReturnKind::Value)
    }

    /// Shape of a method returning a future of `T`.
    pub fn future_of<T>() -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        Self::build::<T>(ReturnKind::Future)
    }

    fn build<T>(kind: ReturnKind) -> Self
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        Self {
            kind,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            convert: Arc::new(|raw| {
                let typed: T = serde_json::from_value(raw)?;
                Ok(serde_json::to_value(typed)?)
            }),
        }
    }

    /// Return kind.
    pub fn kind(&self) -> ReturnKind {
        self.kind
    }

    /// True when the method returns a future.
    pub fn is_future(&self) -> bool {
        self.kind == ReturnKind::Future
    }

    /// `TypeId` of the unwrapped return type `T`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the unwrapped return type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Convert a raw stored value into the declared return type.
    pub fn convert(&self, raw: Value) -> CacheResult<Value> {
        (self.convert)(raw)
    }
}

impl fmt::Debug for ReturnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnShape")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Immutable description of an interceptable method: identity, return
/// shape, and the caching directive attached to it, if any.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    id: MethodId,
    returns: ReturnShape,
    directive: Option<CachingDirective>,
}

impl MethodDescriptor {
    /// Describe a method with no caching behavior.
    pub fn new(
        service: impl Into<String>,
        method: impl Into<String>,
        returns: ReturnShape,
    ) -> Self {
        Self {
            id: MethodId::new(service, method),
            returns,
            directive: None,
        }
    }

    /// Attach the method's caching directive.
    pub fn with_directive(mut self, directive: CachingDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Method identity.
    pub fn id(&self) -> &MethodId {
        &self.id
    }

    /// Declared return shape.
    pub fn returns(&self) -> &ReturnShape {
        &self.returns
    }

    /// The attached directive, if any.
    pub fn directive(&self) -> Option<&CachingDirective> {
        self.directive.as_ref()
    }
}
