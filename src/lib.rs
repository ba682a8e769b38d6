//! Cachewrap - declarative caching around intercepted method calls
//!
//! Cachewrap applies one of three caching behaviors to a method call,
//! read-through (`Cacheable`), write-through (`Put`), or invalidation
//! (`Evict`), without the calling code being aware of caching. Methods
//! opt in by registering a directive against their identity at
//! composition time; every intercepted call then runs a deterministic
//! four-phase pipeline (early evict, read-or-proceed, put, late evict).
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): directives, method descriptors,
//!   invocations, and the port traits for the store and key generator
//! - **Service Layer** (`services`): the interception pipeline, the
//!   method registry, and the sync/async bridge
//! - **Adapters** (`adapters`): an in-memory store and the default key
//!   generator
//!
//! The pipeline is synchronous per invocation and blocks the calling
//! thread at its async boundaries; see [`services::async_bridge`] for
//! the contract and its caveats.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use cachewrap::{
//!     CachingDirective, DefaultKeyGenerator, InterceptionPipeline, Invocation,
//!     MemoryCacheProvider, MethodDescriptor, MethodRegistry, ReturnShape, ReturnValue,
//! };
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = MethodRegistry::new();
//! let get_user = registry.register(
//!     MethodDescriptor::new("UserService", "GetUser", ReturnShape::value_of::<String>())
//!         .with_directive(CachingDirective::cacheable("users", Duration::from_secs(60))),
//! )?;
//!
//! let pipeline = InterceptionPipeline::new(
//!     Arc::new(MemoryCacheProvider::new()),
//!     Arc::new(DefaultKeyGenerator::new()),
//! );
//!
//! let mut call = Invocation::new(Arc::clone(&get_user), vec![json!(7)], |_args| {
//!     Ok(ReturnValue::Ready(json!("Alice")))
//! });
//! pipeline.intercept(&mut call)?;
//! assert!(matches!(call.return_value(), ReturnValue::Ready(v) if v == "Alice"));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{DefaultKeyGenerator, MemoryCacheProvider};
pub use domain::errors::{CacheError, CacheResult};
pub use domain::models::{
    CachingDirective, Invocation, MethodDescriptor, MethodId, ProceedFn, ReturnKind, ReturnShape,
    ReturnValue,
};
pub use domain::ports::{CacheProvider, KeyGenerator};
pub use services::{AsyncBridge, InterceptionPipeline, MethodRegistry};
