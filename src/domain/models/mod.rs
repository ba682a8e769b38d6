//! Domain models for the caching aspect.

pub mod directive;
pub mod invocation;
pub mod method;

pub use directive::CachingDirective;
pub use invocation::{Invocation, ProceedFn, ReturnValue};
pub use method::{MethodDescriptor, MethodId, ReturnKind, ReturnShape};
