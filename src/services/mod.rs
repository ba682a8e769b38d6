//! Services orchestrating the caching aspect.

pub mod async_bridge;
pub mod method_registry;
pub mod pipeline;

pub use async_bridge::AsyncBridge;
pub use method_registry::MethodRegistry;
pub use pipeline::InterceptionPipeline;
