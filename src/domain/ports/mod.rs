//! Port trait definitions (Hexagonal Architecture)
//!
//! The caching aspect consumes its collaborators through these traits;
//! adapters supply concrete implementations at composition time.

pub mod cache_provider;
pub mod key_generator;

pub use cache_provider::CacheProvider;
pub use key_generator::KeyGenerator;
