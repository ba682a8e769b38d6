//! Default cache-key scheme.
//!
//! Keys are `:`-separated: `prefix:method:arg1,arg2`. With an empty
//! prefix the method is keyed under `service:method` instead, so
//! unprefixed methods cannot collide across services.

use serde_json::Value;

use crate::domain::errors::{CacheError, CacheResult};
use crate::domain::models::method::MethodDescriptor;
use crate::domain::ports::KeyGenerator;

const SEPARATOR: char = ':';
const ARG_SEPARATOR: char = ',';

/// Deterministic key generator rendering scalar arguments literally.
///
/// `GetUser(7)` under prefix `users` keys as `users:GetUser:7`; the
/// matching bulk-eviction prefix is `users:`. Separator characters
/// inside string arguments are escaped so distinct argument lists always
/// produce distinct keys. Array and object arguments are not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeyGenerator;

impl DefaultKeyGenerator {
    /// Key generator with the default scheme.
    pub fn new() -> Self {
        Self
    }

    fn base(descriptor: &MethodDescriptor, prefix: &str) -> String {
        let id = descriptor.id();
        if prefix.is_empty() {
            format!("{}{SEPARATOR}{}", id.service(), id.method())
        } else {
            format!("{prefix}{SEPARATOR}{}", id.method())
        }
    }

    fn render_argument(descriptor: &MethodDescriptor, argument: &Value) -> CacheResult<String> {
        match argument {
            Value::Null => Ok(String::new()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(Self::escape(s)),
            Value::Array(_) | Value::Object(_) => Err(CacheError::KeyGeneration {
                method: descriptor.id().to_string(),
                reason: "array and object arguments cannot be rendered into a key".to_string(),
            }),
        }
    }

    fn escape(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c == '\\' || c == SEPARATOR || c == ARG_SEPARATOR {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

impl KeyGenerator for DefaultKeyGenerator {
    fn cache_key(
        &self,
        descriptor: &MethodDescriptor,
        arguments: &[Value],
        prefix: &str,
    ) -> CacheResult<String> {
        let base = Self::base(descriptor, prefix);
        if arguments.is_empty() {
            return Ok(base);
        }

        let rendered = arguments
            .iter()
            .map(|argument| Self::render_argument(descriptor, argument))
            .collect::<CacheResult<Vec<_>>>()?;
        Ok(format!(
            "{base}{SEPARATOR}{}",
            rendered.join(&ARG_SEPARATOR.to_string())
        ))
    }

    fn cache_key_prefix(
        &self,
        descriptor: &MethodDescriptor,
        prefix: &str,
    ) -> CacheResult<String> {
        if prefix.is_empty() {
            Ok(format!("{}{SEPARATOR}", Self::base(descriptor, prefix)))
        } else {
            Ok(format!("{prefix}{SEPARATOR}"))
        }
    }
}
