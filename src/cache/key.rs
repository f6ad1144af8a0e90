//! Cache Key Module
//!
//! Derives deterministic cache keys from an endpoint name and its parameters.

use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::client::Params;

// == Cache Key ==
/// Hex-encoded SHA-256 of `{"endpoint": .., "params": ..}` in canonical form.
///
/// Object keys are sorted at every nesting level before hashing, so two
/// parameter maps with the same pairs produce the same key regardless of the
/// order they were built in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for `endpoint` called with `params`.
    pub fn derive(endpoint: &str, params: &Params) -> Self {
        let mut canonical = String::with_capacity(64);
        canonical.push_str("{\"endpoint\":");
        write_canonical(&Value::String(endpoint.to_string()), &mut canonical);
        canonical.push_str(",\"params\":{");
        write_object(params.iter(), &mut canonical);
        canonical.push_str("}}");

        let digest = Sha256::digest(canonical.as_bytes());
        Self(hex::encode(digest))
    }

    /// Returns the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            out.push('{');
            write_object(map.iter(), out);
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Scalars serialize infallibly
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_object<'a, I>(entries: I, out: &mut String)
where
    I: Iterator<Item = (&'a String, &'a Value)>,
{
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_canonical(&Value::String(key.clone()), out);
        out.push(':');
        write_canonical(value, out);
    }
}
