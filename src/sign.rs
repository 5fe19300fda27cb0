// Request signatures and cache keys.
// Both are SHA-256 digests over canonical payload bytes; the signature mixes
// in the API token as tamper-evidence, the cache key deliberately does not.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::canon::canonical_bytes;
use crate::error::Result;

/// Compute the request signature for a payload.
///
/// Deterministic over `(token, payload)`: the same pair always yields the
/// same hex digest, and any payload mutation changes it. The signature is
/// injected into the request body under the `"signature"` key, proving the
/// payload was built with knowledge of the token.
pub fn signature(token: &str, payload: &Map<String, Value>) -> Result<String> {
    let canonical = canonical_bytes(payload)?;

    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.update(b":");
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the cache key for a payload.
///
/// Keyed by payload content only: neither the route nor the HTTP method
/// participates. Two requests with byte-identical canonical payloads share a
/// cache entry regardless of route. This is deliberate (cached responses
/// survive route refactors) and must be preserved; a GET and a payload-bearing
/// DELETE with identical data would collide, and callers avoid that.
pub fn cache_key(payload: &Map<String, Value>) -> Result<String> {
    let canonical = canonical_bytes(payload)?;
    Ok(format!("{:x}", Sha256::digest(&canonical)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pca_payload() -> Map<String, Value> {
        match json!({"data": [[1, 2, 3]], "n_components": 2}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_signature_deterministic() {
        let payload = pca_payload();
        assert_eq!(
            signature("tok", &payload).unwrap(),
            signature("tok", &payload).unwrap()
        );
    }

    #[test]
    fn test_signature_changes_with_payload() {
        let payload = pca_payload();
        let mut mutated = payload.clone();
        mutated.insert("n_components".to_string(), json!(3));

        assert_ne!(
            signature("tok", &payload).unwrap(),
            signature("tok", &mutated).unwrap()
        );
    }

    #[test]
    fn test_signature_changes_with_token() {
        let payload = pca_payload();
        assert_ne!(
            signature("tok_a", &payload).unwrap(),
            signature("tok_b", &payload).unwrap()
        );
    }

    #[test]
    fn test_cache_key_token_independent() {
        // Cache keys depend on payload content alone.
        let payload = pca_payload();
        let key = cache_key(&payload).unwrap();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, signature("tok", &payload).unwrap());
    }

    #[test]
    fn test_cache_keys_differ_for_distinct_payloads() {
        let payload = pca_payload();
        let mut other = payload.clone();
        other.insert("whiten".to_string(), json!(true));

        assert_ne!(cache_key(&payload).unwrap(), cache_key(&other).unwrap());
    }

    #[test]
    fn test_cache_key_order_independent() {
        let mut first = Map::new();
        first.insert("b".to_string(), json!(2));
        first.insert("a".to_string(), json!(1));

        let mut second = Map::new();
        second.insert("a".to_string(), json!(1));
        second.insert("b".to_string(), json!(2));

        assert_eq!(cache_key(&first).unwrap(), cache_key(&second).unwrap());
    }
}
