use revise_core::hashing::{hash_str, to_canonical_json, HashAlgorithm};
use serde_json::json;

#[test]
fn canonical_hash_produces_hex_64() {
    let v = json!({"b":2, "a":1});
    let h = hash_str(HashAlgorithm::Blake3, &to_canonical_json(&v));
    // blake3 hex length is 64
    assert_eq!(h.len(), 64);
    // deterministic: same value with different key order yields same hash
    let v2 = json!({"a":1, "b":2});
    let h2 = hash_str(HashAlgorithm::Blake3, &to_canonical_json(&v2));
    assert_eq!(h, h2);
    assert_ne!(h, hash_str(HashAlgorithm::Sha256, &to_canonical_json(&v2)));
}
