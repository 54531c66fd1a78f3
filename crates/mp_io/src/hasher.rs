//! crates/mp_io/src/hasher.rs
//!
//! SHA-256 digests, lowercase hex.
//! - `sha256_hex` for raw bytes (e.g. a finished .docx).
//! - `sha256_canonical` for values: hashed over canonical JSON, so key order in
//!   the source never changes the digest.
//! - `snapshot_digest`: the integrity hash a caller may print in the footer.

use serde::Serialize;
use sha2::{Digest, Sha256};

use mp_core::SynthesisInput;

use crate::canonical_json::canonical_bytes;
use crate::IoResult;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    Ok(sha256_hex(&canonical_bytes(value)?))
}

/// Digest of a meeting snapshot. The `integrity_hash` field itself is
/// excluded so a snapshot can carry its own digest.
pub fn snapshot_digest(input: &SynthesisInput) -> IoResult<String> {
    let mut v = serde_json::to_value(input)?;
    if let Some(obj) = v.as_object_mut() {
        obj.remove("integrity_hash");
    }
    Ok(sha256_hex(&crate::canonical_json::to_canonical_json_bytes(&v)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hex_encoding_is_lowercase() {
        assert_eq!(sha256_hex(b"abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn canonical_hashing_ignores_key_order() {
        let a = json!({"b": 2, "a": 1});
        let b = json!({"a": 1, "b": 2});
        assert_eq!(sha256_canonical(&a).unwrap(), sha256_canonical(&b).unwrap());
    }

    fn snapshot() -> SynthesisInput {
        serde_json::from_value(json!({
            "meeting": {
                "id": "m-3", "sequence_number": 3, "address": "ул. Мира, д. 7",
                "format": "in_person", "scheduled_at": "2026-05-20T19:00:00",
                "total_area": 1000, "voted_area": 900,
                "eligible_count": 10, "participated_count": 9,
                "quorum_threshold_pct": 50, "quorum_reached": true,
                "organizer_name": "Петров П. П."
            },
            "agenda": [{
                "id": "a-2", "position": 2, "title": "Смета",
                "votes_for": 600, "votes_against": 200, "votes_abstain": 100
            }],
            "roster": []
        }))
        .unwrap()
    }

    #[test]
    fn snapshot_digest_skips_its_own_hash_field() {
        let input = snapshot();
        let first = snapshot_digest(&input).unwrap();
        assert_eq!(first, snapshot_digest(&input).unwrap());
        assert_eq!(first.len(), 64);

        let mut stamped = input.clone();
        stamped.integrity_hash = Some(first.clone());
        assert_eq!(snapshot_digest(&stamped).unwrap(), first);

        let mut changed = input;
        changed.agenda[0].votes_for = mp_core::Area::from_hundredths(60_100);
        assert_ne!(snapshot_digest(&changed).unwrap(), first);
    }
}
