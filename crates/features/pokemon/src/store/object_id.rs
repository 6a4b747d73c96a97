//! 12-byte time-ordered identifiers rendered as 24 lowercase hex characters.
//!
//! Layout: 4-byte big-endian seconds since the epoch, 5 per-process random bytes,
//! 3-byte big-endian counter. Identifiers minted by one process sort in creation order.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of the hex rendering.
pub const OBJECT_ID_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(random_bytes::<5>);
static COUNTER: LazyLock<AtomicU32> =
    LazyLock::new(|| AtomicU32::new(u32::from_be_bytes(random_bytes::<4>()) & COUNTER_MASK));

/// Mints a fresh identifier.
#[must_use]
pub fn generate() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs());
    #[allow(clippy::cast_possible_truncation)]
    let timestamp = secs as u32;
    let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
    bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
    hex::encode(bytes)
}

/// Exactly 24 ASCII hex digits, either case.
#[must_use]
pub fn is_valid(candidate: &str) -> bool {
    candidate.len() == OBJECT_ID_LEN && candidate.bytes().all(|b| b.is_ascii_hexdigit())
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    if getrandom::fill(&mut buf).is_err() {
        // No entropy source: fall back to pid mixed with the clock.
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos());
        #[allow(clippy::cast_possible_truncation)]
        let seed = (nanos as u64) ^ u64::from(std::process::id()).rotate_left(32);
        let seed = seed.to_le_bytes();
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = seed[i % seed.len()];
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generated_ids_are_valid_and_ordered() {
        let ids: Vec<String> = (0..64).map(|_| generate()).collect();
        for id in &ids {
            assert!(is_valid(id), "{id}");
            assert_eq!(id, &id.to_lowercase());
        }
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn validity_rules() {
        assert!(is_valid("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert!(is_valid("65A1F0C2E4B0A1B2C3D4E5F6"));
        assert!(!is_valid("65a1f0c2e4b0a1b2c3d4e5f"));
        assert!(!is_valid("65a1f0c2e4b0a1b2c3d4e5fg"));
        assert!(!is_valid("pikachu"));
        assert!(!is_valid(""));
    }

    proptest! {
        #[test]
        fn short_or_long_strings_are_never_ids(s in "[0-9a-f]{0,23}|[0-9a-f]{25,40}") {
            prop_assert!(!is_valid(&s));
        }
    }
}
