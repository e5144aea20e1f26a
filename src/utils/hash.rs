//! Hash functions over qgram bytes.
//!
//! Two independent hashes are computed for every qgram:
//!
//! - the *selector* hash picks the bucket (djb2: `h * 33 + byte`)
//! - the *signature* hash is a one-at-a-time mix stored with each entry and
//!   compared before the full byte comparison
//!
//! Both are reduced modulo the bucket table capacity. The signature is lossy
//! and must never be used as the only equality test.

/// Seed of the selector hash
const SELECTOR_SEED: u64 = 5381;

/// Unreduced selector hash (djb2)
#[inline]
pub fn selector_hash_raw(bytes: &[u8]) -> u64 {
    bytes.iter().fold(SELECTOR_SEED, |hash, &b| {
        (hash << 5).wrapping_add(hash).wrapping_add(b as u64)
    })
}

/// Bucket index for `bytes` in a table of `capacity` buckets
#[inline]
pub fn selector_hash(bytes: &[u8], capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (selector_hash_raw(bytes) % capacity as u64) as usize
}

/// Unreduced signature hash (one-at-a-time with three finalization rounds)
#[inline]
pub fn signature_hash_raw(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &b in bytes {
        hash = hash.wrapping_add(b as u64);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash = hash.wrapping_add(hash << 15);
    hash
}

/// Signature stored with each entry, reduced modulo `capacity`
#[inline]
pub fn signature_hash(bytes: &[u8], capacity: usize) -> u64 {
    debug_assert!(capacity > 0);
    signature_hash_raw(bytes) % capacity as u64
}
