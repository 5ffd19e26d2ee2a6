//! Path-derived identity
//!
//! Entity identifiers are never stored. They are recomputed from the relative
//! path string on every call, so the same tree yields the same identifiers
//! across restarts and across processes.
//!
//! Numeric IDs keep the first [`ID_HEX_DIGITS`] hex digits of the MD5 digest.
//! Distinct paths are assumed, not proven, to produce distinct IDs; a
//! collision resolves to whichever path is scanned first.

use crate::types::EntityId;
use md5::{Digest, Md5};

/// Hex digits of the digest kept for numeric IDs (48 bits). Changing this
/// changes every derived Directory and File ID.
pub const ID_HEX_DIGITS: usize = 12;

/// Derive the stable numeric ID for a relative path.
pub fn derive_id(relative_path: &str) -> EntityId {
    let digest = Md5::digest(relative_path.as_bytes());
    // Two hex digits per byte, big-endian.
    digest[..ID_HEX_DIGITS / 2]
        .iter()
        .fold(0, |acc, byte| (acc << 8) | EntityId::from(*byte))
}

/// Derive a UUID-shaped fingerprint (8-4-4-4-12) for any string.
///
/// Carries no version or variant bits.
pub fn derive_uuid(input: &str) -> String {
    let hex = hex::encode(Md5::digest(input.as_bytes()));
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
