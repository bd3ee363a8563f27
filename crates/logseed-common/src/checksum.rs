//! Checksum utilities for generated artifacts

use sha2::{Digest, Sha256};

/// SHA-256 of an in-memory buffer, as lowercase hex
pub fn checksum_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
