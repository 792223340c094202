//! Hash functions.
//!
//! - **SHA-256** - transaction hashes over the canonical signable bytes.
//! - **Keccak-256** - EVM function selectors. This is the original Keccak
//!   padding, not NIST SHA3-256; the two disagree on every input.

use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// SHA-256 digest of `data`.
///
/// ```
/// use hyper_tx::crypto::sha256;
///
/// assert_eq!(sha256(b"hyperchain").len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}
