//! # Cryptographic Primitives
//!
//! Thin wrappers over audited implementations: Ed25519 (`ed25519-dalek`) for
//! signing, SHA-256 (`sha2`) for transaction hashes, and Keccak-256
//! (`tiny-keccak`) for EVM function selectors. Nothing here is home-grown.

pub mod hash;
pub mod keys;

pub use hash::{keccak256, sha256};
pub use keys::{parse_public_key, KeyError, SigningKeypair};
