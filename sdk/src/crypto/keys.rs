//! # Key Management
//!
//! Ed25519 keypair generation, parsing, and raw signing for the signer.
//!
//! ## Why Ed25519?
//!
//! A transaction signature is computed once on the client and checked by
//! every node that sees the record, so verification cost and signature size
//! matter more than signing speed. Ed25519 gives 64-byte signatures and
//! 32-byte public keys, both of which fit the hex `signature` field without
//! any framing. Signing is deterministic: the same key and the same
//! canonical string always produce the same signature, so a signer that is
//! asked twice for the same record cannot leak its key through a bad nonce
//! the way ECDSA can. `ed25519-dalek` is also the most widely reviewed pure
//! Rust implementation and needs no C toolchain.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop by `ed25519-dalek`. Copies that leave
//!   this module (for example the string returned by
//!   [`SigningKeypair::secret_key_hex`]) are the caller's to protect.
//! - Key bytes are never logged and never appear in `Debug` output. Only the
//!   public key is printed.
//! - [`SigningKeypair::generate`] draws from the operating system RNG.
//!   [`SigningKeypair::from_seed`] is for tests and key import; a seed
//!   chosen by a human is not a key.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur while parsing key material.
///
/// Deliberately vague about *why* parsing failed.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key: expected 32 hex-encoded bytes")]
    InvalidSecretKey,

    #[error("invalid public key: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 keypair used to sign transactions.
///
/// Does not implement `Serialize`: exporting a secret key should be a
/// deliberate call to [`SigningKeypair::secret_key_hex`], not a side effect
/// of serializing some struct that happens to hold one.
///
/// # Examples
///
/// ```
/// use hyper_tx::crypto::keys::SigningKeypair;
///
/// let kp = SigningKeypair::generate();
/// let sig = kp.sign(b"from=0xAAA&to=0xBBB");
/// assert!(SigningKeypair::verify_raw(&kp.public_key_bytes(), b"from=0xAAA&to=0xBBB", &sig));
/// ```
pub struct SigningKeypair {
    signing_key: SigningKey,
}

impl SigningKeypair {
    /// Fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Keypair from a 32-byte seed. A weak seed gives a weak key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Keypair from a hex-encoded 32-byte secret, with or without `0x`.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let trimmed = hex_str.trim();
        let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(body).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Hex-encoded public key, 64 characters.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Hex-encoded secret key. **Handle with care.**
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Deterministic Ed25519 signature over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Verifies `signature` over `message` against a raw public key.
    ///
    /// Returns `false` for invalid points as well as bad signatures; callers
    /// only need the yes/no answer.
    pub fn verify_raw(
        public_key: &[u8; PUBLIC_KEY_LENGTH],
        message: &[u8],
        signature: &[u8; SIGNATURE_LENGTH],
    ) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
            return false;
        };
        verifying_key
            .verify(message, &Signature::from_bytes(signature))
            .is_ok()
    }
}

/// Parses a hex-encoded public key and checks it is a valid Ed25519 point.
pub fn parse_public_key(hex_str: &str) -> Result<[u8; PUBLIC_KEY_LENGTH], KeyError> {
    let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidPublicKey)?;
    let key: [u8; PUBLIC_KEY_LENGTH] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| KeyError::InvalidPublicKey)?;
    VerifyingKey::from_bytes(&key).map_err(|_| KeyError::InvalidPublicKey)?;
    Ok(key)
}

impl Clone for SigningKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKeypair(pub={})", self.public_key_hex())
    }
}
