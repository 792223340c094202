//! The signing hook.
//!
//! Signing is separate from building: the key may live in a hardware wallet
//! or a remote service that is not around at construction time. A signer is
//! any [`TransactionSigner`]; it owns its credential and turns a built record
//! into a signature string. [`Transaction::sign_with`] is the only way that
//! string gets onto the record.
//!
//! Every signer must sign [`Transaction::signable_bytes`], never a format of
//! its own. The chain recomputes exactly those bytes to verify.

use thiserror::Error;
use tracing::debug;

use super::builder::Transaction;
use super::error::TransactionError;
use crate::config::UNSIGNED_SIGNATURE;
use crate::crypto::keys::SigningKeypair;

/// Errors produced while signing or verifying.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The signing credential could not be loaded.
    #[error("invalid signing key")]
    InvalidKey,

    /// The signature string cannot be decoded.
    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// The signature decodes but does not match the record.
    #[error("signature does not verify against the embedded public key")]
    VerificationFailed,

    /// The signer lacks the requested capability.
    #[error("signing is not implemented by this signer")]
    Unimplemented,
}

/// Produces a signature string for a built record.
pub trait TransactionSigner {
    fn sign(&self, tx: &Transaction) -> Result<String, SigningError>;
}

impl Transaction {
    /// Signs the record in place.
    ///
    /// On error the record keeps the `"default"` sentinel. A signer that
    /// hands back an empty string or the sentinel itself is treated as an
    /// error too, so an unsigned record can never pass for a signed one.
    ///
    /// ```
    /// use hyper_tx::prelude::*;
    ///
    /// # fn main() -> Result<(), TransactionError> {
    /// let signer = Ed25519Signer::new(SigningKeypair::generate());
    /// let mut tx = TransactionBuilder::new("0xAAA")?.transfer("0xBBB", 1).build();
    /// let hash = tx.hash();
    ///
    /// tx.sign_with(&signer)?;
    /// assert!(tx.is_signed());
    /// assert_eq!(tx.hash(), hash);
    /// # Ok(())
    /// # }
    /// ```
    pub fn sign_with<S>(&mut self, signer: &S) -> Result<(), TransactionError>
    where
        S: TransactionSigner + ?Sized,
    {
        let signature = signer.sign(self)?;
        if signature.is_empty() || signature == UNSIGNED_SIGNATURE {
            return Err(SigningError::MalformedSignature {
                reason: "signer returned no signature".to_string(),
            }
            .into());
        }

        self.set_signature(signature);
        debug!(hash = %self.hash(), "signed transaction");
        Ok(())
    }
}

/// Ed25519 signer.
///
/// The signature string is `hex(public_key) || hex(signature)`: 64 hex
/// characters of key followed by 128 of signature. Carrying the key lets a
/// verifier check the record without a key lookup; binding that key to the
/// `from` address is the chain's business.
#[derive(Debug, Clone)]
pub struct Ed25519Signer {
    keypair: SigningKeypair,
}

impl Ed25519Signer {
    pub fn new(keypair: SigningKeypair) -> Self {
        Self { keypair }
    }

    /// Signer from a hex-encoded 32-byte secret key.
    pub fn from_hex(secret: &str) -> Result<Self, SigningError> {
        SigningKeypair::from_hex(secret)
            .map(Self::new)
            .map_err(|_| SigningError::InvalidKey)
    }

    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key_hex()
    }
}

impl TransactionSigner for Ed25519Signer {
    fn sign(&self, tx: &Transaction) -> Result<String, SigningError> {
        let signature = self.keypair.sign(&tx.signable_bytes());
        Ok(format!(
            "{}{}",
            self.keypair.public_key_hex(),
            hex::encode(signature)
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
