//! Signature verification for records signed by [`Ed25519Signer`].
//!
//! Checks run cheapest first: presence, then shape, then the Ed25519 check.
//!
//! [`Ed25519Signer`]: super::Ed25519Signer

use super::builder::Transaction;
use super::signing::SigningError;
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::keys::{parse_public_key, SigningKeypair};

const KEY_HEX_LEN: usize = PUBLIC_KEY_LENGTH * 2;
const SIGNATURE_HEX_LEN: usize = KEY_HEX_LEN + SIGNATURE_LENGTH * 2;

fn malformed(reason: &str) -> SigningError {
    SigningError::MalformedSignature {
        reason: reason.to_string(),
    }
}

/// Verifies the record's signature against its embedded public key.
///
/// Only proves the record was signed by *some* key; the caller decides
/// whether that key is allowed to spend from `from`.
pub fn verify_signature(tx: &Transaction) -> Result<(), SigningError> {
    if !tx.is_signed() {
        return Err(malformed("transaction is unsigned"));
    }

    let signature = tx.signature();
    if !signature.is_ascii() || signature.len() != SIGNATURE_HEX_LEN {
        return Err(SigningError::MalformedSignature {
            reason: format!(
                "expected {} hex characters, got {}",
                SIGNATURE_HEX_LEN,
                signature.len()
            ),
        });
    }

    let (key_hex, sig_hex) = signature.split_at(KEY_HEX_LEN);
    let public_key =
        parse_public_key(key_hex).map_err(|_| malformed("embedded public key is invalid"))?;
    let sig_bytes = hex::decode(sig_hex).map_err(|_| malformed("signature is not valid hex"))?;
    let sig: [u8; SIGNATURE_LENGTH] = sig_bytes
        .as_slice()
        .try_into()
        .map_err(|_| malformed("signature has the wrong length"))?;

    if SigningKeypair::verify_raw(&public_key, &tx.signable_bytes(), &sig) {
        Ok(())
    } else {
        Err(SigningError::VerificationFailed)
    }
}
