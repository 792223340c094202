use thiserror::Error;

use super::signing::SigningError;
use crate::codec::CodecError;

/// Errors surfaced by builders and the signing hook.
///
/// Every error reaches the immediate caller synchronously. Nothing in the
/// crate retries.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A required field is empty or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// The codec rejected a deployment artifact or invocation. The builder
    /// is left exactly as it was before the call.
    #[error("payload encoding failed: {0}")]
    Encoding(#[from] CodecError),

    /// The signer failed. The record keeps its unsigned sentinel.
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),
}

impl TransactionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}
