//! # Payload Codecs
//!
//! A codec turns a deployable artifact or a structured invocation into the
//! opaque payload string a transaction carries. Every virtual machine has
//! its own layout, so every VM gets its own codec:
//!
//! ```text
//! hvm.rs - JAR deployment, bean invocation      (HvmCodec)
//! evm.rs - bytecode deployment, ABI invocation  (EvmCodec)
//! ```
//!
//! Codecs may block on file I/O. They are called exactly once per builder
//! operation and never retried; a failure surfaces straight to the caller.

pub mod evm;
pub mod hvm;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{HEX_PREFIX, MAX_ARTIFACT_BYTES};

/// Errors a codec can report. Builders wrap these in
/// [`TransactionError::Encoding`](crate::transaction::TransactionError::Encoding).
#[derive(Debug, Error)]
pub enum CodecError {
    /// The artifact could not be read.
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact exists but has no content.
    #[error("artifact {} is empty", .path.display())]
    EmptyArtifact { path: PathBuf },

    /// The artifact exceeds [`MAX_ARTIFACT_BYTES`].
    #[error("artifact {} is {size} bytes (max {max})", .path.display())]
    ArtifactTooLarge { path: PathBuf, size: u64, max: u64 },

    /// The artifact is not in a format this VM can deploy.
    #[error("unsupported artifact {}: {reason}", .path.display())]
    UnsupportedArtifact { path: PathBuf, reason: String },

    /// The invocation descriptor is malformed for this VM.
    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),

    /// Invocation arguments could not be serialized.
    #[error("argument serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Encodes deployment artifacts and invocations for one virtual machine.
///
/// `Invocation` is the VM's own description of a call, so a builder for one
/// VM cannot be handed another VM's call by mistake.
pub trait PayloadCodec {
    type Invocation;

    /// Encodes the artifact at `artifact` into a deployment payload.
    fn encode_deployment(&self, artifact: &Path) -> Result<String, CodecError>;

    /// Encodes a method call into an invocation payload.
    fn encode_invocation(&self, invocation: &Self::Invocation) -> Result<String, CodecError>;
}

/// Reads an artifact, enforcing the size limit before loading it.
pub(crate) fn read_artifact(path: &Path) -> Result<Vec<u8>, CodecError> {
    let io_err = |source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_ARTIFACT_BYTES {
        return Err(CodecError::ArtifactTooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_ARTIFACT_BYTES,
        });
    }

    let bytes = fs::read(path).map_err(io_err)?;
    if bytes.is_empty() {
        return Err(CodecError::EmptyArtifact {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}

/// `0x`-prefixed lowercase hex.
pub(crate) fn hex_payload(bytes: &[u8]) -> String {
    format!("{}{}", HEX_PREFIX, hex::encode(bytes))
}
