//! EVM payload codec.
//!
//! Deployment reads a compiled `.bin` file (hex bytecode, as emitted by
//! `solc --bin`) and normalises it. Invocation produces standard ABI call
//! data: the 4-byte Keccak-256 selector of the canonical signature followed
//! by one 32-byte word per argument.
//!
//! Only static ABI types are supported: `address`, `bool`, `bytes32`, and
//! `uint8` through `uint256`. Dynamic types (`string`, `bytes`, arrays) need
//! head/tail encoding and are rejected. Type names must already be in
//! canonical form (`uint64`, never `uint064`), because the selector is
//! hashed over exactly that text.

use std::path::Path;

pub use alloy_primitives::{Address, B256, U256};
use tracing::debug;

use super::{hex_payload, read_artifact, CodecError, PayloadCodec};
use crate::config::{EVM_SELECTOR_LENGTH, EVM_WORD_LENGTH, HEX_PREFIX};
use crate::crypto::keccak256;

/// A single ABI argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvmValue {
    Address(Address),
    /// Any `uint<N>`. The width is checked against the signature at
    /// encoding time.
    Uint(U256),
    Bool(bool),
    Bytes32(B256),
}

/// A call into an EVM contract: a Solidity-style signature such as
/// `transfer(address,uint256)` plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmInvocation {
    signature: String,
    args: Vec<EvmValue>,
}

impl EvmInvocation {
    pub fn new(signature: impl Into<String>, args: Vec<EvmValue>) -> Self {
        Self {
            signature: signature.into(),
            args,
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn args(&self) -> &[EvmValue] {
        &self.args
    }
}

/// Codec for the EVM.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmCodec;

impl PayloadCodec for EvmCodec {
    type Invocation = EvmInvocation;

    fn encode_deployment(&self, artifact: &Path) -> Result<String, CodecError> {
        let raw = read_artifact(artifact)?;
        let unsupported = |reason: &str| CodecError::UnsupportedArtifact {
            path: artifact.to_path_buf(),
            reason: reason.to_string(),
        };

        let text = std::str::from_utf8(&raw).map_err(|_| unsupported("bytecode is not UTF-8 text"))?;
        let trimmed = text.trim();
        let body = trimmed.strip_prefix(HEX_PREFIX).unwrap_or(trimmed);
        if body.is_empty() {
            return Err(unsupported("no bytecode"));
        }
        let bytecode = hex::decode(body).map_err(|_| unsupported("bytecode is not valid hex"))?;

        debug!(path = %artifact.display(), size = bytecode.len(), "encoded EVM deployment");
        Ok(hex_payload(&bytecode))
    }

    fn encode_invocation(&self, invocation: &EvmInvocation) -> Result<String, CodecError> {
        let (name, types) = parse_signature(&invocation.signature)?;
        if types.len() != invocation.args.len() {
            return Err(CodecError::InvalidInvocation(format!(
                "{} expects {} argument(s), got {}",
                name,
                types.len(),
                invocation.args.len()
            )));
        }

        let canonical = format!("{}({})", name, types.join(","));
        let digest = keccak256(canonical.as_bytes());

        let mut data = Vec::with_capacity(EVM_SELECTOR_LENGTH + EVM_WORD_LENGTH * types.len());
        data.extend_from_slice(&digest[..EVM_SELECTOR_LENGTH]);
        for (ty, value) in types.iter().zip(&invocation.args) {
            data.extend_from_slice(&encode_word(ty, value)?);
        }

        Ok(hex_payload(&data))
    }
}

/// Splits `name(t1, t2)` into the name and canonical parameter types.
/// Bare `uint` is canonicalised to `uint256`.
fn parse_signature(signature: &str) -> Result<(String, Vec<String>), CodecError> {
    let invalid = || CodecError::InvalidInvocation(format!("malformed signature: {:?}", signature));

    let compact: String = signature.chars().filter(|c| !c.is_whitespace()).collect();
    let open = compact.find('(').ok_or_else(invalid)?;
    if !compact.ends_with(')') {
        return Err(invalid());
    }

    let name = &compact[..open];
    let valid_name = name
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_name {
        return Err(invalid());
    }

    let params = &compact[open + 1..compact.len() - 1];
    let types = if params.is_empty() {
        Vec::new()
    } else {
        params
            .split(',')
            .map(|ty| match ty {
                "" => Err(invalid()),
                "uint" => Ok("uint256".to_string()),
                other if is_supported(other) => Ok(other.to_string()),
                other => Err(CodecError::InvalidInvocation(format!(
                    "unsupported ABI type: {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok((name.to_string(), types))
}

fn is_supported(ty: &str) -> bool {
    matches!(ty, "address" | "bool" | "bytes32") || uint_bits(ty).is_some()
}

/// Bit width of a canonical `uint<N>` type name. Signs, leading zeros and
/// widths outside 8..=256 in steps of 8 are refused.
fn uint_bits(ty: &str) -> Option<usize> {
    let digits = ty.strip_prefix("uint")?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let bits: usize = digits.parse().ok()?;
    ((8..=256).contains(&bits) && bits % 8 == 0).then_some(bits)
}

/// Encodes one argument. `ty` has already passed [`is_supported`].
fn encode_word(ty: &str, value: &EvmValue) -> Result<[u8; EVM_WORD_LENGTH], CodecError> {
    let mismatch = || {
        CodecError::InvalidInvocation(format!("argument {:?} does not match ABI type {}", value, ty))
    };

    let word = match (ty, value) {
        ("address", EvmValue::Address(addr)) => addr.into_word().0,
        ("bool", EvmValue::Bool(b)) => {
            let mut word = [0u8; EVM_WORD_LENGTH];
            word[EVM_WORD_LENGTH - 1] = u8::from(*b);
            word
        }
        ("bytes32", EvmValue::Bytes32(bytes)) => bytes.0,
        (ty, EvmValue::Uint(n)) => {
            let bits = uint_bits(ty).ok_or_else(mismatch)?;
            if n.bit_len() > bits {
                return Err(CodecError::InvalidInvocation(format!(
                    "value {} overflows {}",
                    n, ty
                )));
            }
            n.to_be_bytes::<EVM_WORD_LENGTH>()
        }
        _ => return Err(mismatch()),
    };

    Ok(word)
}
