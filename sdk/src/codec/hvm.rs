//! HVM payload codec.
//!
//! HVM contracts ship as JAR archives and are invoked through "beans": a
//! fully qualified class name the VM instantiates, plus the JSON-encoded
//! arguments it is populated with.
//!
//! Invocation layout, before hex encoding:
//!
//! ```text
//! +------------------+-------------------+----------------------+
//! | u32 BE name len  | bean name (UTF-8) | JSON arguments       |
//! +------------------+-------------------+----------------------+
//! ```

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{hex_payload, read_artifact, CodecError, PayloadCodec};
use crate::config::JAR_MAGIC;

/// A call into an HVM contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HvmInvocation {
    bean: String,
    args: Value,
}

impl HvmInvocation {
    /// Invocation of `bean` with raw JSON arguments.
    pub fn new(bean: impl Into<String>, args: Value) -> Self {
        Self {
            bean: bean.into(),
            args,
        }
    }

    /// Invocation of `bean` whose arguments are any serializable value.
    pub fn from_bean<T: Serialize>(bean: impl Into<String>, args: &T) -> Result<Self, CodecError> {
        Ok(Self::new(bean, serde_json::to_value(args)?))
    }

    pub fn bean(&self) -> &str {
        &self.bean
    }

    pub fn args(&self) -> &Value {
        &self.args
    }
}

/// Codec for the HVM.
#[derive(Debug, Clone, Copy, Default)]
pub struct HvmCodec;

impl PayloadCodec for HvmCodec {
    type Invocation = HvmInvocation;

    fn encode_deployment(&self, artifact: &Path) -> Result<String, CodecError> {
        let bytes = read_artifact(artifact)?;
        if !bytes.starts_with(&JAR_MAGIC) {
            return Err(CodecError::UnsupportedArtifact {
                path: artifact.to_path_buf(),
                reason: "not a JAR archive (missing zip header)".to_string(),
            });
        }
        debug!(path = %artifact.display(), size = bytes.len(), "encoded HVM deployment");
        Ok(hex_payload(&bytes))
    }

    fn encode_invocation(&self, invocation: &HvmInvocation) -> Result<String, CodecError> {
        validate_bean_name(&invocation.bean)?;

        let name = invocation.bean.as_bytes();
        let args = serde_json::to_vec(&invocation.args)?;

        let mut buf = Vec::with_capacity(4 + name.len() + args.len());
        buf.extend_from_slice(&length_prefix(name.len())?);
        buf.extend_from_slice(name);
        buf.extend_from_slice(&args);

        Ok(hex_payload(&buf))
    }
}

fn length_prefix(len: usize) -> Result<[u8; 4], CodecError> {
    u32::try_from(len).map(u32::to_be_bytes).map_err(|_| {
        CodecError::InvalidInvocation(format!("bean name of {} bytes is too long", len))
    })
}

/// A bean name is a dotted Java class name: non-empty segments of
/// identifier characters.
fn validate_bean_name(bean: &str) -> Result<(), CodecError> {
    let valid_segment = |seg: &str| {
        let mut chars = seg.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    };

    if bean.is_empty() || !bean.split('.').all(valid_segment) {
        return Err(CodecError::InvalidInvocation(format!(
            "invalid bean class name: {:?}",
            bean
        )));
    }
    Ok(())
}
