//! Builder for HVM (Java contract) transactions.

use std::path::Path;
use std::sync::Arc;

use super::builder::{BuilderOps, Draft};
use super::error::TransactionError;
use super::types::{ContractOp, VmType};
use crate::address::{AddressValidator, HexAddressValidator};
use crate::codec::hvm::{HvmCodec, HvmInvocation};
use crate::codec::PayloadCodec;

/// Builds transactions for the HVM. `vm_type` is always [`VmType::Hvm`].
///
/// The codec is a type parameter so tests and alternative encoders can stand
/// in for [`HvmCodec`]:
///
/// ```no_run
/// use hyper_tx::prelude::*;
/// use serde_json::json;
///
/// # fn main() -> Result<(), TransactionError> {
/// let deploy = HvmBuilder::new("0xAAA")?.deploy("contract.jar")?.build();
/// assert_eq!(deploy.to(), "0x");
///
/// let call = HvmInvocation::new("cn.example.invoke.SetHash", json!(["key", "value"]));
/// let invoke = HvmBuilder::new("0xAAA")?.invoke("0xC0FFEE", &call)?.build();
/// assert_eq!(invoke.vm_type(), VmType::Hvm);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HvmBuilder<C = HvmCodec> {
    draft: Draft,
    codec: C,
}

impl HvmBuilder {
    pub fn new(from: impl Into<String>) -> Result<Self, TransactionError> {
        Self::with_codec(from, HvmCodec)
    }
}

impl<C> HvmBuilder<C>
where
    C: PayloadCodec<Invocation = HvmInvocation>,
{
    pub fn with_codec(from: impl Into<String>, codec: C) -> Result<Self, TransactionError> {
        Self::with_validator(from, codec, HexAddressValidator)
    }

    /// `validator` checks `from` now and every contract address later.
    pub fn with_validator(
        from: impl Into<String>,
        codec: C,
        validator: impl AddressValidator + Send + Sync + 'static,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            draft: Draft::new(from.into(), VmType::Hvm, Arc::new(validator))?,
            codec,
        })
    }

    /// Deploys the JAR at `artifact`. On success `to` is the `"0x"` sentinel
    /// and `payload` is the codec output; on failure nothing changes.
    pub fn deploy(&mut self, artifact: impl AsRef<Path>) -> Result<&mut Self, TransactionError> {
        self.draft.deploy(&self.codec, artifact.as_ref())?;
        Ok(self)
    }

    /// Invokes a bean on the contract at `contract`.
    pub fn invoke(
        &mut self,
        contract: impl Into<String>,
        invocation: &HvmInvocation,
    ) -> Result<&mut Self, TransactionError> {
        self.draft.invoke(&self.codec, contract.into(), invocation)?;
        Ok(self)
    }

    /// Replaces the code of `contract` with the JAR at `artifact`.
    pub fn upgrade(
        &mut self,
        contract: impl Into<String>,
        artifact: impl AsRef<Path>,
    ) -> Result<&mut Self, TransactionError> {
        self.draft
            .upgrade(&self.codec, contract.into(), artifact.as_ref())?;
        Ok(self)
    }

    pub fn freeze(&mut self, contract: impl Into<String>) -> Result<&mut Self, TransactionError> {
        self.draft.maintain(contract.into(), ContractOp::Freeze)?;
        Ok(self)
    }

    pub fn unfreeze(&mut self, contract: impl Into<String>) -> Result<&mut Self, TransactionError> {
        self.draft.maintain(contract.into(), ContractOp::Unfreeze)?;
        Ok(self)
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C> BuilderOps for HvmBuilder<C> {
    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }
}
