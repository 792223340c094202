//! Builder for EVM (Solidity contract) transactions.

use std::path::Path;
use std::sync::Arc;

use super::builder::{BuilderOps, Draft};
use super::error::TransactionError;
use super::types::{ContractOp, VmType};
use crate::address::{AddressValidator, HexAddressValidator};
use crate::codec::evm::{EvmCodec, EvmInvocation};
use crate::codec::PayloadCodec;

/// Builds transactions for the EVM. `vm_type` is always [`VmType::Evm`].
///
/// Same operations as [`HvmBuilder`](super::HvmBuilder), with bytecode
/// artifacts and ABI-encoded calls.
#[derive(Debug, Clone)]
pub struct EvmBuilder<C = EvmCodec> {
    draft: Draft,
    codec: C,
}

impl EvmBuilder {
    pub fn new(from: impl Into<String>) -> Result<Self, TransactionError> {
        Self::with_codec(from, EvmCodec)
    }
}

impl<C> EvmBuilder<C>
where
    C: PayloadCodec<Invocation = EvmInvocation>,
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
            draft: Draft::new(from.into(), VmType::Evm, Arc::new(validator))?,
            codec,
        })
    }

    /// Deploys the bytecode in the `.bin` file at `artifact`.
    pub fn deploy(&mut self, artifact: impl AsRef<Path>) -> Result<&mut Self, TransactionError> {
        self.draft.deploy(&self.codec, artifact.as_ref())?;
        Ok(self)
    }

    /// Calls a function on the contract at `contract`.
    pub fn invoke(
        &mut self,
        contract: impl Into<String>,
        invocation: &EvmInvocation,
    ) -> Result<&mut Self, TransactionError> {
        self.draft.invoke(&self.codec, contract.into(), invocation)?;
        Ok(self)
    }

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

impl<C> BuilderOps for EvmBuilder<C> {
    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }
}
