// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # hyper-tx - Client-Side Transaction Construction
//!
//! Everything a client needs to turn an intent ("send 500 to bob", "deploy
//! this contract", "call that method") into a transaction record the chain
//! will accept: builders, payload codecs, identity stamping, and the signing
//! hook. Nothing in here talks to the network.
//!
//! ## Architecture
//!
//! - **transaction** - The record, the builder family (one per VM), identity
//!   generation, signing and signature verification.
//! - **codec** - Payload encoders for contract deployment and invocation,
//!   one per virtual machine.
//! - **address** - Address-format validation consulted by the builders.
//! - **crypto** - Ed25519 keys and the hash functions the rest relies on.
//! - **config** - Sentinels, limits, and protocol constants.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hyper_tx::prelude::*;
//!
//! # fn main() -> Result<(), TransactionError> {
//! let tx = TransactionBuilder::new("0xAAA")?
//!     .transfer("0xBBB", 500)
//!     .extra("memo")
//!     .build();
//!
//! assert_eq!(tx.value(), 500);
//! assert!(!tx.is_signed());
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library only emits `tracing` events. Installing a subscriber is the
//! job of the binary that embeds it.

pub mod address;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod transaction;

/// Everything needed to build and sign a transaction with one `use`.
pub mod prelude {
    pub use crate::address::{AddressValidator, HexAddressValidator, NonEmptyValidator};
    pub use crate::codec::evm::{EvmCodec, EvmInvocation, EvmValue};
    pub use crate::codec::hvm::{HvmCodec, HvmInvocation};
    pub use crate::codec::{CodecError, PayloadCodec};
    pub use crate::crypto::keys::SigningKeypair;
    pub use crate::transaction::{
        verify_signature, BuilderOps, ContractOp, Ed25519Signer, EvmBuilder, HvmBuilder,
        IdentitySource, SigningError, SystemIdentity, Transaction, TransactionBuilder,
        TransactionError, TransactionSigner, VmType,
    };
}
