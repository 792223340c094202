//! # Transaction Module
//!
//! Construction and signing of Hyperchain transaction records.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        - VmType and ContractOp
//! builder.rs      - Transaction record, Draft staging state, BuilderOps, TransactionBuilder
//! hvm.rs          - HvmBuilder (JAR deploy, bean invoke)
//! evm.rs          - EvmBuilder (bytecode deploy, ABI invoke)
//! identity.rs     - Timestamp/nonce stamping
//! signing.rs      - TransactionSigner hook and the Ed25519 signer
//! verification.rs - Ed25519 signature verification
//! error.rs        - TransactionError
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Stage** - Create a builder for the target VM and record an intent
//!    (transfer, deploy, invoke, or contract maintenance).
//! 2. **Build** - `build()` stamps a timestamp and nonce onto a copy of the
//!    staged fields. The record carries the `"default"` signature.
//! 3. **Sign** - [`Transaction::sign_with`] hands the record to a
//!    [`TransactionSigner`].
//! 4. **Submit** - Serialize the record and hand it to a transport. Not part
//!    of this crate.

pub mod builder;
mod error;
pub mod evm;
pub mod hvm;
mod identity;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{BuilderOps, Transaction, TransactionBuilder};
pub use error::TransactionError;
pub use evm::EvmBuilder;
pub use hvm::HvmBuilder;
pub use identity::{IdentitySource, SystemIdentity};
pub use signing::{Ed25519Signer, SigningError, TransactionSigner};
pub use types::{ContractOp, VmType};
pub use verification::verify_signature;
