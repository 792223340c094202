//! The transaction record and the base builder.
//!
//! Every builder variant stages fields in a [`Draft`] and shares the common
//! operations through [`BuilderOps`]. `build()` copies the draft into a new
//! [`Transaction`] and stamps a fresh identity pair on it; the draft itself is
//! not consumed, so a builder can be built again (each record gets its own
//! timestamp and nonce).

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::TransactionError;
use super::identity::{IdentitySource, SystemIdentity};
use super::types::{ContractOp, VmType};
use crate::address::{AddressValidator, HexAddressValidator};
use crate::codec::{CodecError, PayloadCodec};
use crate::config::{DEPLOY_TARGET, HEX_PREFIX, UNSIGNED_SIGNATURE};
use crate::crypto::hash::sha256;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A built transaction record.
///
/// There is no public constructor and no `Deserialize` impl: the only way to
/// get one is a builder's `build`. After that, the only mutation is the
/// signing hook ([`Transaction::sign_with`]).
///
/// # Canonical Form
///
/// Signers and the chain agree on [`Transaction::signable_string`]:
///
/// ```text
/// from=<from>&to=<to>&value=<value>&payload=<payload>&timestamp=0x<hex>
///     &nonce=0x<hex>&opcode=<op_code>&extra=<extra>&vmtype=<VMTYPE>
/// ```
///
/// Absent `payload` and `extra` render as empty strings. `signature` and
/// `simulate` are excluded.
///
/// ## Stability
///
/// This string is a wire contract, not a debug format. A signature produced
/// today must still verify against a record rebuilt by a later release, and
/// the chain recomputes the same text on its side before checking it. So the
/// field order, the `key=value&` separators, the lowercase `0x` hex for
/// `timestamp` and `nonce`, and the upper-case VM names are all frozen.
/// Adding a field to the struct does not add it to the canonical form; that
/// would be a protocol change and has to be coordinated with the chain.
///
/// Values are not escaped. A `&` or `=` inside `extra` is signed verbatim,
/// which is harmless because the verifier never parses the string back, it
/// only rebuilds it from the record's fields and compares bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    from: String,
    to: String,
    payload: Option<String>,
    value: i64,
    simulate: bool,
    vm_type: VmType,
    op_code: i32,
    extra: Option<String>,
    timestamp: i64,
    nonce: i64,
    signature: String,
}

impl Transaction {
    /// Sender address. Never empty.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Recipient or contract address. `"0x"` for deployments, empty when the
    /// builder recorded no intent.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Codec output, present only for deploy, invoke and upgrade.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Dry-run flag. A simulated transaction is executed but never committed.
    pub fn simulate(&self) -> bool {
        self.simulate
    }

    pub fn vm_type(&self) -> VmType {
        self.vm_type
    }

    pub fn op_code(&self) -> i32 {
        self.op_code
    }

    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref()
    }

    /// Nanosecond-scale build time, jittered.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    /// The signature string, or `"default"` before signing.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Whether a signer has replaced the unsigned sentinel.
    pub fn is_signed(&self) -> bool {
        self.signature != UNSIGNED_SIGNATURE
    }

    /// Canonical text form covered by the signature.
    pub fn signable_string(&self) -> String {
        format!(
            "from={}&to={}&value={}&payload={}&timestamp=0x{:x}&nonce=0x{:x}&opcode={}&extra={}&vmtype={}",
            self.from,
            self.to,
            self.value,
            self.payload.as_deref().unwrap_or_default(),
            self.timestamp,
            self.nonce,
            self.op_code,
            self.extra.as_deref().unwrap_or_default(),
            self.vm_type,
        )
    }

    /// UTF-8 bytes of [`Transaction::signable_string`].
    pub fn signable_bytes(&self) -> Vec<u8> {
        self.signable_string().into_bytes()
    }

    /// `0x` + hex(SHA-256(signable bytes)). Stable across signing.
    pub fn hash(&self) -> String {
        format!("{}{}", HEX_PREFIX, hex::encode(sha256(&self.signable_bytes())))
    }

    pub(super) fn set_signature(&mut self, signature: String) {
        self.signature = signature;
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Address validator shared between a builder and its clones.
pub(crate) type SharedValidator = Arc<dyn AddressValidator + Send + Sync>;

/// Staged fields of a transaction that has not been built yet.
///
/// Opaque outside this crate. Builders own one and expose it to
/// [`BuilderOps`]. The validator chosen at construction stays with the draft
/// and also vets every contract address handed to a contract operation.
#[derive(Clone)]
pub struct Draft {
    from: String,
    to: String,
    payload: Option<String>,
    value: i64,
    simulate: bool,
    vm_type: VmType,
    op_code: i32,
    extra: Option<String>,
    validator: SharedValidator,
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("payload", &self.payload)
            .field("value", &self.value)
            .field("simulate", &self.simulate)
            .field("vm_type", &self.vm_type)
            .field("op_code", &self.op_code)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

impl Draft {
    pub(crate) fn new(
        from: String,
        vm_type: VmType,
        validator: SharedValidator,
    ) -> Result<Self, TransactionError> {
        if from.trim().is_empty() {
            return Err(TransactionError::invalid("from", "sender address is empty"));
        }
        if !validator.validate(&from) {
            return Err(TransactionError::invalid(
                "from",
                format!("malformed sender address {:?}", from),
            ));
        }

        Ok(Self {
            from,
            to: String::new(),
            payload: None,
            value: 0,
            simulate: false,
            vm_type,
            op_code: ContractOp::None.code(),
            extra: None,
            validator,
        })
    }

    /// A plain transfer: new recipient and value, and any staged contract
    /// intent is dropped.
    fn transfer(&mut self, to: String, value: i64) {
        self.set_content(to, None, ContractOp::None);
        self.value = value;
    }

    /// Encodes the artifact, then points the draft at the deploy target.
    /// Nothing is written if the codec fails.
    pub(crate) fn deploy<C: PayloadCodec>(
        &mut self,
        codec: &C,
        artifact: &Path,
    ) -> Result<(), TransactionError> {
        let payload = encode(self.vm_type, || codec.encode_deployment(artifact))?;
        debug!(vm = %self.vm_type, artifact = %artifact.display(), "staged deployment");
        self.set_content(DEPLOY_TARGET.to_string(), Some(payload), ContractOp::None);
        Ok(())
    }

    pub(crate) fn invoke<C: PayloadCodec>(
        &mut self,
        codec: &C,
        contract: String,
        invocation: &C::Invocation,
    ) -> Result<(), TransactionError> {
        self.require_contract(&contract)?;
        let payload = encode(self.vm_type, || codec.encode_invocation(invocation))?;
        debug!(vm = %self.vm_type, contract = %contract, "staged invocation");
        self.set_content(contract, Some(payload), ContractOp::None);
        Ok(())
    }

    /// Upgrade carries the new code, encoded exactly like a deployment.
    pub(crate) fn upgrade<C: PayloadCodec>(
        &mut self,
        codec: &C,
        contract: String,
        artifact: &Path,
    ) -> Result<(), TransactionError> {
        self.require_contract(&contract)?;
        let payload = encode(self.vm_type, || codec.encode_deployment(artifact))?;
        debug!(vm = %self.vm_type, contract = %contract, "staged upgrade");
        self.set_content(contract, Some(payload), ContractOp::Upgrade);
        Ok(())
    }

    /// Freeze and unfreeze address the contract and carry no payload.
    pub(crate) fn maintain(&mut self, contract: String, op: ContractOp) -> Result<(), TransactionError> {
        self.require_contract(&contract)?;
        debug!(vm = %self.vm_type, contract = %contract, op = %op, "staged maintenance");
        self.set_content(contract, None, op);
        Ok(())
    }

    fn require_contract(&self, contract: &str) -> Result<(), TransactionError> {
        if contract.trim().is_empty() {
            return Err(TransactionError::invalid("to", "contract address is empty"));
        }
        if !self.validator.validate(contract) {
            return Err(TransactionError::invalid(
                "to",
                format!("malformed contract address {:?}", contract),
            ));
        }
        Ok(())
    }

    fn set_content(&mut self, to: String, payload: Option<String>, op: ContractOp) {
        self.to = to;
        self.payload = payload;
        self.op_code = op.code();
    }

    fn stamp(&self, identity: &dyn IdentitySource) -> Transaction {
        let tx = Transaction {
            from: self.from.clone(),
            to: self.to.clone(),
            payload: self.payload.clone(),
            value: self.value,
            simulate: self.simulate,
            vm_type: self.vm_type,
            op_code: self.op_code,
            extra: self.extra.clone(),
            timestamp: identity.timestamp(),
            nonce: identity.nonce(),
            signature: UNSIGNED_SIGNATURE.to_string(),
        };
        debug!(
            from = %tx.from,
            to = %tx.to,
            vm = %tx.vm_type,
            nonce = tx.nonce,
            "built transaction"
        );
        tx
    }
}

fn encode<F>(vm: VmType, f: F) -> Result<String, TransactionError>
where
    F: FnOnce() -> Result<String, CodecError>,
{
    f().map_err(|e| {
        warn!(vm = %vm, error = %e, "codec rejected payload");
        TransactionError::Encoding(e)
    })
}

// ---------------------------------------------------------------------------
// BuilderOps
// ---------------------------------------------------------------------------

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::TransactionBuilder {}
    impl<C> Sealed for crate::transaction::hvm::HvmBuilder<C> {}
    impl<C> Sealed for crate::transaction::evm::EvmBuilder<C> {}
}

/// Operations shared by every builder variant.
///
/// Sealed: the set of builders is closed to this crate. A new VM gets a new
/// builder here, never an outside impl.
///
/// ```
/// use hyper_tx::prelude::*;
///
/// # fn main() -> Result<(), TransactionError> {
/// let mut builder = TransactionBuilder::new("0xAAA")?;
/// builder.transfer("0xBBB", 10).simulate();
///
/// let first = builder.build();
/// let second = builder.build();
/// assert_eq!(first.to(), second.to());
/// assert_ne!(first.nonce(), second.nonce());
/// # Ok(())
/// # }
/// ```
pub trait BuilderOps: sealed::Sealed {
    #[doc(hidden)]
    fn draft(&self) -> &Draft;

    #[doc(hidden)]
    fn draft_mut(&mut self) -> &mut Draft;

    /// Sets the recipient and value, replacing any contract intent staged
    /// earlier: `op_code` returns to 0 and `payload` is cleared, so the
    /// record is a plain transfer to `to`.
    ///
    /// Neither argument is checked. Negative values and an empty recipient
    /// are left for the chain to refuse.
    fn transfer(&mut self, to: impl Into<String>, value: i64) -> &mut Self
    where
        Self: Sized,
    {
        self.draft_mut().transfer(to.into(), value);
        self
    }

    /// Marks the transaction as a dry run. Idempotent.
    fn simulate(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.draft_mut().simulate = true;
        self
    }

    /// Attaches free-form metadata. Last write wins.
    fn extra(&mut self, data: impl Into<String>) -> &mut Self
    where
        Self: Sized,
    {
        self.draft_mut().extra = Some(data.into());
        self
    }

    /// Builds a record stamped from the system clock and RNG.
    fn build(&self) -> Transaction {
        self.build_with(&SystemIdentity)
    }

    /// Builds a record stamped from `identity`.
    fn build_with(&self, identity: &dyn IdentitySource) -> Transaction {
        self.draft().stamp(identity)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Builder for plain value transfers (`VmType::Transfer`).
///
/// ```
/// use hyper_tx::prelude::*;
///
/// # fn main() -> Result<(), TransactionError> {
/// let tx = TransactionBuilder::new("0xAAA")?
///     .transfer("0xBBB", 500)
///     .extra("memo")
///     .build();
///
/// assert_eq!(tx.from(), "0xAAA");
/// assert_eq!(tx.signature(), "default");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    draft: Draft,
}

impl TransactionBuilder {
    /// Validates `from` with [`HexAddressValidator`].
    pub fn new(from: impl Into<String>) -> Result<Self, TransactionError> {
        Self::with_validator(from, HexAddressValidator)
    }

    /// Validates `from` with a caller-supplied address scheme.
    pub fn with_validator(
        from: impl Into<String>,
        validator: impl AddressValidator + Send + Sync + 'static,
    ) -> Result<Self, TransactionError> {
        Ok(Self {
            draft: Draft::new(from.into(), VmType::Transfer, Arc::new(validator))?,
        })
    }
}

impl BuilderOps for TransactionBuilder {
    fn draft(&self) -> &Draft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::address::NonEmptyValidator;
    use std::cell::Cell;

    /// Deterministic identity: timestamps and nonces count up from fixed
    /// starting points.
    pub(crate) struct Counter {
        ts: Cell<i64>,
        nonce: Cell<i64>,
    }

    impl Counter {
        pub(crate) fn new(ts: i64, nonce: i64) -> Self {
            Self {
                ts: Cell::new(ts),
                nonce: Cell::new(nonce),
            }
        }
    }

    impl IdentitySource for Counter {
        fn timestamp(&self) -> i64 {
            let ts = self.ts.get();
            self.ts.set(ts + 1);
            ts
        }

        fn nonce(&self) -> i64 {
            let n = self.nonce.get();
            self.nonce.set(n + 1);
            n
        }
    }

    fn sample_tx() -> Transaction {
        TransactionBuilder::new("0xAAA")
            .unwrap()
            .transfer("0xBBB", 500)
            .extra("memo")
            .build_with(&Counter::new(0x10, 0x20))
    }

    #[test]
    fn empty_from_is_rejected() {
        for from in ["", "   "] {
            let err = TransactionBuilder::new(from).unwrap_err();
            assert!(matches!(
                err,
                TransactionError::InvalidArgument { field: "from", .. }
            ));
        }
    }

    #[test]
    fn malformed_from_is_rejected_by_default_validator() {
        assert!(TransactionBuilder::new("not-an-address").is_err());
        assert!(TransactionBuilder::with_validator("not-an-address", NonEmptyValidator).is_ok());
    }

    #[test]
    fn empty_from_rejected_even_by_permissive_validator() {
        let anything = |_: &str| true;
        assert!(TransactionBuilder::with_validator("", anything).is_err());
    }

    #[test]
    fn fresh_record_defaults() {
        let tx = TransactionBuilder::new("0xAAA").unwrap().build();
        assert_eq!(tx.from(), "0xAAA");
        assert_eq!(tx.to(), "");
        assert_eq!(tx.payload(), None);
        assert_eq!(tx.value(), 0);
        assert!(!tx.simulate());
        assert_eq!(tx.vm_type(), VmType::Transfer);
        assert_eq!(tx.op_code(), 0);
        assert_eq!(tx.extra(), None);
        assert_eq!(tx.signature(), UNSIGNED_SIGNATURE);
        assert!(!tx.is_signed());
        assert!(tx.nonce() > 0);
    }

    #[test]
    fn transfer_sets_routing_and_value() {
        let tx = sample_tx();
        assert_eq!(tx.to(), "0xBBB");
        assert_eq!(tx.value(), 500);
        assert_eq!(tx.extra(), Some("memo"));
    }

    #[test]
    fn empty_recipient_is_accepted() {
        let tx = TransactionBuilder::new("0xAAA")
            .unwrap()
            .transfer("", 500)
            .build();
        assert_eq!(tx.to(), "");
        assert_eq!(tx.value(), 500);
        assert!(tx.signable_string().contains("&to=&value=500&"));
    }

    #[test]
    fn draft_debug_omits_validator() {
        let builder = TransactionBuilder::new("0xAAA").unwrap();
        let debug = format!("{:?}", builder);
        assert!(debug.contains("from: \"0xAAA\""));
        assert!(!debug.contains("validator"));
    }

    #[test]
    fn negative_value_is_accepted() {
        let tx = TransactionBuilder::new("0xAAA")
            .unwrap()
            .transfer("0xBBB", -1)
            .build();
        assert_eq!(tx.value(), -1);
    }

    #[test]
    fn simulate_is_idempotent() {
        let mut once = TransactionBuilder::new("0xAAA").unwrap();
        once.simulate();
        let mut thrice = TransactionBuilder::new("0xAAA").unwrap();
        thrice.simulate().simulate().simulate();

        let id = Counter::new(1, 1);
        let a = once.build_with(&id);
        let id = Counter::new(1, 1);
        let b = thrice.build_with(&id);
        assert_eq!(a, b);
        assert!(a.simulate());
    }

    #[test]
    fn extra_last_write_wins() {
        let tx = TransactionBuilder::new("0xAAA")
            .unwrap()
            .extra("x")
            .extra("y")
            .build();
        assert_eq!(tx.extra(), Some("y"));
    }

    #[test]
    fn rebuild_changes_only_identity() {
        let mut builder = TransactionBuilder::new("0xAAA").unwrap();
        builder.transfer("0xBBB", 7).extra("memo");

        let id = Counter::new(100, 200);
        let first = builder.build_with(&id);
        let second = builder.build_with(&id);

        assert_ne!(first, second);
        assert_ne!(
            (first.timestamp(), first.nonce()),
            (second.timestamp(), second.nonce())
        );
        assert_eq!(first.from(), second.from());
        assert_eq!(first.to(), second.to());
        assert_eq!(first.value(), second.value());
        assert_eq!(first.extra(), second.extra());
        assert_eq!(first.signature(), second.signature());
    }

    #[test]
    fn signable_string_layout() {
        let tx = sample_tx();
        assert_eq!(
            tx.signable_string(),
            "from=0xAAA&to=0xBBB&value=500&payload=&timestamp=0x10&nonce=0x20&opcode=0&extra=memo&vmtype=TRANSFER"
        );
    }

    #[test]
    fn signable_bytes_exclude_signature_and_simulate() {
        let mut builder = TransactionBuilder::new("0xAAA").unwrap();
        builder.transfer("0xBBB", 1);
        let plain = builder.build_with(&Counter::new(5, 5));
        builder.simulate();
        let mut simulated = builder.build_with(&Counter::new(5, 5));
        simulated.set_signature("cafe".to_string());

        assert_eq!(plain.signable_bytes(), simulated.signable_bytes());
        assert_eq!(plain.hash(), simulated.hash());
    }

    #[test]
    fn hash_is_prefixed_sha256() {
        let tx = sample_tx();
        let hash = tx.hash();
        assert!(hash.starts_with("0x"));
        assert_eq!(hash.len(), 2 + 64);
        assert_eq!(hash, sample_tx().hash());
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_tx()).unwrap();
        assert_eq!(json["vmType"], "TRANSFER");
        assert_eq!(json["opCode"], 0);
        assert_eq!(json["signature"], "default");
        assert_eq!(json["payload"], serde_json::Value::Null);
        assert_eq!(json["timestamp"], 0x10);
    }
}
