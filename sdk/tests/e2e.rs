//! End-to-end tests for the transaction lifecycle.
//!
//! Each test goes through the public API only: construct a builder, record an
//! intent, build, and where relevant sign and verify. Artifacts live in
//! temporary files that are removed when the test ends.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

use serde_json::json;

use hyper_tx::codec::evm::{Address, U256};
use hyper_tx::codec::{CodecError, PayloadCodec};
use hyper_tx::config::{DEPLOY_TARGET, JAR_MAGIC, UNSIGNED_SIGNATURE};
use hyper_tx::prelude::*;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// HVM codec stand-in: one known artifact path maps to one known payload.
struct StubHvmCodec;

impl PayloadCodec for StubHvmCodec {
    type Invocation = HvmInvocation;

    fn encode_deployment(&self, artifact: &Path) -> Result<String, CodecError> {
        if artifact == Path::new("/path/to/artifact") {
            Ok("0xDEADBEEF".to_string())
        } else {
            Err(CodecError::UnsupportedArtifact {
                path: PathBuf::from(artifact),
                reason: "unknown artifact".to_string(),
            })
        }
    }

    fn encode_invocation(&self, invocation: &HvmInvocation) -> Result<String, CodecError> {
        Ok(format!("0x{}", hex::encode(invocation.bean())))
    }
}

/// Replays a fixed identity for every build.
struct FixedIdentity(i64, i64);

impl IdentitySource for FixedIdentity {
    fn timestamp(&self) -> i64 {
        self.0
    }

    fn nonce(&self) -> i64 {
        self.1
    }
}

fn jar_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".jar")
        .tempfile()
        .expect("temp jar");
    file.write_all(&JAR_MAGIC).expect("write magic");
    file.write_all(b"fake class data").expect("write body");
    file
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn transfer_with_memo() {
    let tx = TransactionBuilder::new("0xAAA")
        .unwrap()
        .transfer("0xBBB", 500)
        .extra("memo")
        .build();

    assert_eq!(tx.from(), "0xAAA");
    assert_eq!(tx.to(), "0xBBB");
    assert_eq!(tx.value(), 500);
    assert_eq!(tx.extra(), Some("memo"));
    assert!(!tx.simulate());
    assert_eq!(tx.signature(), UNSIGNED_SIGNATURE);
    assert!(!tx.signature().is_empty());
    assert_ne!(tx.timestamp(), tx.nonce());
    assert!(tx.nonce() > 0);
}

#[test]
fn hvm_deploy_with_stub_codec() {
    let tx = HvmBuilder::with_codec("0xAAA", StubHvmCodec)
        .unwrap()
        .deploy("/path/to/artifact")
        .unwrap()
        .build();

    assert_eq!(tx.to(), DEPLOY_TARGET);
    assert_eq!(tx.payload(), Some("0xDEADBEEF"));
    assert_eq!(tx.vm_type(), VmType::Hvm);
}

#[test]
fn hvm_deploy_real_jar_then_sign_and_verify() {
    let jar = jar_fixture();
    let signer = Ed25519Signer::new(SigningKeypair::generate());

    let mut tx = HvmBuilder::new("0xAAA")
        .unwrap()
        .deploy(jar.path())
        .unwrap()
        .build();
    assert!(tx.payload().unwrap().starts_with("0x504b0304"));

    tx.sign_with(&signer).unwrap();
    verify_signature(&tx).unwrap();
}

#[test]
fn hvm_invoke_serializes_bean_arguments() {
    let call = HvmInvocation::new("cn.example.invoke.SetHash", json!(["k", "v"]));
    let tx = HvmBuilder::new("0xAAA")
        .unwrap()
        .invoke("0xC0FFEE", &call)
        .unwrap()
        .build();

    let payload = tx.payload().unwrap();
    let raw = hex::decode(&payload[2..]).unwrap();
    assert!(raw.ends_with(br#"["k","v"]"#));
    assert_eq!(tx.to(), "0xC0FFEE");
}

#[test]
fn evm_invoke_and_verify() {
    let spender: Address = "0x000f1a7a08ccc48e5d30f80850cf1cf283aa3abd".parse().unwrap();
    let call = EvmInvocation::new(
        "approve(address,uint256)",
        vec![EvmValue::Address(spender), EvmValue::Uint(U256::MAX)],
    );
    let signer = Ed25519Signer::new(SigningKeypair::from_seed(&[1u8; 32]));

    let mut tx = EvmBuilder::new("0xAAA")
        .unwrap()
        .invoke("0xC0FFEE", &call)
        .unwrap()
        .build();
    tx.sign_with(&signer).unwrap();

    assert_eq!(tx.vm_type(), VmType::Evm);
    assert!(tx.payload().unwrap().starts_with("0x095ea7b3"));
    assert!(tx.payload().unwrap().ends_with(&"f".repeat(64)));
    verify_signature(&tx).unwrap();
}

#[test]
fn deploy_of_missing_artifact_is_encoding_error() {
    let mut builder = HvmBuilder::new("0xAAA").unwrap();
    let err = builder
        .deploy("/definitely/not/a/real/contract.jar")
        .unwrap_err();
    assert!(matches!(
        err,
        TransactionError::Encoding(CodecError::Io { .. })
    ));

    let tx = builder.build();
    assert_eq!(tx.to(), "");
    assert_eq!(tx.payload(), None);
}

#[test]
fn from_is_preserved_by_every_operation() {
    let jar = jar_fixture();
    let call = HvmInvocation::new("a.B", json!({}));

    let mut builder = HvmBuilder::new("0xAAA").unwrap();
    builder.transfer("0xBBB", 1).simulate().extra("x");
    builder.deploy(jar.path()).unwrap();
    builder.invoke("0xC0FFEE", &call).unwrap();
    builder.freeze("0xC0FFEE").unwrap();

    assert_eq!(builder.build().from(), "0xAAA");
}

#[test]
fn deterministic_identity_gives_identical_records() {
    let mut builder = TransactionBuilder::new("0xAAA").unwrap();
    builder.transfer("0xBBB", 42);

    let a = builder.build_with(&FixedIdentity(1_000, 7));
    let b = builder.build_with(&FixedIdentity(1_000, 7));
    assert_eq!(a, b);
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn record_serializes_for_transport() {
    let tx = TransactionBuilder::new("0xAAA")
        .unwrap()
        .transfer("0xBBB", 500)
        .build_with(&FixedIdentity(0x1234, 0x99));
    let json = serde_json::to_value(&tx).unwrap();

    assert_eq!(json["from"], "0xAAA");
    assert_eq!(json["to"], "0xBBB");
    assert_eq!(json["value"], 500);
    assert_eq!(json["vmType"], "TRANSFER");
    assert_eq!(json["timestamp"], 0x1234);
    assert_eq!(json["nonce"], 0x99);
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn thousand_builds_give_distinct_identities() {
    let mut builder = TransactionBuilder::new("0xAAA").unwrap();
    builder.transfer("0xBBB", 1);

    let pairs: HashSet<(i64, i64)> = (0..1000)
        .map(|_| {
            let tx = builder.build();
            (tx.timestamp(), tx.nonce())
        })
        .collect();
    assert_eq!(pairs.len(), 1000);
}

#[test]
fn concurrent_builders_do_not_collide() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mut builder = TransactionBuilder::new("0xAAA").unwrap();
                builder.transfer("0xBBB", i);
                (0..250)
                    .map(|_| {
                        let tx = builder.build();
                        (tx.timestamp(), tx.nonce())
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for pair in handle.join().unwrap() {
            assert!(seen.insert(pair), "duplicate identity {:?}", pair);
        }
    }
    assert_eq!(seen.len(), 8 * 250);
}
