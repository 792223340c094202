// Build, encode and sign benchmarks.
//
// Covers identity stamping, full transfer builds, HVM/EVM invocation
// encoding, and Ed25519 signing/verification of a built record.

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

use hyper_tx::codec::evm::{Address, U256};
use hyper_tx::prelude::*;

fn bench_identity(c: &mut Criterion) {
    c.bench_function("identity/stamp", |b| {
        b.iter(|| (SystemIdentity.timestamp(), SystemIdentity.nonce()));
    });
}

fn bench_build_transfer(c: &mut Criterion) {
    let mut builder = TransactionBuilder::new("0x000f1a7a08ccc48e5d30f80850cf1cf283aa3abd")
        .expect("valid sender");
    builder
        .transfer("0x6201cb0448964ac597faf6fdf1f472edf2a22b89", 1_000)
        .extra("bench");

    c.bench_function("build/transfer", |b| {
        b.iter(|| builder.build());
    });
}

fn bench_encode_invocations(c: &mut Criterion) {
    let hvm_call = HvmInvocation::new(
        "cn.example.invoke.SetHash",
        json!(["account-key", "account-value"]),
    );
    c.bench_function("codec/hvm_invoke", |b| {
        b.iter(|| HvmCodec.encode_invocation(&hvm_call));
    });

    let evm_call = EvmInvocation::new(
        "transfer(address,uint256)",
        vec![
            EvmValue::Address(
                "0x6201cb0448964ac597faf6fdf1f472edf2a22b89"
                    .parse::<Address>()
                    .expect("valid address"),
            ),
            EvmValue::Uint(U256::from(1_000u64)),
        ],
    );
    c.bench_function("codec/evm_invoke", |b| {
        b.iter(|| EvmCodec.encode_invocation(&evm_call));
    });
}

fn bench_sign_and_verify(c: &mut Criterion) {
    let signer = Ed25519Signer::new(SigningKeypair::generate());
    let tx = TransactionBuilder::new("0xAAA")
        .expect("valid sender")
        .transfer("0xBBB", 500)
        .build();

    c.bench_function("ed25519/sign_transaction", |b| {
        b.iter(|| {
            let mut tx = tx.clone();
            tx.sign_with(&signer).expect("sign");
            tx
        });
    });

    let mut signed = tx.clone();
    signed.sign_with(&signer).expect("sign");
    c.bench_function("ed25519/verify_transaction", |b| {
        b.iter(|| verify_signature(&signed));
    });
}

criterion_group!(
    benches,
    bench_identity,
    bench_build_transfer,
    bench_encode_invocations,
    bench_sign_and_verify
);
criterion_main!(benches);
