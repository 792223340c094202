// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # hyper-tx
//!
//! Entry point for the `hyper-tx` binary. Parses CLI arguments, initializes
//! logging, builds the requested transaction, optionally signs it, and
//! prints it.
//!
//! - `transfer` - plain value transfer
//! - `deploy`   - deploy a contract (HVM JAR or EVM bytecode)
//! - `invoke`   - call a deployed contract
//! - `upgrade` / `freeze` / `unfreeze` - contract maintenance
//! - `keygen`   - generate a signing key
//! - `version`  - print build version information

mod cli;
mod invocation;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use hyper_tx::config::SDK_VERSION;
use hyper_tx::prelude::*;

use cli::{Commands, CommonArgs, HyperTxCli, Vm};

/// What gets printed for every built transaction.
#[derive(Serialize)]
struct Output<'a> {
    hash: String,
    transaction: &'a Transaction,
}

fn main() -> Result<()> {
    let cli = HyperTxCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Transfer(args) => {
            let mut builder = TransactionBuilder::new(&args.common.from)
                .context("invalid sender address")?;
            builder.transfer(&args.to, args.value);
            emit(&mut builder, &args.common)
        }
        Commands::Deploy(args) => match args.vm {
            Vm::Hvm => {
                let mut builder = HvmBuilder::new(&args.common.from)?;
                builder
                    .deploy(&args.artifact)
                    .with_context(|| format!("failed to deploy {}", args.artifact.display()))?;
                emit(&mut builder, &args.common)
            }
            Vm::Evm => {
                let mut builder = EvmBuilder::new(&args.common.from)?;
                builder
                    .deploy(&args.artifact)
                    .with_context(|| format!("failed to deploy {}", args.artifact.display()))?;
                emit(&mut builder, &args.common)
            }
        },
        Commands::Invoke(args) => match args.vm {
            Vm::Hvm => {
                let call = invocation::hvm_invocation(&args.method, &args.args)?;
                let mut builder = HvmBuilder::new(&args.common.from)?;
                builder
                    .invoke(&args.contract, &call)
                    .with_context(|| format!("failed to encode call to {}", args.method))?;
                emit(&mut builder, &args.common)
            }
            Vm::Evm => {
                let call = invocation::evm_invocation(&args.method, &args.args)?;
                let mut builder = EvmBuilder::new(&args.common.from)?;
                builder
                    .invoke(&args.contract, &call)
                    .with_context(|| format!("failed to encode call to {}", args.method))?;
                emit(&mut builder, &args.common)
            }
        },
        Commands::Upgrade(args) => match args.vm {
            Vm::Hvm => {
                let mut builder = HvmBuilder::new(&args.common.from)?;
                builder.upgrade(&args.contract, &args.artifact)?;
                emit(&mut builder, &args.common)
            }
            Vm::Evm => {
                let mut builder = EvmBuilder::new(&args.common.from)?;
                builder.upgrade(&args.contract, &args.artifact)?;
                emit(&mut builder, &args.common)
            }
        },
        Commands::Freeze(args) => match args.vm {
            Vm::Hvm => {
                let mut builder = HvmBuilder::new(&args.common.from)?;
                builder.freeze(&args.contract)?;
                emit(&mut builder, &args.common)
            }
            Vm::Evm => {
                let mut builder = EvmBuilder::new(&args.common.from)?;
                builder.freeze(&args.contract)?;
                emit(&mut builder, &args.common)
            }
        },
        Commands::Unfreeze(args) => match args.vm {
            Vm::Hvm => {
                let mut builder = HvmBuilder::new(&args.common.from)?;
                builder.unfreeze(&args.contract)?;
                emit(&mut builder, &args.common)
            }
            Vm::Evm => {
                let mut builder = EvmBuilder::new(&args.common.from)?;
                builder.unfreeze(&args.contract)?;
                emit(&mut builder, &args.common)
            }
        },
        Commands::Keygen => keygen(),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Applies the shared flags, builds, signs if a key was given, and prints.
fn emit<B: BuilderOps>(builder: &mut B, common: &CommonArgs) -> Result<()> {
    if common.simulate {
        builder.simulate();
    }
    if let Some(extra) = &common.extra {
        builder.extra(extra);
    }

    let mut tx = builder.build();
    if let Some(key) = &common.signing_key {
        let signer = Ed25519Signer::from_hex(key).context("invalid --signing-key")?;
        tx.sign_with(&signer).context("failed to sign transaction")?;
        verify_signature(&tx).context("signature failed self-verification")?;
        tracing::info!(signer = %signer.public_key_hex(), "transaction signed");
    }

    let output = Output {
        hash: tx.hash(),
        transaction: &tx,
    };
    tracing::info!(hash = %output.hash, vm = %tx.vm_type(), "transaction built");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn keygen() -> Result<()> {
    let keypair = SigningKeypair::generate();
    let out = serde_json::json!({
        "publicKey": keypair.public_key_hex(),
        "secretKey": keypair.secret_key_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_version() {
    println!("hyper-tx {}", env!("CARGO_PKG_VERSION"));
    println!("sdk:      {}", SDK_VERSION);
}
