//! # CLI Interface
//!
//! `clap` derive definitions for the `hyper-tx` binary. Every flag that
//! carries an identity or a secret can also come from the environment, so
//! scripts do not have to put keys on the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Build and sign Hyperchain transactions offline.
///
/// Prints the built record as JSON on stdout, along with its hash. Nothing
/// is sent to the network.
#[derive(Parser, Debug)]
#[command(
    name = "hyper-tx",
    about = "Build and sign Hyperchain transactions",
    version,
    propagate_version = true
)]
pub struct HyperTxCli {
    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "HYPER_TX_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "HYPER_TX_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transfer value between two accounts.
    Transfer(TransferArgs),
    /// Deploy a contract.
    Deploy(DeployArgs),
    /// Invoke a method on a deployed contract.
    Invoke(InvokeArgs),
    /// Replace the code of a deployed contract.
    Upgrade(UpgradeArgs),
    /// Freeze a contract.
    Freeze(ContractArgs),
    /// Unfreeze a contract.
    Unfreeze(ContractArgs),
    /// Generate a fresh Ed25519 signing key.
    Keygen,
    /// Print version information and exit.
    Version,
}

/// Virtual machine targeted by a contract command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Vm {
    Hvm,
    Evm,
}

/// Flags shared by every command that builds a transaction.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Sender address.
    #[arg(long, env = "HYPER_TX_FROM")]
    pub from: String,

    /// Mark the transaction as a dry run.
    #[arg(long)]
    pub simulate: bool,

    /// Free-form metadata attached to the transaction.
    #[arg(long)]
    pub extra: Option<String>,

    /// Hex-encoded Ed25519 secret key. When set, the record is signed.
    #[arg(long, env = "HYPER_TX_SIGNING_KEY", hide_env_values = true)]
    pub signing_key: Option<String>,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Recipient address.
    #[arg(long)]
    pub to: String,

    /// Amount to transfer.
    #[arg(long, allow_negative_numbers = true)]
    pub value: i64,
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = Vm::Hvm)]
    pub vm: Vm,

    /// Contract artifact: a JAR for HVM, a `.bin` bytecode file for EVM.
    pub artifact: PathBuf,
}

#[derive(Args, Debug)]
pub struct InvokeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = Vm::Hvm)]
    pub vm: Vm,

    /// Address of the deployed contract.
    #[arg(long)]
    pub contract: String,

    /// Bean class name (HVM) or function signature such as
    /// `transfer(address,uint256)` (EVM).
    #[arg(long)]
    pub method: String,

    /// Arguments as JSON. For EVM, a JSON array whose items are booleans,
    /// numbers, or strings (decimal numbers, 20-byte addresses, or 32-byte
    /// hex words).
    #[arg(long, default_value = "[]")]
    pub args: String,
}

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = Vm::Hvm)]
    pub vm: Vm,

    /// Address of the deployed contract.
    #[arg(long)]
    pub contract: String,

    /// New contract artifact.
    pub artifact: PathBuf,
}

#[derive(Args, Debug)]
pub struct ContractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = Vm::Hvm)]
    pub vm: Vm,

    /// Address of the deployed contract.
    #[arg(long)]
    pub contract: String,
}
