//! Turns `--method` / `--args` into VM invocations.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;

use hyper_tx::codec::evm::{Address, B256, U256};
use hyper_tx::prelude::{EvmInvocation, EvmValue, HvmInvocation};

pub fn hvm_invocation(bean: &str, args: &str) -> Result<HvmInvocation> {
    let args: Value = serde_json::from_str(args).context("--args is not valid JSON")?;
    Ok(HvmInvocation::new(bean, args))
}

/// EVM arguments are untyped JSON, so each item is mapped by shape. The
/// codec then checks every value against the signature's parameter types.
pub fn evm_invocation(signature: &str, args: &str) -> Result<EvmInvocation> {
    let items: Vec<Value> =
        serde_json::from_str(args).context("EVM --args must be a JSON array")?;
    let values = items
        .iter()
        .enumerate()
        .map(|(i, item)| evm_value(item).with_context(|| format!("argument {}", i)))
        .collect::<Result<Vec<_>>>()?;
    Ok(EvmInvocation::new(signature, values))
}

/// `0x` + 40 hex digits is an address, `0x` + 64 a `bytes32`, and any other
/// string must be a decimal integer. JSON numbers only reach `u64`; larger
/// values go in as decimal strings.
fn evm_value(item: &Value) -> Result<EvmValue> {
    match item {
        Value::Bool(b) => Ok(EvmValue::Bool(*b)),
        Value::Number(n) => n
            .as_u64()
            .map(|n| EvmValue::Uint(U256::from(n)))
            .ok_or_else(|| anyhow!("{} is not an unsigned integer", n)),
        Value::String(s) => match s.strip_prefix("0x").map(str::len) {
            Some(40) => s
                .parse::<Address>()
                .map(EvmValue::Address)
                .with_context(|| format!("{:?} is not a valid address", s)),
            Some(64) => s
                .parse::<B256>()
                .map(EvmValue::Bytes32)
                .with_context(|| format!("{:?} is not valid bytes32 hex", s)),
            _ => U256::from_str_radix(s, 10)
                .map(EvmValue::Uint)
                .map_err(|_| anyhow!("cannot interpret {:?} as an EVM value", s)),
        },
        other => bail!("unsupported JSON value {}", other),
    }
}
