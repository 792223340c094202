//! Enumerations carried on every transaction record.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// VmType
// ---------------------------------------------------------------------------

/// Virtual machine that interprets a transaction's payload.
///
/// Fixed by the builder variant: [`TransactionBuilder`] yields `Transfer`,
/// [`HvmBuilder`] yields `Hvm`, [`EvmBuilder`] yields `Evm`. Supporting a new
/// VM means a new variant here plus a new builder type.
///
/// [`TransactionBuilder`]: super::TransactionBuilder
/// [`HvmBuilder`]: super::HvmBuilder
/// [`EvmBuilder`]: super::EvmBuilder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VmType {
    /// Plain value transfer. No contract code runs.
    Transfer,
    /// Hyperchain's Java VM. Contracts are JAR archives.
    Hvm,
    /// Ethereum-compatible VM. Contracts are EVM bytecode.
    Evm,
}

impl fmt::Display for VmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "TRANSFER"),
            Self::Hvm => write!(f, "HVM"),
            Self::Evm => write!(f, "EVM"),
        }
    }
}

// ---------------------------------------------------------------------------
// ContractOp
// ---------------------------------------------------------------------------

/// Contract maintenance operation, written to the record's `op_code`.
///
/// Ordinary transfers, deployments and invocations carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContractOp {
    #[default]
    None,
    /// Replace the code of a deployed contract.
    Upgrade,
    /// Reject all further invocations of a contract.
    Freeze,
    /// Lift a previous freeze.
    Unfreeze,
}

impl ContractOp {
    /// Numeric code as it appears on the wire.
    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Upgrade => 1,
            Self::Freeze => 2,
            Self::Unfreeze => 3,
        }
    }

    /// Inverse of [`ContractOp::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Upgrade),
            2 => Some(Self::Freeze),
            3 => Some(Self::Unfreeze),
            _ => None,
        }
    }
}

impl fmt::Display for ContractOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Upgrade => write!(f, "Upgrade"),
            Self::Freeze => write!(f, "Freeze"),
            Self::Unfreeze => write!(f, "Unfreeze"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vm_type_display_matches_serde() {
        for vm in [VmType::Transfer, VmType::Hvm, VmType::Evm] {
            let json = serde_json::to_string(&vm).unwrap();
            assert_eq!(json, format!("\"{}\"", vm));
        }
    }

    #[test]
    fn vm_type_wire_names() {
        assert_eq!(VmType::Transfer.to_string(), "TRANSFER");
        assert_eq!(VmType::Hvm.to_string(), "HVM");
        assert_eq!(VmType::Evm.to_string(), "EVM");
    }

    #[test]
    fn contract_op_codes_roundtrip() {
        for op in [
            ContractOp::None,
            ContractOp::Upgrade,
            ContractOp::Freeze,
            ContractOp::Unfreeze,
        ] {
            assert_eq!(ContractOp::from_code(op.code()), Some(op));
        }
        assert_eq!(ContractOp::from_code(4), None);
        assert_eq!(ContractOp::from_code(-1), None);
    }

    #[test]
    fn default_op_is_none() {
        assert_eq!(ContractOp::default().code(), 0);
    }
}
