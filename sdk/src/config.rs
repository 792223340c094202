//! # SDK Constants
//!
//! Sentinels, bounds, and limits shared by the builders, codecs, and signer.
//! The sentinel values are part of the wire contract with the chain; change
//! them and every node will start rejecting what this crate produces.

// ---------------------------------------------------------------------------
// Version
// ---------------------------------------------------------------------------

/// Crate version, baked in at compile time.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Record Sentinels
// ---------------------------------------------------------------------------

/// Signature value carried by every freshly built record until a signer
/// overwrites it. Never empty, so "unsigned" and "signature lost in transit"
/// are distinguishable.
pub const UNSIGNED_SIGNATURE: &str = "default";

/// `to` address of a deployment. The chain assigns the real contract
/// address once the deployment executes.
pub const DEPLOY_TARGET: &str = "0x";

/// Prefix used on every hex-encoded payload, hash, and address.
pub const HEX_PREFIX: &str = "0x";

// ---------------------------------------------------------------------------
// Identity Generation
// ---------------------------------------------------------------------------

/// Multiplier from the millisecond wall clock to the nanosecond-scale
/// timestamp the chain expects.
pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// Inclusive lower bound of the timestamp jitter.
pub const TIMESTAMP_JITTER_MIN: i64 = 1_000;

/// Exclusive upper bound of the timestamp jitter. Keeps the jitter below one
/// millisecond, so it never pushes a timestamp into the next clock tick.
pub const TIMESTAMP_JITTER_MAX: i64 = 1_000_000;

// ---------------------------------------------------------------------------
// Codec Limits
// ---------------------------------------------------------------------------

/// Largest deployment artifact the codecs will read, in bytes.
pub const MAX_ARTIFACT_BYTES: u64 = 16 * 1024 * 1024;

/// Local file header magic of a ZIP archive. Every JAR starts with it.
pub const JAR_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Length of an EVM function selector in bytes.
pub const EVM_SELECTOR_LENGTH: usize = 4;

/// Width of one ABI-encoded EVM word in bytes.
pub const EVM_WORD_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Addresses & Keys
// ---------------------------------------------------------------------------

/// Longest hex body (after the `0x` prefix) the default validator accepts.
pub const MAX_ADDRESS_HEX_DIGITS: usize = 64;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;
