//! Address-format validation.
//!
//! Builders consult an [`AddressValidator`] before accepting a sender. The
//! default, [`HexAddressValidator`], accepts the hex addresses the chain
//! uses; callers with a different address scheme plug in their own.

use crate::config::{HEX_PREFIX, MAX_ADDRESS_HEX_DIGITS};

/// Decides whether a string is a well-formed address.
///
/// Implementations must be pure: the same input always yields the same
/// answer, and validation never performs I/O.
pub trait AddressValidator {
    fn validate(&self, address: &str) -> bool;
}

/// Accepts an optional `0x` prefix followed by 1 to
/// [`MAX_ADDRESS_HEX_DIGITS`] hex digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressValidator;

impl AddressValidator for HexAddressValidator {
    fn validate(&self, address: &str) -> bool {
        let body = address.strip_prefix(HEX_PREFIX).unwrap_or(address);
        !body.is_empty()
            && body.len() <= MAX_ADDRESS_HEX_DIGITS
            && body.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Only rejects empty or all-whitespace strings. For address schemes this
/// crate knows nothing about.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyValidator;

impl AddressValidator for NonEmptyValidator {
    fn validate(&self, address: &str) -> bool {
        !address.trim().is_empty()
    }
}

impl<F> AddressValidator for F
where
    F: Fn(&str) -> bool,
{
    fn validate(&self, address: &str) -> bool {
        self(address)
    }
}
