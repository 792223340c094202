//! Timestamp and nonce generation.
//!
//! Each build stamps a fresh `(timestamp, nonce)` pair onto the record:
//!
//! - `timestamp = wall_clock_millis * 1_000_000 + jitter`, with the jitter
//!   uniform in `[TIMESTAMP_JITTER_MIN, TIMESTAMP_JITTER_MAX)`. The clock only
//!   ticks in milliseconds, so the jitter is what separates two records built
//!   within the same tick.
//! - `nonce` is an independent uniform random value in `1..=i64::MAX`.
//!
//! Neither value is coordinated across processes. Uniqueness is
//! probabilistic and the chain has the final word on duplicates.
//!
//! ## Collision odds
//!
//! The nonce alone carries 63 bits. By the birthday bound, `n` records share
//! a nonce with probability of roughly `n² / 2^64`: about 5 in 10^8 for a
//! million records, and still only about 5% at a billion. Two records built
//! in the same millisecond also draw from roughly a million jitter values,
//! so a full `(timestamp, nonce)` collision needs both draws to match and is
//! far less likely again.

use chrono::Utc;
use rand::Rng;

use crate::config::{NANOS_PER_MILLI, TIMESTAMP_JITTER_MAX, TIMESTAMP_JITTER_MIN};

/// Supplies the identity pair stamped at build time.
///
/// [`SystemIdentity`] is what `build()` uses. Tests and replays inject a
/// deterministic source through `build_with`.
pub trait IdentitySource {
    /// Nanosecond-scale timestamp.
    fn timestamp(&self) -> i64;

    /// Strictly positive random nonce.
    fn nonce(&self) -> i64;
}

/// Wall clock plus the thread-local RNG.
///
/// Safe to use from any number of threads at once: `chrono` reads the clock
/// without shared state and `rand::thread_rng` is per-thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl IdentitySource for SystemIdentity {
    /// # Panics
    ///
    /// If the system clock reads before the Unix epoch or so far in the
    /// future that the nanosecond value overflows. Both are broken
    /// environments, not conditions a caller can recover from.
    fn timestamp(&self) -> i64 {
        let millis = Utc::now().timestamp_millis();
        assert!(millis >= 0, "system clock reads before the Unix epoch");

        let jitter = rand::thread_rng().gen_range(TIMESTAMP_JITTER_MIN..TIMESTAMP_JITTER_MAX);
        millis
            .checked_mul(NANOS_PER_MILLI)
            .and_then(|nanos| nanos.checked_add(jitter))
            .expect("system clock out of nanosecond range")
    }

    fn nonce(&self) -> i64 {
        rand::thread_rng().gen_range(1..=i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn timestamp_is_millis_plus_bounded_jitter() {
        let before = Utc::now().timestamp_millis();
        let ts = SystemIdentity.timestamp();
        let after = Utc::now().timestamp_millis();

        let millis = ts / NANOS_PER_MILLI;
        let jitter = ts % NANOS_PER_MILLI;
        assert!(millis >= before && millis <= after);
        assert!((TIMESTAMP_JITTER_MIN..TIMESTAMP_JITTER_MAX).contains(&jitter));
    }

    #[test]
    fn nonce_is_strictly_positive() {
        for _ in 0..10_000 {
            assert!(SystemIdentity.nonce() > 0);
        }
    }

    #[test]
    fn thousand_pairs_are_distinct() {
        let pairs: HashSet<(i64, i64)> = (0..1000)
            .map(|_| (SystemIdentity.timestamp(), SystemIdentity.nonce()))
            .collect();
        assert_eq!(pairs.len(), 1000);
    }
}
