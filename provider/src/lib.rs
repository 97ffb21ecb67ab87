//! Compute the bit-fields of composable unique identifiers.
//!
//! # Overview
//!
//! An identifier is built by packing several independently computed fields (a timestamp, a
//! partition, a node number, ...) side by side. Each field is described by a value provider:
//!
//! - [`ValueProvider::significant_bits`] is the fixed number of bits the field needs, so a
//!   composer can plan non-overlapping offsets.
//! - [`ValueProviderFor::value`] computes the field from a [`Timestamp`] and a [`Key`]. It is
//!   pure: the same inputs always give the same output, which always fits in the advertised bits.
//!
//! Three providers are included:
//!
//! - [`from_constant`]: a fixed value.
//! - [`partitioned`]: `hash(key) % num_buckets`.
//! - [`from_timestamp`]: time since an epoch, modulo a maximum duration.
//!
//! Providers are immutable after construction and may be shared freely between threads.
//!
//! # Example
//!
//! ```
//! use identigen_provider::{
//!     from_constant, from_timestamp, partitioned, Precision, ValueProvider, ValueProviderFor,
//! };
//! use std::time::{Duration, SystemTime};
//!
//! let node = from_constant(5);
//! let shard = partitioned(16).unwrap();
//! let epoch = SystemTime::UNIX_EPOCH + Duration::from_secs(1_704_067_200);
//! let time = from_timestamp(epoch, Duration::from_secs(1 << 20), Precision::Millis).unwrap();
//!
//! assert_eq!(node.significant_bits(), 3);
//! assert_eq!(shard.significant_bits(), 4);
//! assert_eq!(time.significant_bits(), 30);
//!
//! // Timestamps from the same clock may be of different types.
//! let now = chrono::Utc::now();
//! assert!(shard.value(&now, "user-42") < 16);
//! assert!(time.value(&now, "user-42") < 1 << 30);
//! ```
//!
//! Timestamps from a different clock are rejected at compile time:
//!
//! ```compile_fail
//! use identigen_provider::{from_timestamp, Precision, ValueProviderFor};
//! use std::time::{Duration, SystemTime};
//!
//! let time = from_timestamp(SystemTime::now(), Duration::from_secs(60), Precision::Millis).unwrap();
//! let naive = chrono::NaiveDateTime::default();
//! time.value(&naive, &0u32);
//! ```

pub mod constant;
pub mod error;
pub mod key;
pub mod partitioned;
pub mod relative;
pub mod timestamp;

pub use constant::Constant;
pub use error::Error;
pub use key::{hash, Key, StableHasher, StableState};
pub use partitioned::Partitioned;
pub use relative::Relative;
pub use timestamp::{Clock, NaiveClock, Precision, SystemClock, Timestamp, TimestampSource};

use std::{hash::BuildHasher, time::Duration};

/// A bit-field of fixed width.
pub trait ValueProvider {
    /// Number of bits every value of this provider fits in.
    fn significant_bits(&self) -> u32;
}

/// A [`ValueProvider`] that can be evaluated for timestamps of type `T` and keys of type `K`.
pub trait ValueProviderFor<T: Timestamp, K: Key + ?Sized>: ValueProvider {
    /// Computes the field. Always below `2^significant_bits()`.
    fn value(&self, timestamp: &T, key: &K) -> u64;
}

/// Minimum number of bits needed to represent `value` (zero needs none).
pub const fn significant_bits(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Creates a provider that always yields `value`.
pub fn from_constant(value: u64) -> Constant {
    Constant::new(value)
}

/// Creates a provider spreading keys across `num_buckets` buckets.
pub fn partitioned(num_buckets: u64) -> Result<Partitioned, Error> {
    Partitioned::new(num_buckets)
}

/// Like [`partitioned`], hashing keys with `state`.
pub fn partitioned_with_hasher<S: BuildHasher>(
    num_buckets: u64,
    state: S,
) -> Result<Partitioned<S>, Error> {
    Partitioned::with_hasher(num_buckets, state)
}

/// Creates a provider counting `precision` ticks since `epoch`, modulo `max_duration`.
pub fn from_timestamp<T: Timestamp>(
    epoch: T,
    max_duration: Duration,
    precision: Precision,
) -> Result<Relative<T>, Error> {
    Relative::new(epoch, max_duration, precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significant_bits() {
        assert_eq!(significant_bits(0), 0);
        assert_eq!(significant_bits(1), 1);
        assert_eq!(significant_bits(2), 2);
        assert_eq!(significant_bits(4), 3);
        assert_eq!(significant_bits(10), 4);
        assert_eq!(significant_bits(42), 6);
        assert_eq!(significant_bits(64), 7);
        assert_eq!(significant_bits(u64::MAX), 64);
    }

    #[test]
    fn test_providers_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Constant>();
        assert_send_sync::<Partitioned>();
        assert_send_sync::<Relative<std::time::SystemTime>>();
    }

    #[test]
    fn test_dyn_provider() {
        let fields: Vec<Box<dyn ValueProvider>> = vec![
            Box::new(from_constant(3)),
            Box::new(partitioned(11).unwrap()),
        ];
        let bits: u32 = fields.iter().map(|f| f.significant_bits()).sum();
        assert_eq!(bits, 2 + 4);
    }
}
