//! A field derived from the key, spreading keys across a fixed number of buckets.

use crate::{
    significant_bits, Error, Key, StableState, Timestamp, ValueProvider, ValueProviderFor,
};
use std::hash::BuildHasher;
use tracing::debug;

/// Yields `hash(key) % num_buckets`.
#[derive(Clone, Debug)]
pub struct Partitioned<S = StableState> {
    num_buckets: u64,
    significant_bits: u32,
    state: S,
}

impl Partitioned {
    /// Creates a provider over `num_buckets` buckets using [`StableState`].
    pub fn new(num_buckets: u64) -> Result<Self, Error> {
        Self::with_hasher(num_buckets, StableState::default())
    }
}

impl<S: BuildHasher> Partitioned<S> {
    /// Creates a provider over `num_buckets` buckets, hashing keys with `state`.
    ///
    /// `state` must hash equal keys equally on every call for values to be stable.
    pub fn with_hasher(num_buckets: u64, state: S) -> Result<Self, Error> {
        if num_buckets == 0 {
            return Err(Error::ZeroBuckets);
        }
        let significant_bits = significant_bits(num_buckets - 1);
        debug!(num_buckets, bits = significant_bits, "built partitioned provider");
        Ok(Self {
            num_buckets,
            significant_bits,
            state,
        })
    }

    /// Number of buckets keys are spread across.
    pub fn num_buckets(&self) -> u64 {
        self.num_buckets
    }
}

impl<S> ValueProvider for Partitioned<S> {
    fn significant_bits(&self) -> u32 {
        self.significant_bits
    }
}

impl<T: Timestamp, K: Key + ?Sized, S: BuildHasher> ValueProviderFor<T, K> for Partitioned<S> {
    fn value(&self, _: &T, key: &K) -> u64 {
        self.state.hash_one(key) % self.num_buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash;
    use identigen_macros::test_traced;
    use std::{
        hash::{BuildHasherDefault, Hasher},
        time::SystemTime,
    };

    /// Hashes integers to themselves.
    #[derive(Default)]
    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for byte in bytes {
                self.0 = (self.0 << 8) | u64::from(*byte);
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    #[test_traced]
    fn test_partitioned() {
        let provider = Partitioned::new(11).unwrap();
        assert_eq!(provider.significant_bits(), 4);
        assert_eq!(provider.num_buckets(), 11);
        let now = SystemTime::now();
        for key in [0u64, 1, 13, 1 << 40, u64::MAX] {
            assert_eq!(provider.value(&now, &key), hash(&key) % 11);
        }
        assert_eq!(provider.value(&now, "tenant"), hash("tenant") % 11);
    }

    #[test_traced]
    fn test_custom_hasher() {
        let state = BuildHasherDefault::<IdentityHasher>::default();
        let provider = Partitioned::with_hasher(11, state).unwrap();
        let now = SystemTime::now();
        assert_eq!(provider.value(&now, &1u64), 1);
        assert_eq!(provider.value(&now, &13u64), 2);
    }

    #[test_traced]
    fn test_buckets_pinned() {
        let provider = Partitioned::new(11).unwrap();
        let now = SystemTime::now();
        assert_eq!(provider.value(&now, &42u64), 4);
        assert_eq!(provider.value(&now, &1u64), 10);
        assert_eq!(provider.value(&now, "tenant"), 1);
    }

    #[test_traced]
    fn test_bucket_widths() {
        assert_eq!(Partitioned::new(1).unwrap().significant_bits(), 0);
        assert_eq!(Partitioned::new(2).unwrap().significant_bits(), 1);
        assert_eq!(Partitioned::new(1024).unwrap().significant_bits(), 10);
        assert_eq!(Partitioned::new(1025).unwrap().significant_bits(), 11);
        assert_eq!(Partitioned::new(0).unwrap_err(), Error::ZeroBuckets);
    }
}
