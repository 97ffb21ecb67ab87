//! A field that never changes, such as a node or datacenter identifier.

use crate::{significant_bits, Key, Timestamp, ValueProvider, ValueProviderFor};
use tracing::debug;

/// Always yields the value it was configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Constant {
    value: u64,
    significant_bits: u32,
}

impl Constant {
    /// Creates a provider that always yields `value`.
    pub fn new(value: u64) -> Self {
        let provider = Self {
            value,
            significant_bits: significant_bits(value),
        };
        debug!(value, bits = provider.significant_bits, "built constant provider");
        provider
    }
}

impl ValueProvider for Constant {
    fn significant_bits(&self) -> u32 {
        self.significant_bits
    }
}

impl<T: Timestamp, K: Key + ?Sized> ValueProviderFor<T, K> for Constant {
    fn value(&self, _: &T, _: &K) -> u64 {
        self.value
    }
}
