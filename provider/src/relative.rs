//! A field counting time since an epoch, wrapping after a maximum duration.

use crate::{
    significant_bits, Clock, Error, Key, Precision, Timestamp, ValueProvider, ValueProviderFor,
};
use std::time::Duration;
use tracing::debug;

/// Yields `(timestamp - epoch) mod max_duration`, counted in ticks of a [`Precision`].
///
/// Only timestamps read from the epoch's [`Clock`] are accepted; passing any other kind does not
/// compile. Timestamps before the epoch wrap around the same cycle, so the value is always below
/// `max_duration`.
#[derive(Clone, Copy, Debug)]
pub struct Relative<T: Timestamp> {
    epoch: T,
    epoch_nanos: i128,
    max_ticks: u64,
    precision: Precision,
    significant_bits: u32,
}

impl<T: Timestamp> Relative<T> {
    /// Creates a provider counting `precision` ticks since `epoch`, modulo `max_duration`.
    ///
    /// Fails if `max_duration` is shorter than one tick or spans more than `u64::MAX` ticks.
    pub fn new(epoch: T, max_duration: Duration, precision: Precision) -> Result<Self, Error> {
        let ticks = precision.ticks_in(max_duration);
        if ticks == 0 {
            return Err(Error::ZeroDuration(precision));
        }
        let max_ticks = u64::try_from(ticks).map_err(|_| Error::DurationTooLong(ticks))?;
        let significant_bits = significant_bits(max_ticks - 1);
        debug!(
            clock = <T::Clock as Clock>::NAME,
            max_ticks,
            ?precision,
            bits = significant_bits,
            "built timestamp provider"
        );
        Ok(Self {
            epoch,
            epoch_nanos: epoch.nanos_since_epoch(),
            max_ticks,
            precision,
            significant_bits,
        })
    }

    /// Instant that yields zero.
    pub fn epoch(&self) -> T {
        self.epoch
    }

    /// Unit values are counted in.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of distinct values before wrapping.
    pub fn max_ticks(&self) -> u64 {
        self.max_ticks
    }
}

impl<T: Timestamp> ValueProvider for Relative<T> {
    fn significant_bits(&self) -> u32 {
        self.significant_bits
    }
}

impl<T, U, K> ValueProviderFor<U, K> for Relative<T>
where
    T: Timestamp,
    U: Timestamp<Clock = T::Clock>,
    K: Key + ?Sized,
{
    fn value(&self, timestamp: &U, _: &K) -> u64 {
        let elapsed = self
            .precision
            .ticks(timestamp.nanos_since_epoch() - self.epoch_nanos);
        // In [0, max_ticks), which fits in u64.
        elapsed.rem_euclid(i128::from(self.max_ticks)) as u64
    }
}
