//! Instants on a clock, sources of such instants, and the units durations are counted in.
//!
//! Every [`Timestamp`] names the [`Clock`] it was read from. Providers that compare timestamps
//! only accept pairs from the same clock, so mixing clocks fails to compile.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A source of time whose readings can be compared with each other.
pub trait Clock: 'static {
    /// Human-readable name, used in logs.
    const NAME: &'static str;
}

/// Wall-clock time in UTC, measured from the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SystemClock;

impl Clock for SystemClock {
    const NAME: &'static str = "system";
}

/// Civil date and time with no time zone attached.
///
/// Readings are measured from `1970-01-01T00:00:00` in whatever zone they were taken, so they
/// cannot be compared with [`SystemClock`] readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaiveClock;

impl Clock for NaiveClock {
    const NAME: &'static str = "naive";
}

/// An instant on some [`Clock`].
pub trait Timestamp: Copy {
    /// The clock this instant was read from.
    type Clock: Clock;

    /// Signed nanoseconds between the clock's epoch and this instant.
    fn nanos_since_epoch(&self) -> i128;
}

const NANOS_PER_SEC: i128 = 1_000_000_000;

impl Timestamp for SystemTime {
    type Clock = SystemClock;

    fn nanos_since_epoch(&self) -> i128 {
        match self.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_nanos() as i128,
            Err(before) => -(before.duration().as_nanos() as i128),
        }
    }
}

impl Timestamp for DateTime<Utc> {
    type Clock = SystemClock;

    fn nanos_since_epoch(&self) -> i128 {
        i128::from(self.timestamp()) * NANOS_PER_SEC + i128::from(self.timestamp_subsec_nanos())
    }
}

impl Timestamp for NaiveDateTime {
    type Clock = NaiveClock;

    fn nanos_since_epoch(&self) -> i128 {
        self.and_utc().nanos_since_epoch()
    }
}

/// Something that can be asked for the current time.
pub trait TimestampSource {
    /// The kind of instant produced.
    type Timestamp: Timestamp;

    /// Reads the current time.
    fn now(&self) -> Self::Timestamp;
}

impl TimestampSource for SystemClock {
    type Timestamp = SystemTime;

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl TimestampSource for NaiveClock {
    type Timestamp = NaiveDateTime;

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F, T> TimestampSource for F
where
    F: Fn() -> T,
    T: Timestamp,
{
    type Timestamp = T;

    fn now(&self) -> T {
        self()
    }
}

/// Unit in which a provider counts time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    Nanos,
    Micros,
    Millis,
    Seconds,
}

impl Precision {
    /// Nanoseconds in one tick.
    pub const fn nanos_per_tick(self) -> u64 {
        match self {
            Precision::Nanos => 1,
            Precision::Micros => 1_000,
            Precision::Millis => 1_000_000,
            Precision::Seconds => 1_000_000_000,
        }
    }

    /// Whole ticks in a signed span of nanoseconds, rounding toward negative infinity.
    pub fn ticks(self, nanos: i128) -> i128 {
        nanos.div_euclid(i128::from(self.nanos_per_tick()))
    }

    /// Whole ticks in `duration`, rounding down.
    pub fn ticks_in(self, duration: Duration) -> u128 {
        duration.as_nanos() / u128::from(self.nanos_per_tick())
    }
}
