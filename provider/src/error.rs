//! Error types for provider construction

use crate::timestamp::Precision;
use thiserror::Error;

/// Error type for provider construction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("number of buckets must be positive")]
    ZeroBuckets,
    #[error("max duration is shorter than one {0:?} tick")]
    ZeroDuration(Precision),
    #[error("max duration of {0} ticks does not fit in 64 bits")]
    DurationTooLong(u128),
}
