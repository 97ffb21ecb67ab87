//! Bounds checks shared by both cursors.

use crate::Error;
use std::ops::Range;

/// Ensures at least `needed` bytes remain.
#[inline]
pub(crate) fn at_least(remaining: usize, needed: usize) -> Result<(), Error> {
    if remaining < needed {
        return Err(Error::BufferOverflow { needed, remaining });
    }
    Ok(())
}

/// Resolves `[start, start + length)` against a region of `capacity` bytes.
///
/// Fails if the end overflows `usize` or lies past `capacity`.
#[inline]
pub(crate) fn sub_range(start: usize, length: usize, capacity: usize) -> Result<Range<usize>, Error> {
    match start.checked_add(length) {
        Some(end) if end <= capacity => Ok(start..end),
        _ => Err(Error::OutOfRange {
            start,
            length,
            capacity,
        }),
    }
}

/// Converts a decoded length prefix into a byte count, failing if it cannot be addressed.
#[inline]
pub(crate) fn prefix_len(prefix: u64, remaining: usize) -> Result<usize, Error> {
    usize::try_from(prefix).map_err(|_| Error::BufferOverflow {
        needed: usize::MAX,
        remaining,
    })
}
