//! Limits applied to length prefixes read from untrusted input.

use crate::Error;
use core::ops::{Bound, RangeBounds};

/// Bounds accepted for a decoded length prefix.
///
/// Readers consult a `LengthCfg` before handing out a byte view or allocating a sequence, so a
/// hostile prefix is rejected with [`Error::InvalidLength`] instead of being trusted.
///
/// # Examples
///
/// ```
/// use identigen_codec::LengthCfg;
///
/// // Accept lengths in 0..=1024
/// let cfg = LengthCfg::new(0..=1024);
/// assert!(cfg.contains(500));
/// assert!(!cfg.contains(2000));
///
/// // Accept any non-empty length
/// let cfg = LengthCfg::from(1..);
/// assert!(cfg.contains(1));
/// assert!(!cfg.contains(0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct LengthCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

macro_rules! impl_from_range {
    ($($range:ty),* $(,)?) => {
        $(
            impl From<$range> for LengthCfg {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}

impl_from_range!(
    core::ops::Range<usize>,
    core::ops::RangeInclusive<usize>,
    core::ops::RangeFrom<usize>,
    core::ops::RangeTo<usize>,
    core::ops::RangeToInclusive<usize>,
    core::ops::RangeFull,
);

impl Default for LengthCfg {
    /// Accepts every length.
    fn default() -> Self {
        Self::new(..)
    }
}

impl LengthCfg {
    /// Creates a new `LengthCfg` from any type implementing `RangeBounds<usize>`.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `LengthCfg` that only accepts exactly `len`.
    pub fn exact(len: usize) -> Self {
        Self {
            start: Bound::Included(len),
            end: Bound::Included(len),
        }
    }

    /// Creates a `LengthCfg` that accepts lengths up to and including `max`.
    pub fn at_most(max: usize) -> Self {
        Self::new(..=max)
    }

    /// Returns true if `len` is within the bounds.
    pub fn contains(&self, len: usize) -> bool {
        match self.start {
            Bound::Included(s) if len < s => return false,
            Bound::Excluded(s) if len <= s => return false,
            _ => {}
        }
        match self.end {
            Bound::Included(e) if len > e => return false,
            Bound::Excluded(e) if len >= e => return false,
            _ => {}
        }
        true
    }

    /// Returns `len` if it is within the bounds, otherwise [`Error::InvalidLength`].
    pub(crate) fn check(&self, len: usize) -> Result<usize, Error> {
        if !self.contains(len) {
            return Err(Error::InvalidLength(len));
        }
        Ok(len)
    }
}

impl RangeBounds<usize> for LengthCfg {
    fn start_bound(&self) -> Bound<&usize> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&usize> {
        self.end.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ops::Bound::{Excluded, Included, Unbounded};

    #[test]
    fn test_length_cfg_from() {
        assert_eq!(
            LengthCfg::from(..),
            LengthCfg {
                start: Unbounded,
                end: Unbounded
            }
        );
        assert_eq!(
            LengthCfg::from(5..10),
            LengthCfg {
                start: Included(5),
                end: Excluded(10)
            }
        );
        assert_eq!(
            LengthCfg::from(..=10),
            LengthCfg {
                start: Unbounded,
                end: Included(10)
            }
        );
        assert_eq!(LengthCfg::default(), LengthCfg::from(..));
        assert_eq!(LengthCfg::at_most(3), LengthCfg::from(..=3));
    }

    #[test]
    fn test_length_cfg_contains() {
        let unbounded = LengthCfg::default();
        assert!(unbounded.contains(0));
        assert!(unbounded.contains(usize::MAX));

        let half_open = LengthCfg::from(5..10);
        assert!(!half_open.contains(4));
        assert!(half_open.contains(5));
        assert!(half_open.contains(9));
        assert!(!half_open.contains(10));

        let exact = LengthCfg::exact(4);
        assert!(!exact.contains(3));
        assert!(exact.contains(4));
        assert!(!exact.contains(5));

        // Exclusive start, as produced by a custom `RangeBounds`
        let excluded = LengthCfg {
            start: Excluded(5),
            end: Included(10),
        };
        assert!(!excluded.contains(5));
        assert!(excluded.contains(6));
        assert!(excluded.contains(10));
    }

    #[test]
    fn test_length_cfg_empty() {
        let empty = LengthCfg::from(5..5);
        assert!(!empty.contains(4));
        assert!(!empty.contains(5));
        assert!(!empty.contains(6));
    }

    #[test]
    fn test_length_cfg_check() {
        let cfg = LengthCfg::at_most(8);
        assert_eq!(cfg.check(8), Ok(8));
        assert_eq!(cfg.check(9), Err(Error::InvalidLength(9)));
    }
}
