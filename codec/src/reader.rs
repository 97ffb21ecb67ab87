//! Position-tracking reads over a borrowed byte region.

use crate::{
    endian::{BigEndian, LittleEndian, Order},
    util::{at_least, prefix_len, sub_range},
    Error, LengthCfg, Scalar,
};
use bytes::Buf;
use std::marker::PhantomData;
use tracing::trace;

/// A read cursor over a caller-owned byte region.
///
/// The cursor never copies the region: byte views it returns borrow from the region for `'a`.
/// Copying a cursor copies only its position.
#[derive(Clone, Copy, Debug)]
pub struct ReadCursor<'a, E: Order> {
    buf: &'a [u8],
    position: usize,
    _order: PhantomData<E>,
}

/// A [`ReadCursor`] decoding most-significant byte first.
pub type BigEndianReader<'a> = ReadCursor<'a, BigEndian>;

/// A [`ReadCursor`] decoding least-significant byte first.
pub type LittleEndianReader<'a> = ReadCursor<'a, LittleEndian>;

impl<'a, E: Order> ReadCursor<'a, E> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            position: 0,
            _order: PhantomData,
        }
    }

    /// Creates a cursor positioned at `position`.
    ///
    /// Fails with [`Error::OutOfRange`] if `position` is past the end of `buf`.
    pub fn with_position(buf: &'a [u8], position: usize) -> Result<Self, Error> {
        sub_range(position, 0, buf.len())?;
        Ok(Self {
            buf,
            position,
            _order: PhantomData,
        })
    }

    /// Size of the region in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// Offset of the next byte to read.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns true if every byte has been read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a fixed-width value and advances past it.
    ///
    /// On failure the position is unchanged.
    #[inline]
    pub fn read<T: Scalar>(&mut self) -> Result<T, Error> {
        at_least(self.remaining(), T::SIZE)?;
        let value = T::decode::<E>(&self.buf[self.position..])?;
        self.position += T::SIZE;
        Ok(value)
    }

    /// Reads a `u64` length prefix and returns a view of that many following bytes.
    ///
    /// On failure the position is restored to where it was before the call.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], Error> {
        self.read_bytes_cfg(&LengthCfg::default())
    }

    /// Like [`Self::read_bytes`], but rejects lengths outside `cfg` with
    /// [`Error::InvalidLength`].
    pub fn read_bytes_cfg(&mut self, cfg: &LengthCfg) -> Result<&'a [u8], Error> {
        self.checkpoint("read_bytes", |reader| {
            let len = reader.read_len(cfg)?;
            at_least(reader.remaining(), len)?;
            let buf: &'a [u8] = reader.buf;
            let view = &buf[reader.position..reader.position + len];
            reader.position += len;
            Ok(view)
        })
    }

    /// Reads a `u64` count followed by that many scalars.
    ///
    /// The total size is checked against the remaining bytes before anything is allocated. On
    /// failure the position is restored to where it was before the call.
    pub fn read_sequence<T: Scalar>(&mut self) -> Result<Vec<T>, Error> {
        self.read_sequence_cfg(&LengthCfg::default())
    }

    /// Like [`Self::read_sequence`], but rejects counts outside `cfg` with
    /// [`Error::InvalidLength`].
    pub fn read_sequence_cfg<T: Scalar>(&mut self, cfg: &LengthCfg) -> Result<Vec<T>, Error> {
        self.checkpoint("read_sequence", |reader| {
            let count = reader.read_len(cfg)?;
            let remaining = reader.remaining();
            let needed = count
                .checked_mul(T::SIZE)
                .ok_or(Error::BufferOverflow {
                    needed: usize::MAX,
                    remaining,
                })?;
            at_least(remaining, needed)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(reader.read::<T>()?);
            }
            Ok(items)
        })
    }

    /// Returns a cursor over `[start, start + length)`, positioned at its start.
    pub fn subreader(&self, start: usize, length: usize) -> Result<ReadCursor<'a, E>, Error> {
        let range = sub_range(start, length, self.capacity())?;
        Ok(ReadCursor::new(&self.buf[range]))
    }

    /// Returns a cursor over everything from `start` to the end of the region.
    pub fn subreader_from(&self, start: usize) -> Result<ReadCursor<'a, E>, Error> {
        let length = self.capacity().checked_sub(start).ok_or(Error::OutOfRange {
            start,
            length: 0,
            capacity: self.capacity(),
        })?;
        self.subreader(start, length)
    }

    /// Returns a cursor over the unread rest of the region.
    pub fn subreader_rest(&self) -> ReadCursor<'a, E> {
        ReadCursor::new(&self.buf[self.position..])
    }

    fn read_len(&mut self, cfg: &LengthCfg) -> Result<usize, Error> {
        let prefix = self.read::<u64>()?;
        let len = prefix_len(prefix, self.remaining())?;
        cfg.check(len)
    }

    /// Runs `op`, restoring the position if it fails.
    fn checkpoint<T>(
        &mut self,
        name: &'static str,
        op: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let position = self.position;
        let result = op(self);
        if let Err(err) = &result {
            trace!(op = name, position, failed_at = self.position, ?err, "rolled back read");
            self.position = position;
        }
        result
    }
}

/// Exposes the unread bytes to [`Buf`]-based decoders.
///
/// [`Buf`] getters choose their own byte order: `get_u32` and friends always decode big-endian and
/// the `_le` variants little-endian, whatever `E` is. Use [`ReadCursor::read`] to decode in the
/// cursor's order.
impl<E: Order> Buf for ReadCursor<'_, E> {
    fn remaining(&self) -> usize {
        ReadCursor::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        &self.buf[self.position..]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= ReadCursor::remaining(self),
            "cannot advance past the end of the region"
        );
        self.position += cnt;
    }
}
