//! Position-tracking writes into a borrowed byte region.

use crate::{
    endian::{BigEndian, LittleEndian, Order},
    util::{at_least, sub_range},
    Encode, Error, ReadCursor, Scalar,
};
use bytes::Bytes;
use std::marker::PhantomData;
use tracing::trace;

/// A write cursor over a caller-owned byte region.
///
/// Sub-writers and input views borrow from the cursor, so the borrow checker rules out a parent
/// and a sub-writer mutating the same bytes at once.
#[derive(Debug)]
pub struct WriteCursor<'a, E: Order> {
    buf: &'a mut [u8],
    position: usize,
    _order: PhantomData<E>,
}

/// A [`WriteCursor`] encoding most-significant byte first.
pub type BigEndianWriter<'a> = WriteCursor<'a, BigEndian>;

/// A [`WriteCursor`] encoding least-significant byte first.
pub type LittleEndianWriter<'a> = WriteCursor<'a, LittleEndian>;

impl<'a, E: Order> WriteCursor<'a, E> {
    /// Creates a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            position: 0,
            _order: PhantomData,
        }
    }

    /// Creates a cursor positioned at `position`.
    ///
    /// Fails with [`Error::OutOfRange`] if `position` is past the end of `buf`.
    pub fn with_position(buf: &'a mut [u8], position: usize) -> Result<Self, Error> {
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

    /// Bytes left to write.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// Offset of the next byte to write.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to `position`, returning the previous position.
    ///
    /// Fails with [`Error::OutOfRange`] if `position` is past the end of the region.
    pub fn set_position(&mut self, position: usize) -> Result<usize, Error> {
        sub_range(position, 0, self.capacity())?;
        Ok(std::mem::replace(&mut self.position, position))
    }

    /// Writes a fixed-width value and advances past it.
    ///
    /// On failure nothing is written and the position is unchanged.
    #[inline]
    pub fn write<T: Scalar>(&mut self, value: T) -> Result<&mut Self, Error> {
        at_least(self.remaining(), T::SIZE)?;
        value.encode::<E>(&mut self.buf[self.position..self.position + T::SIZE]);
        self.position += T::SIZE;
        Ok(self)
    }

    /// Writes any [`Encode`] value.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self, Error> {
        value.encode(self)?;
        Ok(self)
    }

    /// Writes a `u64` element count followed by every element of `items`.
    ///
    /// Slices of single-byte elements are copied in one step. If any part does not fit, the
    /// position is restored to where it was before the call.
    pub fn write_sequence<T: Encode>(&mut self, items: &[T]) -> Result<&mut Self, Error> {
        self.checkpoint("write_sequence", |writer| {
            writer.write(items.len() as u64)?;
            T::encode_slice(items, writer)
        })?;
        Ok(self)
    }

    /// Writes a `u64` element count followed by every item yielded by `iter`.
    ///
    /// The count written is the number of items actually yielded. If any part does not fit, the
    /// position is restored to where it was before the call.
    pub fn write_iter<I>(&mut self, iter: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        I::Item: Encode,
    {
        self.checkpoint("write_iter", |writer| {
            let iter = iter.into_iter();
            let start = writer.position;
            writer.write(iter.len() as u64)?;
            let mut count = 0u64;
            for item in iter {
                item.encode(writer)?;
                count += 1;
            }
            // Patch the prefix in case the iterator misreported its length.
            E::write_u64(&mut writer.buf[start..start + u64::SIZE], count);
            Ok(())
        })?;
        Ok(self)
    }

    /// Returns a view of `[start, start + length)`.
    pub fn to_input_view(&self, start: usize, length: usize) -> Result<&[u8], Error> {
        let range = sub_range(start, length, self.capacity())?;
        Ok(&self.buf[range])
    }

    /// Returns a view of the bytes written between `start` and the current position.
    pub fn to_input_view_from(&self, start: usize) -> Result<&[u8], Error> {
        let length = self.position.checked_sub(start).ok_or(Error::OutOfRange {
            start,
            length: 0,
            capacity: self.position,
        })?;
        self.to_input_view(start, length)
    }

    /// Returns a view of every byte before the current position.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.position]
    }

    /// Consumes the cursor, returning a view of every byte before its position.
    pub fn into_written(self) -> &'a [u8] {
        let Self { buf, position, .. } = self;
        let buf: &'a [u8] = buf;
        &buf[..position]
    }

    /// Returns a reader over the written bytes.
    pub fn to_reader(&self) -> ReadCursor<'_, E> {
        ReadCursor::new(self.written())
    }

    /// Copies the written bytes into an owned [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.written())
    }

    /// Returns a cursor over `[start, start + length)`, positioned at its start.
    pub fn subwriter(&mut self, start: usize, length: usize) -> Result<WriteCursor<'_, E>, Error> {
        let range = sub_range(start, length, self.capacity())?;
        Ok(WriteCursor::new(&mut self.buf[range]))
    }

    /// Returns a cursor over everything from `start` to the end of the region.
    pub fn subwriter_from(&mut self, start: usize) -> Result<WriteCursor<'_, E>, Error> {
        let length = self.capacity().checked_sub(start).ok_or(Error::OutOfRange {
            start,
            length: 0,
            capacity: self.capacity(),
        })?;
        self.subwriter(start, length)
    }

    /// Returns a cursor over the unwritten rest of the region.
    pub fn subwriter_rest(&mut self) -> WriteCursor<'_, E> {
        WriteCursor::new(&mut self.buf[self.position..])
    }

    /// Claims the next `len` bytes, returning them to be filled.
    pub(crate) fn reserve(&mut self, len: usize) -> Result<&mut [u8], Error> {
        at_least(self.remaining(), len)?;
        let start = self.position;
        self.position += len;
        Ok(&mut self.buf[start..start + len])
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
            trace!(op = name, position, failed_at = self.position, ?err, "rolled back write");
            self.position = position;
        }
        result
    }
}
