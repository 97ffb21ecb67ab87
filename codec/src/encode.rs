//! Values that can be written through a [`WriteCursor`], including length-prefixed sequences.
//!
//! Sequences are encoded as `[u64 count][elements...]`, with the count in the cursor's byte order.
//! Elements are themselves [`Encode`], so sequences nest.

use crate::{endian::Order, Error, WriteCursor};

/// A value that can be written to a [`WriteCursor`].
pub trait Encode {
    /// Writes this value at the cursor's position.
    ///
    /// Implementations writing more than one scalar should do so through the cursor's compound
    /// operations so a failure leaves the position unchanged.
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error>;

    /// Writes every element of `items` back to back (without a count).
    ///
    /// Single-byte types override this to copy the slice in one step.
    #[doc(hidden)]
    fn encode_slice<E: Order>(
        items: &[Self],
        cursor: &mut WriteCursor<'_, E>,
    ) -> Result<(), Error>
    where
        Self: Sized,
    {
        for item in items {
            item.encode(cursor)?;
        }
        Ok(())
    }
}

macro_rules! impl_scalar {
    ($($type:ty),* $(,)?) => {
        $(
            impl Encode for $type {
                #[inline]
                fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
                    cursor.write(*self).map(|_| ())
                }
            }
        )*
    };
}

impl_scalar!(u16, u32, u64, u128, i16, i32, i64, i128, f32, f64);

// Single-byte scalars are copied in bulk.
macro_rules! impl_byte {
    ($($type:ty),* $(,)?) => {
        $(
            impl Encode for $type {
                #[inline]
                fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
                    cursor.write(*self).map(|_| ())
                }

                #[inline]
                fn encode_slice<E: Order>(
                    items: &[Self],
                    cursor: &mut WriteCursor<'_, E>,
                ) -> Result<(), Error> {
                    let dst = cursor.reserve(items.len())?;
                    for (d, s) in dst.iter_mut().zip(items) {
                        *d = *s as u8;
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_byte!(i8, bool);

impl Encode for u8 {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        cursor.write(*self).map(|_| ())
    }

    #[inline]
    fn encode_slice<E: Order>(
        items: &[Self],
        cursor: &mut WriteCursor<'_, E>,
    ) -> Result<(), Error> {
        cursor.reserve(items.len())?.copy_from_slice(items);
        Ok(())
    }
}

impl<T: Encode> Encode for [T] {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        cursor.write_sequence(self).map(|_| ())
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        cursor.write_sequence(self.as_slice()).map(|_| ())
    }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        cursor.write_sequence(self.as_slice()).map(|_| ())
    }
}

impl Encode for str {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        cursor.write_sequence(self.as_bytes()).map(|_| ())
    }
}

impl Encode for String {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        self.as_str().encode(cursor)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn encode<E: Order>(&self, cursor: &mut WriteCursor<'_, E>) -> Result<(), Error> {
        (**self).encode(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BigEndian, LittleEndian};
    use identigen_macros::test_traced;

    #[test_traced]
    fn test_byte_slice_bulk() {
        let mut buf = [0u8; 11];
        let mut writer = WriteCursor::<BigEndian>::new(&mut buf);
        writer.encode(&[1u8, 2, 3][..]).unwrap();
        assert_eq!(writer.position(), 11);
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0, 3, 1, 2, 3]);
    }

    #[test_traced]
    fn test_signed_bytes() {
        let mut buf = [0u8; 10];
        let mut writer = WriteCursor::<LittleEndian>::new(&mut buf);
        writer.encode(&vec![-1i8, 2]).unwrap();
        assert_eq!(buf, [2, 0, 0, 0, 0, 0, 0, 0, 0xFF, 2]);
    }

    #[test_traced]
    fn test_str() {
        let mut buf = [0u8; 10];
        let mut writer = WriteCursor::<BigEndian>::new(&mut buf);
        writer.encode("hi").unwrap();
        assert_eq!(buf, [0, 0, 0, 0, 0, 0, 0, 2, b'h', b'i']);

        let mut writer = WriteCursor::<BigEndian>::new(&mut buf);
        assert!(matches!(
            writer.encode(&String::from("too long")),
            Err(Error::BufferOverflow { .. })
        ));
        assert_eq!(writer.position(), 0);
    }

    #[test_traced]
    fn test_nested() {
        let nested: Vec<Vec<u16>> = vec![vec![0x0102], vec![], vec![0x0304, 0x0506]];
        let mut buf = [0u8; 64];
        let mut writer = WriteCursor::<BigEndian>::new(&mut buf);
        writer.encode(&nested).unwrap();
        // outer count + three inner counts + three u16 elements
        assert_eq!(writer.position(), 8 + 3 * 8 + 3 * 2);
        assert_eq!(
            writer.written(),
            [
                0, 0, 0, 0, 0, 0, 0, 3, // outer
                0, 0, 0, 0, 0, 0, 0, 1, 0x01, 0x02, // [0x0102]
                0, 0, 0, 0, 0, 0, 0, 0, // []
                0, 0, 0, 0, 0, 0, 0, 2, 0x03, 0x04, 0x05, 0x06, // [0x0304, 0x0506]
            ]
        );
    }

    #[test_traced]
    fn test_nested_rollback() {
        let nested: [Vec<u32>; 2] = [vec![1], vec![2, 3]];
        // Room for the outer count and the first inner sequence only.
        let mut buf = [0u8; 8 + 8 + 4 + 8];
        let mut writer = WriteCursor::<LittleEndian>::new(&mut buf);
        assert!(matches!(
            writer.encode(&nested),
            Err(Error::BufferOverflow { .. })
        ));
        assert_eq!(writer.position(), 0);
    }
}
