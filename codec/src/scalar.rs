//! Fixed-width values that cursors read and write directly.
//!
//! Integers occupy exactly their width in the cursor's byte order. Floats are written as their
//! IEEE-754 bit pattern: `f32` as one 32-bit word, `f64` as two 32-bit halves whose stream order is
//! derived from both the cursor's byte order and [`FLOAT_WORD_ORDER`].

use crate::{
    endian::{Endian, Order, FLOAT_WORD_ORDER},
    Error,
};

/// A value with a fixed encoded width.
pub trait Scalar: Copy {
    /// Number of bytes occupied by the encoded value.
    const SIZE: usize;

    /// Decodes a value from the first [`Self::SIZE`] bytes of `src`.
    fn decode<E: Order>(src: &[u8]) -> Result<Self, Error>;

    /// Encodes the value into the first [`Self::SIZE`] bytes of `dst`.
    fn encode<E: Order>(self, dst: &mut [u8]);
}

impl Scalar for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn decode<E: Order>(src: &[u8]) -> Result<Self, Error> {
        Ok(src[0])
    }

    #[inline]
    fn encode<E: Order>(self, dst: &mut [u8]) {
        dst[0] = self;
    }
}

impl Scalar for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn decode<E: Order>(src: &[u8]) -> Result<Self, Error> {
        Ok(src[0] as i8)
    }

    #[inline]
    fn encode<E: Order>(self, dst: &mut [u8]) {
        dst[0] = self as u8;
    }
}

impl Scalar for bool {
    const SIZE: usize = 1;

    #[inline]
    fn decode<E: Order>(src: &[u8]) -> Result<Self, Error> {
        match src[0] {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(Error::InvalidBool(b)),
        }
    }

    #[inline]
    fn encode<E: Order>(self, dst: &mut [u8]) {
        dst[0] = self as u8;
    }
}

// Multi-byte integers reinterpret the unsigned pattern of the same width.
macro_rules! impl_int {
    ($type:ty, $unsigned:ty, $read:ident, $write:ident) => {
        impl Scalar for $type {
            const SIZE: usize = std::mem::size_of::<$type>();

            #[inline]
            fn decode<E: Order>(src: &[u8]) -> Result<Self, Error> {
                Ok(E::$read(src) as $type)
            }

            #[inline]
            fn encode<E: Order>(self, dst: &mut [u8]) {
                E::$write(dst, self as $unsigned);
            }
        }
    };
}

impl_int!(u16, u16, read_u16, write_u16);
impl_int!(u32, u32, read_u32, write_u32);
impl_int!(u64, u64, read_u64, write_u64);
impl_int!(u128, u128, read_u128, write_u128);
impl_int!(i16, u16, read_u16, write_u16);
impl_int!(i32, u32, read_u32, write_u32);
impl_int!(i64, u64, read_u64, write_u64);
impl_int!(i128, u128, read_u128, write_u128);

impl Scalar for f32 {
    const SIZE: usize = 4;

    #[inline]
    fn decode<E: Order>(src: &[u8]) -> Result<Self, Error> {
        Ok(f32::from_bits(E::read_u32(src)))
    }

    #[inline]
    fn encode<E: Order>(self, dst: &mut [u8]) {
        E::write_u32(dst, self.to_bits());
    }
}

/// Splits `bits` into the two halves of a double in platform storage order.
const fn storage_words(bits: u64) -> [u32; 2] {
    let high = (bits >> 32) as u32;
    let low = bits as u32;
    match FLOAT_WORD_ORDER {
        Endian::Big => [high, low],
        Endian::Little => [low, high],
    }
}

/// Joins two halves in platform storage order back into the bits of a double.
const fn join_storage_words(words: [u32; 2]) -> u64 {
    let (high, low) = match FLOAT_WORD_ORDER {
        Endian::Big => (words[0], words[1]),
        Endian::Little => (words[1], words[0]),
    };
    ((high as u64) << 32) | low as u64
}

/// Whether a cursor with byte order `E` streams the halves of a double in storage order.
///
/// With a big-endian word order, big-endian cursors keep storage order and little-endian cursors
/// swap it. With a little-endian word order the choice is inverted.
const fn halves_in_storage_order<E: Order>() -> bool {
    matches!(
        (FLOAT_WORD_ORDER, E::ENDIAN),
        (Endian::Big, Endian::Big) | (Endian::Little, Endian::Little)
    )
}

impl Scalar for f64 {
    const SIZE: usize = 8;

    #[inline]
    fn decode<E: Order>(src: &[u8]) -> Result<Self, Error> {
        let first = E::read_u32(&src[..4]);
        let second = E::read_u32(&src[4..8]);
        let words = if halves_in_storage_order::<E>() {
            [first, second]
        } else {
            [second, first]
        };
        Ok(f64::from_bits(join_storage_words(words)))
    }

    #[inline]
    fn encode<E: Order>(self, dst: &mut [u8]) {
        let words = storage_words(self.to_bits());
        let (first, second) = if halves_in_storage_order::<E>() {
            (words[0], words[1])
        } else {
            (words[1], words[0])
        };
        E::write_u32(&mut dst[..4], first);
        E::write_u32(&mut dst[4..8], second);
    }
}
