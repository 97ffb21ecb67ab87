//! Byte order strategies.
//!
//! Cursors are generic over an [`Order`], so the order is fixed when the cursor type is chosen and
//! every encode/decode is a single `byteorder` call with no runtime branch.

pub use byteorder::{BigEndian, LittleEndian, NativeEndian, NetworkEndian};

/// Byte order tag, for comparing strategies and platform facts at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Most-significant byte first.
    Big,
    /// Least-significant byte first.
    Little,
}

impl Endian {
    /// The byte order of the target platform.
    pub const NATIVE: Endian = if cfg!(target_endian = "big") {
        Endian::Big
    } else {
        Endian::Little
    };
}

/// Order in which the target stores the two 32-bit halves of an `f64`.
///
/// Some historical platforms stored doubles with the halves swapped relative to their integer byte
/// order. No Rust target does, so this resolves to the native order at build time.
pub const FLOAT_WORD_ORDER: Endian = Endian::NATIVE;

/// A byte order a cursor can be specialized for.
///
/// Only [`BigEndian`] and [`LittleEndian`] qualify, since [`byteorder::ByteOrder`] is sealed.
pub trait Order: byteorder::ByteOrder + Send + Sync + 'static {
    /// The tag for this strategy.
    const ENDIAN: Endian;
}

impl Order for BigEndian {
    const ENDIAN: Endian = Endian::Big;
}

impl Order for LittleEndian {
    const ENDIAN: Endian = Endian::Little;
}
