//! Read and write scalars and sequences over caller-owned byte regions.
//!
//! # Overview
//!
//! [`ReadCursor`] and [`WriteCursor`] wrap a borrowed byte slice and a position. Every read or
//! write is bounds-checked against the region; nothing is ever allocated, grown, or touched outside
//! of it. Each cursor is generic over an [`Order`] ([`BigEndian`] or [`LittleEndian`]) chosen
//! when the cursor is created.
//!
//! # Supported Types
//!
//! - Scalars: `u8`..`u128`, `i8`..`i128`, `f32`, `f64`, `bool` (see [`Scalar`])
//! - Length-prefixed sequences of anything [`Encode`]: slices, arrays, `Vec<T>`, `str`, `String`
//!
//! Sequences are written as a `u64` count followed by the elements, all in the cursor's byte order.
//!
//! # Failure
//!
//! Operations fail with [`Error::BufferOverflow`] when the region is too short and with
//! [`Error::OutOfRange`] when a requested position or sub-region does not fit. Compound operations
//! (length-prefixed reads and writes) either complete or leave the position where it was.
//!
//! # Example
//!
//! ```
//! use identigen_codec::{BigEndianReader, BigEndianWriter, Error};
//!
//! let mut buf = [0u8; 32];
//! let mut writer = BigEndianWriter::new(&mut buf);
//! writer.write(0x12345678u32)?.write(-1.0f64)?;
//! writer.write_sequence(b"id")?;
//! assert_eq!(writer.written()[..4], [0x12, 0x34, 0x56, 0x78]);
//!
//! // Not enough room left: nothing is written.
//! let position = writer.position();
//! assert!(writer.write_sequence(&[0u64; 4]).is_err());
//! assert_eq!(writer.position(), position);
//!
//! let mut reader = BigEndianReader::new(writer.written());
//! assert_eq!(reader.read::<u32>()?, 0x12345678);
//! assert_eq!(reader.read::<f64>()?, -1.0);
//! assert_eq!(reader.read_bytes()?, b"id");
//! assert!(reader.is_empty());
//! # Ok::<(), Error>(())
//! ```

pub mod config;
pub mod encode;
pub mod endian;
pub mod error;
pub mod reader;
pub mod scalar;
mod util;
pub mod writer;

// Re-export main types and traits
pub use config::LengthCfg;
pub use encode::Encode;
pub use endian::{
    BigEndian, Endian, LittleEndian, NativeEndian, NetworkEndian, Order, FLOAT_WORD_ORDER,
};
pub use error::Error;
pub use reader::{BigEndianReader, LittleEndianReader, ReadCursor};
pub use scalar::Scalar;
pub use writer::{BigEndianWriter, LittleEndianWriter, WriteCursor};
