//! Error types for cursor operations

use thiserror::Error;

/// Error type for cursor operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("buffer overflow: {needed} bytes needed, {remaining} remaining")]
    BufferOverflow { needed: usize, remaining: usize },
    #[error("out of range: {start}+{length} exceeds capacity {capacity}")]
    OutOfRange {
        start: usize,
        length: usize,
        capacity: usize,
    },
    #[error("invalid length: {0}")]
    InvalidLength(usize),
    #[error("invalid bool: {0:#04x}")]
    InvalidBool(u8),
}
