//! Keys that partition identifiers.

use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

/// A value that can select a partition: comparable for equality and hashable, with equal keys
/// hashing equal.
pub trait Key: Eq + Hash {}

impl<K: Eq + Hash + ?Sized> Key for K {}

/// A [`Hasher`] whose output depends only on the bytes a key feeds it.
///
/// Input is absorbed into BLAKE3 and the first 8 bytes of the digest are read as a little-endian
/// `u64`. Integers are absorbed little-endian and `usize`/`isize` are widened to 64 bits, so the
/// result is the same on every platform and every toolchain.
#[derive(Clone, Debug, Default)]
pub struct StableHasher(blake3::Hasher);

macro_rules! write_le {
    ($($method:ident: $type:ty),* $(,)?) => {
        $(
            #[inline]
            fn $method(&mut self, n: $type) {
                self.0.update(&n.to_le_bytes());
            }
        )*
    };
}

impl Hasher for StableHasher {
    fn finish(&self) -> u64 {
        let digest = self.0.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    write_le!(
        write_u16: u16,
        write_u32: u32,
        write_u64: u64,
        write_u128: u128,
        write_i16: i16,
        write_i32: i32,
        write_i64: i64,
        write_i128: i128,
    );

    fn write_usize(&mut self, n: usize) {
        self.write_u64(n as u64);
    }

    fn write_isize(&mut self, n: isize) {
        self.write_i64(n as i64);
    }
}

/// Hasher state used when no other is supplied.
pub type StableState = BuildHasherDefault<StableHasher>;

/// Hashes `key` with [`StableState`].
pub fn hash<K: Key + ?Sized>(key: &K) -> u64 {
    StableState::default().hash_one(key)
}
