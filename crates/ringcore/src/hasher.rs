//! Pluggable 32-bit hashing.
//!
//! A `Hasher` converts arbitrary bytes into a ring position. The default
//! is CRC-32/IEEE; swapping in a different 32-bit hash never touches ring
//! logic.

use crate::point::Point;

/// Converts keys into ring positions.
///
/// Hashers are stateless and thread-safe, allowing concurrent position
/// generation without synchronization overhead. Cryptographic strength is
/// explicitly not required; distribution quality is.
pub trait Hasher: Send + Sync + 'static {
    /// Hashes a key to a position on the ring.
    fn hash(&self, key: &[u8]) -> Point;

    /// Returns the name of this hasher (for diagnostics).
    fn name(&self) -> &'static str;
}

/// CRC-32/IEEE hasher, the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Crc32;

impl Hasher for Crc32 {
    fn hash(&self, key: &[u8]) -> Point {
        Point(crc32fast::hash(key))
    }

    fn name(&self) -> &'static str {
        "Crc32"
    }
}

/// Any `Fn(&[u8]) -> u32` works as a hasher, so callers can plug in a
/// closure (e.g. a murmur32 binding) without defining a wrapper type.
impl<F> Hasher for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
{
    fn hash(&self, key: &[u8]) -> Point {
        Point(self(key))
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32_matches_reference_vector() {
        // CRC-32/IEEE of "123456789" is the classic check value.
        assert_eq!(Crc32.hash(b"123456789"), Point(0xcbf4_3926));
    }

    #[test]
    fn test_crc32_is_deterministic() {
        assert_eq!(Crc32.hash(b"10.0.0.1"), Crc32.hash(b"10.0.0.1"));
        assert_ne!(Crc32.hash(b"10.0.0.1"), Crc32.hash(b"10.0.0.2"));
    }

    #[test]
    fn test_closure_as_hasher() {
        let constant = |_: &[u8]| 42u32;
        assert_eq!(constant.hash(b"anything"), Point(42));
        assert_eq!(Hasher::name(&constant), "custom");
    }
}
