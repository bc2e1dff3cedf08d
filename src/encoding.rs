use num_bigint::BigUint;
use num_traits::Zero;

/// Reads the chunk's bytes as a big-endian unsigned integer. The caller keeps
/// the chunk short enough for the result to fit below the field modulus.
pub fn encode(chunk: &str) -> BigUint {
    BigUint::from_bytes_be(chunk.as_bytes())
}

/// Inverse of [`encode`]: the minimal big-endian bytes of `value`.
pub fn decode(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        return Vec::new();
    }
    value.to_bytes_be()
}

pub fn is_ascii(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii())
}
