//! Cryptographic operations module

pub mod curve;
pub mod encoding;
pub mod rc4;

pub use curve::{Curve, Point};
pub use encoding::{decode_pkey, encode_pkey};
pub use rc4::{pid_cipher_key, rc4_crypt};

use num_bigint::BigUint;

/// Convert a BigUint to little-endian bytes, zero-padded to `length`.
pub fn bigint_to_bytes_le(n: &BigUint, length: usize) -> Vec<u8> {
    let mut bytes = n.to_bytes_le();
    bytes.resize(length, 0);
    bytes
}

/// Convert little-endian bytes to a BigUint.
pub fn bytes_to_bigint_le(data: &[u8]) -> BigUint {
    BigUint::from_bytes_le(data)
}
