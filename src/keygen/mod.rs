//! Key generation and validation
//!
//! A key packs {payload, h, s} into a 21-byte little-endian block as
//! (s << 91) | (h << 56) | payload, RC4-encrypts it under a key derived from
//! the product identifier, truncates to 20 bytes and renders the result in
//! base 24. The response bound (s < 2^61 − 1) keeps the block below 2^152, so
//! the byte dropped by the truncation is always zero before encryption;
//! validation zero-extends it back and the signature-field mask discards
//! whatever the decrypt puts there.

pub mod lkp;
pub mod sign;
pub mod spk;
pub mod validation;

pub use lkp::generate_lkp;
pub use sign::{generate_signature, validate_signature, Signature};
pub use spk::generate_spk;
pub use validation::validate_tskey;

use num_bigint::BigUint;
use num_traits::One;

use crate::crypto::{bigint_to_bytes_le, bytes_to_bigint_le, encode_pkey, pid_cipher_key, rc4_crypt};
use crate::error::KeygenError;
use crate::types::CurveParameters;

/// Domain payload width: 7 bytes, the low 56 bits of the packed block.
pub const PAYLOAD_BYTES: usize = 7;
const PAYLOAD_BITS: u32 = 8 * PAYLOAD_BYTES as u32;
/// Challenge width in the packed block.
pub const HASH_BITS: u32 = 35;
/// Container field width for the response.
pub const SIGNATURE_FIELD_BITS: u32 = 69;
/// Generation only accepts responses below 2^61 − 1; this is what keeps the
/// packed block inside the 20-byte encrypted budget.
pub const SIGNATURE_BOUND_BITS: u32 = 61;
/// Packed block width before encryption.
pub const PACKED_BYTES: usize = 21;
/// Encrypted width kept for encoding.
pub const KEY_BYTES: usize = 20;
/// Low payload bits holding the server key-id.
const SPKID_BITS: u32 = 41;
/// Point coordinate width in the challenge hash input.
const COORDINATE_BYTES: usize = 48;
/// Default nonce retry budget.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Extract the key-id embedded in a product identifier: characters 10..16
/// and 18..23 concatenated, then the leading dash-delimited digit group
/// parsed as a decimal integer.
pub fn get_spkid(pid: &str) -> Result<u64, KeygenError> {
    let (head, tail) = match (pid.get(10..16), pid.get(18..23)) {
        (Some(head), Some(tail)) => (head, tail),
        _ => {
            return Err(KeygenError::InvalidProductIdentifier(format!(
                "product id too short: {pid:?}"
            )))
        }
    };

    let combined = format!("{head}{tail}");
    let digits = combined.split('-').next().unwrap_or("");
    digits.parse::<u64>().map_err(|_| {
        KeygenError::InvalidProductIdentifier(format!("no key id digits in {pid:?}"))
    })
}

/// Pack payload and signature into the 21-byte little-endian block.
pub(crate) fn pack_key(payload: &[u8], signature: &Signature) -> Vec<u8> {
    let packed = (&signature.s << (PAYLOAD_BITS + HASH_BITS))
        | (&signature.h << PAYLOAD_BITS)
        | bytes_to_bigint_le(payload);
    bigint_to_bytes_le(&packed, PACKED_BYTES)
}

pub(crate) struct UnpackedKey {
    pub payload: Vec<u8>,
    pub signature: Signature,
}

/// Split a decrypted 21-byte block back into payload and signature fields.
/// The block's top byte sits above the signature field and is masked off; it
/// carries keystream garbage when the key was rebuilt from 20 bytes.
pub(crate) fn unpack_key(block: &[u8]) -> UnpackedKey {
    let payload = block[..PAYLOAD_BYTES].to_vec();
    let sigdata = bytes_to_bigint_le(&block[PAYLOAD_BYTES..]);

    let h = &sigdata & ((BigUint::one() << HASH_BITS) - 1u32);
    let s = (&sigdata >> HASH_BITS) & ((BigUint::one() << SIGNATURE_FIELD_BITS) - 1u32);

    UnpackedKey {
        payload,
        signature: Signature { h, s },
    }
}

/// Generate a key over a 7-byte payload: sign, pack, encrypt under the
/// product identifier, truncate to 20 bytes and encode.
pub(crate) fn generate_tskey(
    pid: &str,
    payload: &[u8],
    params: &CurveParameters,
    max_attempts: usize,
) -> Result<String, KeygenError> {
    let signature = sign::generate_signature(payload, params, max_attempts)?;

    let block = pack_key(payload, &signature);
    let encrypted = rc4_crypt(&pid_cipher_key(pid), &block);
    let key = encode_pkey(&bytes_to_bigint_le(&encrypted[..KEY_BYTES]));

    debug_assert!(matches!(
        validation::validate_tskey_with(pid, &key, params, params.kind),
        Ok(true)
    ));
    Ok(key)
}
