//! Schnorr-style signing over the key payload
//!
//! A signature binds a 7-byte payload to a curve instance: a random nonce c
//! gives R = c·G, the challenge h is folded out of
//! SHA-1(payload ‖ le48(R.x) ‖ le48(R.y)), and the response is
//! s = (c − priv·h) mod n. Verification recomputes R from public data as
//! h·K + s·G and checks that the challenge comes out the same.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use sha1::{Digest, Sha1};

use super::{COORDINATE_BYTES, SIGNATURE_BOUND_BITS, SIGNATURE_FIELD_BITS};
use crate::crypto::bigint_to_bytes_le;
use crate::crypto::curve::Point;
use crate::error::KeygenError;
use crate::types::CurveParameters;

/// A challenge/response pair. `h` is 35 bits; `s` lives in a 69-bit container
/// field but generation only accepts values below 2^61 − 1 so the packed key
/// stays within its 20-byte budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub h: BigUint,
    pub s: BigUint,
}

/// Fold a SHA-1 digest of the payload and a point's coordinates into the
/// 35-bit challenge: h = ((w1 >> 29) << 32) | w0, where w0 and w1 are the
/// digest's first two little-endian 32-bit words. Coordinates are serialized
/// to fixed 48-byte little-endian fields regardless of their bit length.
/// Returns `None` for the identity, which has no coordinates to hash.
pub(super) fn derive_challenge(payload: &[u8], point: &Point) -> Option<BigUint> {
    let (x, y) = point.coordinates()?;

    let mut hasher = Sha1::new();
    hasher.update(payload);
    hasher.update(bigint_to_bytes_le(x, COORDINATE_BYTES));
    hasher.update(bigint_to_bytes_le(y, COORDINATE_BYTES));
    let md = hasher.finalize();

    let mut w0 = [0u8; 4];
    let mut w1 = [0u8; 4];
    w0.copy_from_slice(&md[0..4]);
    w1.copy_from_slice(&md[4..8]);

    let w0 = u32::from_le_bytes(w0) as u64;
    let w1 = u32::from_le_bytes(w1) as u64;
    Some(BigUint::from(((w1 >> 29) << 32) | w0))
}

/// Produce a signature over `payload`, retrying with fresh nonces until the
/// response fits its bound or the attempt limit is reached.
///
/// Each attempt samples a nonce uniformly from [1, n − 1], derives the
/// challenge and response, masks the response to the container field, and
/// rejects it unless s < 2^61 − 1. Accepted candidates are re-verified before
/// being returned.
pub fn generate_signature(
    payload: &[u8],
    params: &CurveParameters,
    max_attempts: usize,
) -> Result<Signature, KeygenError> {
    let mut rng = rand::thread_rng();
    let field_mask = (BigUint::one() << SIGNATURE_FIELD_BITS) - 1u32;
    let bound = (BigUint::one() << SIGNATURE_BOUND_BITS) - 1u32;

    for _ in 0..max_attempts {
        let c = rng.gen_biguint_range(&BigUint::one(), &params.n);
        let r = params.curve.multiply_point(&c, &params.g);

        let h = match derive_challenge(payload, &r) {
            Some(h) => h,
            None => continue,
        };

        // s = (c - priv * h) mod n, kept within the container field.
        let s = (&c + &params.n - (&params.private_key * &h) % &params.n) % &params.n;
        let s = s & &field_mask;

        if s >= bound {
            continue;
        }

        let signature = Signature { h, s };
        if validate_signature(payload, &signature, params) {
            return Ok(signature);
        }
    }

    Err(KeygenError::RetryExhausted(max_attempts))
}

/// Verify a signature against the public point: recompute R' = h·K + s·G and
/// check that the derived challenge matches h. Mismatches are a `false`
/// result, never an error.
pub fn validate_signature(payload: &[u8], signature: &Signature, params: &CurveParameters) -> bool {
    let hk = params.curve.multiply_point(&signature.h, &params.k);
    let sg = params.curve.multiply_point(&signature.s, &params.g);
    let r = params.curve.add(&hk, &sg);

    match derive_challenge(payload, &r) {
        Some(expected) => expected == signature.h,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    const MAX_ATTEMPTS: usize = 1000;

    #[test]
    fn signatures_verify_under_both_parameter_sets() {
        let payload = [0x15, 0xCD, 0x5B, 0x07, 0, 0, 0];
        for params in [CurveParameters::server(), CurveParameters::key_pack()] {
            let sig = generate_signature(&payload, &params, MAX_ATTEMPTS).unwrap();
            assert!(validate_signature(&payload, &sig, &params));
        }
    }

    #[test]
    fn signature_fields_respect_their_bounds() {
        let payload = [0u8, 1, 2, 3, 4, 5, 6];
        let params = CurveParameters::server();
        let sig = generate_signature(&payload, &params, MAX_ATTEMPTS).unwrap();

        assert!(sig.h.bits() <= 35);
        assert!(sig.s < (BigUint::one() << 61u32) - 1u32);
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let payload = [9u8, 8, 7, 6, 5, 4, 3];
        let params = CurveParameters::key_pack();
        let sig = generate_signature(&payload, &params, MAX_ATTEMPTS).unwrap();

        let mut tampered = payload;
        tampered[0] ^= 1;
        assert!(!validate_signature(&tampered, &sig, &params));
    }

    #[test]
    fn signature_does_not_verify_under_other_curve() {
        let payload = [1u8, 0, 0, 0, 0, 0, 0];
        let server = CurveParameters::server();
        let key_pack = CurveParameters::key_pack();

        let sig = generate_signature(&payload, &server, MAX_ATTEMPTS).unwrap();
        assert!(!validate_signature(&payload, &sig, &key_pack));
    }

    #[test]
    fn zero_signature_is_rejected() {
        let payload = [0u8; 7];
        let params = CurveParameters::server();
        let sig = Signature {
            h: BigUint::zero(),
            s: BigUint::zero(),
        };
        // h·K + s·G is the identity, which cannot be hashed.
        assert!(!validate_signature(&payload, &sig, &params));
    }
}
