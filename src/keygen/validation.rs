//! Key validation

use num_bigint::BigUint;
use num_traits::One;

use super::{get_spkid, sign, unpack_key, PACKED_BYTES, SPKID_BITS};
use crate::crypto::{bigint_to_bytes_le, bytes_to_bigint_le, decode_pkey, pid_cipher_key, rc4_crypt};
use crate::error::KeygenError;
use crate::types::{CurveParameters, KeyKind};

/// Check a key against a product identifier.
///
/// Returns `Ok(false)` for signature or key-id mismatches; errors are
/// reserved for keys that cannot be decoded at all.
pub fn validate_tskey(pid: &str, tskey: &str, kind: KeyKind) -> Result<bool, KeygenError> {
    validate_tskey_with(pid, tskey, &CurveParameters::for_kind(kind), kind)
}

/// As [`validate_tskey`], with explicit curve parameters. The parameters must
/// belong to the requested key kind.
pub fn validate_tskey_with(
    pid: &str,
    tskey: &str,
    params: &CurveParameters,
    kind: KeyKind,
) -> Result<bool, KeygenError> {
    if params.kind != kind {
        return Err(KeygenError::CurveParameterMismatch);
    }

    let decoded = decode_pkey(tskey)?;
    if decoded.bits() > 8 * PACKED_BYTES as u64 {
        return Err(KeygenError::InvalidEncodedKey(
            "key does not fit the container".into(),
        ));
    }

    // Rebuild the 21-byte block; the byte dropped after encryption comes back
    // as zero. Only the low 20 bytes carried information, so the signature
    // field mask absorbs whatever the decrypt makes of the 21st.
    let block = bigint_to_bytes_le(&decoded, PACKED_BYTES);
    let clear = rc4_crypt(&pid_cipher_key(pid), &block);
    let unpacked = unpack_key(&clear);

    if !sign::validate_signature(&unpacked.payload, &unpacked.signature, params) {
        return Ok(false);
    }

    if params.kind == KeyKind::Server {
        let embedded = bytes_to_bigint_le(&unpacked.payload) & ((BigUint::one() << SPKID_BITS) - 1u32);
        let expected = BigUint::from(get_spkid(pid)?);
        return Ok(embedded == expected);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::{generate_lkp, generate_spk, KEY_BYTES};
    use crate::types::KCHARS;

    const PID: &str = "00490-92005-99454-AT527";

    #[test]
    fn generated_server_key_validates() {
        let spk = generate_spk(PID).unwrap();
        assert!(validate_tskey(PID, &spk, KeyKind::Server).unwrap());
    }

    #[test]
    fn generated_key_pack_validates() {
        let lkp = generate_lkp(PID, 1234, 10, 3, 32).unwrap();
        assert!(validate_tskey(PID, &lkp, KeyKind::KeyPack).unwrap());
    }

    #[test]
    fn key_pack_count_and_version_extremes_validate() {
        for (count, major, minor) in [(0, 1, 0), (9999, 5, 1), (5000, 10, 3)] {
            let lkp = generate_lkp(PID, count, major, minor, 32).unwrap();
            assert!(
                validate_tskey(PID, &lkp, KeyKind::KeyPack).unwrap(),
                "count={count} version={major}.{minor}"
            );
        }
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let spk = generate_spk(PID).unwrap();
        let lkp = generate_lkp(PID, 100, 10, 3, 32).unwrap();

        assert!(!validate_tskey(PID, &spk, KeyKind::KeyPack).unwrap());
        assert!(!validate_tskey(PID, &lkp, KeyKind::Server).unwrap());
    }

    #[test]
    fn key_is_bound_to_its_product_identifier() {
        let spk = generate_spk(PID).unwrap();
        assert!(!validate_tskey("00491-92005-99454-AT527", &spk, KeyKind::Server).unwrap());
    }

    #[test]
    fn flipping_any_sampled_character_invalidates_the_key() {
        let spk = generate_spk(PID).unwrap();

        for position in (0..spk.len()).step_by(3) {
            let original = spk.as_bytes()[position] as char;
            if original == '-' {
                continue;
            }
            let replacement = KCHARS
                .chars()
                .find(|c| *c != original)
                .unwrap();

            let mut flipped: Vec<char> = spk.chars().collect();
            flipped[position] = replacement;
            let flipped: String = flipped.into_iter().collect();

            assert!(
                !validate_tskey(PID, &flipped, KeyKind::Server).unwrap(),
                "flip at {position} still validated"
            );
        }
    }

    #[test]
    fn mismatched_parameters_are_an_error() {
        let spk = generate_spk(PID).unwrap();
        let result = validate_tskey_with(PID, &spk, &CurveParameters::key_pack(), KeyKind::Server);
        assert!(matches!(result, Err(KeygenError::CurveParameterMismatch)));
    }

    #[test]
    fn undecodable_key_is_an_error() {
        assert!(matches!(
            validate_tskey(PID, "BBBBB-ABBBB", KeyKind::Server),
            Err(KeygenError::InvalidEncodedKey(_))
        ));
    }

    #[test]
    fn oversized_key_is_an_error() {
        // 37 digits of the top symbol exceed the 21-byte container.
        let oversized = "9".repeat(37);
        assert!(matches!(
            validate_tskey(PID, &oversized, KeyKind::Server),
            Err(KeygenError::InvalidEncodedKey(_))
        ));
    }

    #[test]
    fn encoded_key_stays_within_twenty_bytes() {
        let spk = generate_spk(PID).unwrap();
        let decoded = decode_pkey(&spk).unwrap();
        assert!(decoded.bits() <= 8 * KEY_BYTES as u64);
    }
}
