//! SPK (License Server ID) generation

use num_bigint::BigUint;

use super::{generate_tskey, get_spkid, DEFAULT_MAX_ATTEMPTS, PAYLOAD_BYTES};
use crate::crypto::bigint_to_bytes_le;
use crate::error::KeygenError;
use crate::types::{CurveParameters, KeyKind};

/// Generate a License Server ID for a product identifier.
pub fn generate_spk(pid: &str) -> Result<String, KeygenError> {
    generate_spk_with(pid, &CurveParameters::server(), DEFAULT_MAX_ATTEMPTS)
}

/// As [`generate_spk`], with explicit parameters and retry budget. The
/// parameters must be a server instance.
pub fn generate_spk_with(
    pid: &str,
    params: &CurveParameters,
    max_attempts: usize,
) -> Result<String, KeygenError> {
    if params.kind != KeyKind::Server {
        return Err(KeygenError::CurveParameterMismatch);
    }

    let spkid = get_spkid(pid)?;
    let payload = bigint_to_bytes_le(&BigUint::from(spkid), PAYLOAD_BYTES);

    generate_tskey(pid, &payload, params, max_attempts)
}
