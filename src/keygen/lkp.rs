//! LKP (License Key Pack) generation
//!
//! The key-pack payload is a bit-packed 56-bit record:
//!
//! ```text
//! bits 46..56  channel id        (10 bits)
//! bits 32..46  license count     (14 bits)
//! bits 18..32  fixed constant 2
//! bits 10..18  fixed constant 144
//! bits  3..10  version code       (7 bits)
//! bits  0..3   zero
//! ```

use num_bigint::BigUint;

use super::{generate_tskey, DEFAULT_MAX_ATTEMPTS, PAYLOAD_BYTES};
use crate::crypto::bigint_to_bytes_le;
use crate::error::KeygenError;
use crate::types::{CurveParameters, KeyKind};

const CHANNEL_SHIFT: u32 = 46;
const CHANNEL_BITS: u32 = 10;
const COUNT_SHIFT: u32 = 32;
const COUNT_BITS: u32 = 14;
const TAG_SHIFT: u32 = 18;
const MARKER_SHIFT: u32 = 10;
const VERSION_SHIFT: u32 = 3;
const VERSION_BITS: u32 = 7;

/// Fixed protocol constants present in every key-pack record.
const FIXED_TAG: u64 = 2;
const FIXED_MARKER: u64 = 144;

/// Generate a License Key Pack.
pub fn generate_lkp(
    pid: &str,
    count: u32,
    major_ver: u32,
    minor_ver: u32,
    chid: u32,
) -> Result<String, KeygenError> {
    generate_lkp_with(
        pid,
        count,
        major_ver,
        minor_ver,
        chid,
        &CurveParameters::key_pack(),
        DEFAULT_MAX_ATTEMPTS,
    )
}

/// As [`generate_lkp`], with explicit parameters and retry budget. The
/// parameters must be a key-pack instance.
#[allow(clippy::too_many_arguments)]
pub fn generate_lkp_with(
    pid: &str,
    count: u32,
    major_ver: u32,
    minor_ver: u32,
    chid: u32,
    params: &CurveParameters,
    max_attempts: usize,
) -> Result<String, KeygenError> {
    if params.kind != KeyKind::KeyPack {
        return Err(KeygenError::CurveParameterMismatch);
    }

    let version = version_code(major_ver, minor_ver);
    let payload = pack_lkp_info(chid, count, version)?;

    generate_tskey(pid, &payload, params, max_attempts)
}

/// Version code carried in the payload: (major << 3) | minor for 5.1 and
/// later, the legacy value 1 for everything older.
fn version_code(major_ver: u32, minor_ver: u32) -> u32 {
    if major_ver > 5 || (major_ver == 5 && minor_ver > 0) {
        (major_ver << 3) | minor_ver
    } else {
        1
    }
}

/// Pack the key-pack record, rejecting fields that overflow their widths.
fn pack_lkp_info(chid: u32, count: u32, version: u32) -> Result<Vec<u8>, KeygenError> {
    if chid >= 1 << CHANNEL_BITS {
        return Err(KeygenError::FieldOverflow("channel id"));
    }
    if count >= 1 << COUNT_BITS {
        return Err(KeygenError::FieldOverflow("license count"));
    }
    if version >= 1 << VERSION_BITS {
        return Err(KeygenError::FieldOverflow("version code"));
    }

    let info = ((chid as u64) << CHANNEL_SHIFT)
        | ((count as u64) << COUNT_SHIFT)
        | (FIXED_TAG << TAG_SHIFT)
        | (FIXED_MARKER << MARKER_SHIFT)
        | ((version as u64) << VERSION_SHIFT);

    Ok(bigint_to_bytes_le(&BigUint::from(info), PAYLOAD_BYTES))
}
