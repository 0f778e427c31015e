//! Base-24 key encoding and decoding

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::KeygenError;
use crate::types::KCHARS;

/// Encode an integer as a dash-grouped base-24 key string.
///
/// The output has the minimal number of base-24 digits for the value; no
/// leading-zero padding is applied, matching the original key format. Digits
/// are grouped in fives from the left.
pub fn encode_pkey(n: &BigUint) -> String {
    let alphabet: Vec<char> = KCHARS.chars().collect();
    let base = BigUint::from(24u32);

    let mut digits = Vec::new();
    let mut num = n.clone();
    while !num.is_zero() {
        let rem = (&num % &base).to_u32_digits();
        digits.push(alphabet[rem.first().copied().unwrap_or(0) as usize]);
        num /= &base;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 5);
    for (i, ch) in digits.iter().rev().enumerate() {
        if i > 0 && i % 5 == 0 {
            out.push('-');
        }
        out.push(*ch);
    }
    out
}

/// Decode a dash-grouped base-24 key string back to an integer.
pub fn decode_pkey(key: &str) -> Result<BigUint, KeygenError> {
    let base = BigUint::from(24u32);
    let mut out = BigUint::zero();

    for ch in key.chars() {
        if ch == '-' {
            continue;
        }
        let value = KCHARS
            .find(ch)
            .ok_or_else(|| KeygenError::InvalidEncodedKey(format!("unexpected character '{ch}'")))?;
        out = out * &base + BigUint::from(value);
    }

    Ok(out)
}
