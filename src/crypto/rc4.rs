//! RC4 stream cipher and the product-identifier key derivation
//!
//! The cipher only obfuscates: its key is derivable from the product
//! identifier alone. It exists to bind an encoded key to one identifier, not
//! to provide confidentiality.

/// Derive the 16-byte RC4 key for a product identifier: the first 5 bytes of
/// MD5 over the identifier encoded as UTF-16 LE, padded with 11 zero bytes.
pub fn pid_cipher_key(pid: &str) -> [u8; 16] {
    let mut encoded = Vec::with_capacity(pid.len() * 2);
    for unit in pid.encode_utf16() {
        encoded.extend_from_slice(&unit.to_le_bytes());
    }

    let digest = md5::compute(&encoded);
    let mut key = [0u8; 16];
    key[..5].copy_from_slice(&digest[..5]);
    key
}

/// RC4 encryption/decryption (symmetric). A fresh keystream is set up on
/// every call; state is never carried across calls.
pub fn rc4_crypt(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut j: usize = 0;

    // Key scheduling algorithm (KSA)
    for i in 0..256 {
        j = (j + s[i] as usize + key[i % key.len()] as usize) % 256;
        s.swap(i, j);
    }

    // Pseudo-random generation algorithm (PRGA)
    let mut i: usize = 0;
    j = 0;
    let mut result = Vec::with_capacity(data.len());

    for &byte in data {
        i = (i + 1) % 256;
        j = (j + s[i] as usize) % 256;
        s.swap(i, j);
        let k = s[(s[i] as usize + s[j] as usize) % 256];
        result.push(byte ^ k);
    }

    result
}
