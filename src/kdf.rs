//! Key and IV derivation from a password and salt
//!
//! A single run of PBKDF2-HMAC-SHA256 produces 48 bytes: the first 32
//! become the AES-256 key and the remaining 16 the CBC initialization
//! vector. The parameters below are fixed by the envelope format and
//! must not change, or existing ciphertexts become undecryptable.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Length of salt in bytes
pub const SALT_LEN: usize = 8;

/// Length of the derived AES-256 key in bytes
pub const KEY_LEN: usize = 32;

/// Length of the derived CBC initialization vector in bytes
pub const IV_LEN: usize = 16;

/// PBKDF2 iteration count
pub const PBKDF2_ROUNDS: u32 = 10_000;

/// Derive an AES-256 key and CBC IV from a password and salt.
///
/// Pure and deterministic: identical inputs always yield identical
/// output, which is what allows decryption to re-derive the key from
/// the password and the salt embedded in the ciphertext. An empty
/// password is weak but accepted, matching the legacy tooling.
pub fn derive_key_iv(password: &[u8], salt: &[u8; SALT_LEN]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut buf = [0u8; KEY_LEN + IV_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, PBKDF2_ROUNDS, &mut buf);

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&buf[..KEY_LEN]);
    iv.copy_from_slice(&buf[KEY_LEN..]);
    (key, iv)
}
