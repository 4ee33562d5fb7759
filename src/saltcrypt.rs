//! Encryption/decryption using PBKDF2-HMAC-SHA256 + AES-256-CBC
//!
//! This module implements password-based encryption in the legacy
//! OpenSSL-style salted envelope. The binary frame is:
//! - marker: 8 bytes, the fixed ASCII constant "Salted__"
//! - salt: 8 bytes, random per encryption
//! - ciphertext: N*16 bytes of AES-256-CBC output over PKCS#7-padded
//!   plaintext (always at least one full block, even for empty input)
//!
//! The salt is embedded in the frame, so decryption needs only the
//! password. There is no authentication tag: the scheme is
//! confidentiality-only, and adding one would break byte compatibility
//! with the envelope this format mirrors.

use crate::armor;
use crate::error::{CryptextError, ErrorCategory, ErrorKind, Result};
use crate::kdf::{self, SALT_LEN};
use aes::Aes256;
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Fixed marker opening every frame. Not secret, and not an integrity
/// check of any kind.
pub const MARKER: &[u8; 8] = b"Salted__";

/// Cipher block size in bytes
pub const BLOCK_LEN: usize = 16;

/// Combined length of marker and salt
const HEADER_LEN: usize = MARKER.len() + SALT_LEN;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt text with a password, returning the base64 envelope.
///
/// A fresh random salt is drawn from the OS secure random source for
/// every call, so encrypting the same content twice produces different
/// output. The only failure mode is an unavailable random source,
/// which is fatal and never falls back to a weaker generator.
pub fn encrypt(content: &str, password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.try_fill_bytes(&mut salt).map_err(|e| {
        CryptextError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::RandomSource,
            "OS secure random source unavailable",
            e,
        )
    })?;

    Ok(encrypt_with_salt(content, password, &salt))
}

/// Encrypt text with a caller-provided salt.
///
/// This function is ONLY for testing against fixed vectors. NEVER use
/// this in production - always use `encrypt()`, which generates a
/// random salt per call.
pub fn encrypt_with_salt(content: &str, password: &str, salt: &[u8; SALT_LEN]) -> String {
    let frame = seal_frame(password.as_bytes(), content.as_bytes(), salt);
    armor::wrap(&frame)
}

/// Build the binary frame: marker, salt, and CBC ciphertext over the
/// PKCS#7-padded plaintext.
pub fn seal_frame(password: &[u8], plaintext: &[u8], salt: &[u8; SALT_LEN]) -> Vec<u8> {
    let (key, iv) = kdf::derive_key_iv(password, salt);

    // Pkcs7 appends 16 - (len % 16) bytes, each holding that count; a
    // full extra block when the length is already a block multiple.
    let ciphertext =
        Aes256CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut frame = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    frame.extend_from_slice(MARKER);
    frame.extend_from_slice(salt);
    frame.extend_from_slice(&ciphertext);
    frame
}

/// Decrypt a base64 envelope with a password, returning the original text.
///
/// Fails with a `Format` error when the input is not valid base64 or
/// the decoded frame is shorter than the 16-byte header, and with a
/// `Decryption` error for everything past that point (block
/// misalignment, invalid padding, non-UTF-8 output) - all of which are
/// most commonly symptoms of a wrong password.
pub fn decrypt(encoded: &str, password: &str) -> Result<String> {
    let frame = armor::unwrap(encoded)?;
    let plaintext = open_frame(password.as_bytes(), &frame)?;

    String::from_utf8(plaintext).map_err(|e| {
        CryptextError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Decryption,
            "decrypted data is not valid UTF-8; wrong password or corrupt input",
            e,
        )
    })
}

/// Decrypt a binary frame, returning the depadded plaintext bytes.
pub fn open_frame(password: &[u8], frame: &[u8]) -> Result<Vec<u8>> {
    if frame.len() < HEADER_LEN {
        return Err(CryptextError::with_kind(
            ErrorCategory::User,
            ErrorKind::Format,
            "input shorter than the marker and salt header; likely truncated",
        ));
    }

    // The marker bytes are deliberately not compared against MARKER.
    // The tooling this format mirrors slices the salt out by fixed
    // offset, and a matching marker would not authenticate anything
    // anyway. Pinned by marker_bytes_are_not_validated below.
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&frame[MARKER.len()..HEADER_LEN]);
    let ciphertext = &frame[HEADER_LEN..];

    let (key, iv) = kdf::derive_key_iv(password, &salt);
    let padded = Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| {
            CryptextError::with_kind(
                ErrorCategory::User,
                ErrorKind::Decryption,
                "ciphertext length is not a multiple of the cipher block size",
            )
        })?;

    strip_padding(padded)
}

/// Remove PKCS#7-style padding by trusting the final byte.
///
/// Only the count is validated (non-zero and within the payload); the
/// pad bytes' contents are not inspected, so envelopes written by
/// equally permissive tools keep decrypting.
fn strip_padding(mut padded: Vec<u8>) -> Result<Vec<u8>> {
    let pad = match padded.last() {
        Some(&b) => b as usize,
        None => {
            return Err(CryptextError::with_kind(
                ErrorCategory::User,
                ErrorKind::Decryption,
                "decrypted payload is empty; nothing to unpad",
            ));
        }
    };

    if pad == 0 || pad > padded.len() {
        return Err(CryptextError::with_kind(
            ErrorCategory::User,
            ErrorKind::Decryption,
            "invalid padding; wrong password or corrupt input",
        ));
    }

    padded.truncate(padded.len() - pad);
    Ok(padded)
}
