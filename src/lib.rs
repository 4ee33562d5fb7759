//! Cryptext - password-based text encryption in the OpenSSL salted envelope format
//!
//! Output is interoperable with `openssl enc -aes-256-cbc -pbkdf2
//! -iter 10000 -md sha256 -base64`: a base64-encoded frame of
//! `"Salted__" || salt(8) || AES-256-CBC ciphertext`, with the key and
//! IV derived from the password and salt via PBKDF2-HMAC-SHA256.

#![forbid(unsafe_code)]

pub mod armor;
pub mod error;
pub mod kdf;
pub mod ops;
pub mod password;
pub mod saltcrypt;
