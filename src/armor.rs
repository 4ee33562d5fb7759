//! Base64 armoring of the binary envelope
//!
//! The envelope is exchanged as base64 text so it can travel through
//! shells, config files, and copy-paste without mangling. The standard
//! alphabet with padding is used because that is what the legacy
//! OpenSSL-style tooling emits; the encoding never alters the
//! underlying frame bytes.

use crate::error::{CryptextError, ErrorCategory, ErrorKind, Result};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Encode frame bytes as base64 text.
pub fn wrap(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Decode base64 text back into frame bytes.
pub fn unwrap(armored: &str) -> Result<Vec<u8>> {
    STANDARD.decode(armored).map_err(|e| {
        CryptextError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Format,
            format!("base64 decoding failed: {}", e),
            e,
        )
    })
}
