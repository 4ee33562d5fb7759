//! High-level encrypt/decrypt operations
//!
//! Glues the cipher core to the CLI: resolves the content to operate
//! on, obtains the password, and emits the result to stdout or a file.

use crate::error::{CryptextError, ErrorCategory, ErrorKind, Result};
use crate::password::PasswordReader;
use crate::saltcrypt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Where the content being encrypted or decrypted comes from.
pub enum ContentSource {
    /// Literal text passed on the command line
    Literal(String),
    /// A UTF-8 text file
    File(PathBuf),
    /// Interactive prompt reading one line from stdin
    Prompt,
}

/// Encrypt content and emit the base64 envelope.
///
/// With an output path the envelope is written with mode 0o600 on Unix
/// systems; otherwise it is printed to stdout.
pub fn encrypt_op(
    source: &ContentSource,
    output: Option<&Path>,
    password_reader: &mut dyn PasswordReader,
) -> Result<()> {
    let content = read_content(source)?;
    let password = password_reader.read_password()?;
    let encoded = saltcrypt::encrypt(&content, &password)
        .map_err(|e| e.with_context("encryption failed"))?;
    emit(output, &encoded)
}

/// Decrypt a base64 envelope and emit the recovered text.
pub fn decrypt_op(
    source: &ContentSource,
    output: Option<&Path>,
    password_reader: &mut dyn PasswordReader,
) -> Result<()> {
    let content = read_content(source)?;
    let password = password_reader.read_password()?;

    // Emitters like `openssl enc -base64` append a newline; strip
    // surrounding whitespace here so such files are accepted while the
    // core decoder stays strict.
    let plaintext = saltcrypt::decrypt(content.trim(), &password)
        .map_err(|e| e.with_context("decryption failed"))?;
    emit(output, &plaintext)
}

fn read_content(source: &ContentSource) -> Result<String> {
    match source {
        ContentSource::Literal(text) => Ok(text.clone()),
        ContentSource::File(path) => fs::read_to_string(path).map_err(|e| read_error(path, e)),
        ContentSource::Prompt => {
            io::stderr().write_all(b"Enter content: ").map_err(|e| {
                CryptextError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    format!("failed to write prompt: {}", e),
                    e,
                )
            })?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map_err(|e| {
                CryptextError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    format!("error reading content: {}", e),
                    e,
                )
            })?;
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Ok(line)
        }
    }
}

fn emit(output: Option<&Path>, result: &str) -> Result<()> {
    match output {
        Some(path) => write_file_secure(path, result.as_bytes())
            .map_err(|e| e.with_context(format!("failed to write to {}", path.display()))),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", result).map_err(|e| {
                CryptextError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    format!("failed to write to stdout: {}", e),
                    e,
                )
            })
        }
    }
}

/// Write file with restrictive permissions (0o600 on Unix)
fn write_file_secure(path: &Path, contents: &[u8]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                CryptextError::with_kind_and_source(
                    ErrorCategory::User,
                    ErrorKind::Io,
                    format!("failed to open {}", path.display()),
                    e,
                )
            })?;

        file.write_all(contents).map_err(|e| {
            CryptextError::with_kind_and_source(
                ErrorCategory::Internal,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents).map_err(|e| {
            CryptextError::with_kind_and_source(
                ErrorCategory::User,
                ErrorKind::Io,
                format!("failed to write {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }
}

fn read_error(path: &Path, err: io::Error) -> CryptextError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    CryptextError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
