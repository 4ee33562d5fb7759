//! CLI integration tests
//!
//! Tests the command-line interface end-to-end against the built binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Get path to the cryptext binary
fn cryptext_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps/
    path.push("cryptext");
    path
}

/// Run cryptext with the password passed as a flag
fn run_cryptext(args: &[&str], password: &str) -> Result<Output, std::io::Error> {
    Command::new(cryptext_bin())
        .arg("--password")
        .arg(password)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
}

/// Run cryptext with the password piped to stdin
fn run_cryptext_with_stdin_password(
    args: &[&str],
    password: &str,
) -> Result<Output, std::io::Error> {
    let mut child = Command::new(cryptext_bin())
        .arg("--password-stdin")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let stdin = child.stdin.as_mut().expect("failed to open stdin");
        // Ignore BrokenPipe errors - the command may exit before reading
        // stdin if it encounters an error (e.g., file not found)
        let _ = stdin.write_all(password.as_bytes());
    }

    child.wait_with_output()
}

/// Get path to testdata directory
fn testdata_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("testdata");
    path.push(filename);
    path
}

/// Decrypt a fixture produced by
/// `openssl enc -aes-256-cbc -pbkdf2 -iter 10000 -md sha256 -base64`.
#[test]
fn test_decrypt_openssl_ciphertext() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("hello-decrypted.txt");

    let result = run_cryptext(
        &[
            "decrypt",
            "-i",
            testdata_path("hello.txt.enc").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
        "test",
    )
    .unwrap();

    assert!(
        result.status.success(),
        "decrypt failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let decrypted = fs::read_to_string(&output).unwrap();
    let expected = fs::read_to_string(testdata_path("hello.txt")).unwrap();
    assert_eq!(decrypted, expected);
}

#[test]
fn test_encrypt_decrypt_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let plaintext_path = testdata_path("hello.txt");
    let encrypted_path = temp_dir.path().join("hello-encrypted.txt.enc");
    let decrypted_path = temp_dir.path().join("hello-decrypted.txt");

    let result = run_cryptext(
        &[
            "encrypt",
            "-i",
            plaintext_path.to_str().unwrap(),
            "-o",
            encrypted_path.to_str().unwrap(),
        ],
        "test",
    )
    .unwrap();
    assert!(
        result.status.success(),
        "encrypt failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let result = run_cryptext(
        &[
            "decrypt",
            "-i",
            encrypted_path.to_str().unwrap(),
            "-o",
            decrypted_path.to_str().unwrap(),
        ],
        "test",
    )
    .unwrap();
    assert!(
        result.status.success(),
        "decrypt failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let original = fs::read_to_string(&plaintext_path).unwrap();
    let decrypted = fs::read_to_string(&decrypted_path).unwrap();
    assert_eq!(original, decrypted);
}

#[test]
fn test_text_to_stdout_roundtrip() {
    let result = run_cryptext(&["encrypt", "--text", "over the wire"], "hunter2").unwrap();
    assert!(result.status.success());
    let encoded = String::from_utf8(result.stdout).unwrap();
    let encoded = encoded.trim();
    assert!(encoded.starts_with("U2FsdGVkX1")); // base64 of "Salted__"

    let result = run_cryptext(&["decrypt", "--text", encoded], "hunter2").unwrap();
    assert!(
        result.status.success(),
        "decrypt failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert_eq!(
        String::from_utf8(result.stdout).unwrap().trim_end(),
        "over the wire"
    );
}

#[test]
fn test_password_from_stdin() {
    let result =
        run_cryptext_with_stdin_password(&["encrypt", "--text", "stdin password"], "piped\n")
            .unwrap();
    assert!(
        result.status.success(),
        "encrypt failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let encoded = String::from_utf8(result.stdout).unwrap();

    // The trailing newline must not have become part of the password.
    let result = run_cryptext(&["decrypt", "--text", encoded.trim()], "piped").unwrap();
    assert!(result.status.success());
    assert_eq!(
        String::from_utf8(result.stdout).unwrap().trim_end(),
        "stdin password"
    );
}

#[test]
fn test_decrypt_wrong_password_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("out.txt");

    let result = run_cryptext(
        &[
            "decrypt",
            "-i",
            testdata_path("hello.txt.enc").to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
        "not-the-password",
    )
    .unwrap();

    assert!(!result.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("decrypt"),
        "Expected error message about decryption, got: {}",
        stderr
    );
}

#[test]
fn test_decrypt_malformed_input_fails() {
    let result = run_cryptext(&["decrypt", "--text", "not-valid-base64!!"], "test").unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.starts_with("Error:"), "got: {}", stderr);
}

#[test]
fn test_decrypt_nonexistent_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let nonexistent = temp_dir.path().join("nonexistent.enc");
    let output = temp_dir.path().join("output.txt");

    let result = run_cryptext(
        &[
            "decrypt",
            "-i",
            nonexistent.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
        "test",
    )
    .unwrap();

    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_empty_text_roundtrip() {
    let result = run_cryptext(&["encrypt", "--text", ""], "test").unwrap();
    assert!(result.status.success());
    let encoded = String::from_utf8(result.stdout).unwrap();

    let result = run_cryptext(&["decrypt", "--text", encoded.trim()], "test").unwrap();
    assert!(result.status.success());
    assert_eq!(String::from_utf8(result.stdout).unwrap(), "\n");
}
