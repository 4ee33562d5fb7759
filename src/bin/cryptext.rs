//! Cryptext CLI - password-based text encryption
//!
//! Command-line interface for encrypting and decrypting text in the
//! OpenSSL salted AES-256-CBC envelope format, with the key derived
//! from a password via PBKDF2-HMAC-SHA256.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use cryptext::ops::{self, ContentSource};
use cryptext::password::{
    ConstantPasswordReader, PasswordReader, ReaderPasswordReader, TerminalPasswordReader,
};

#[derive(Parser)]
#[command(name = "cryptext")]
#[command(version)]
#[command(about = "Password-based text encryption.", long_about = None)]
struct Cli {
    /// Password to use (prompted for when absent)
    #[arg(long, global = true, value_name = "PASSWORD")]
    password: Option<String>,

    /// Read password from stdin instead of from terminal
    #[arg(long, global = true, conflicts_with = "password")]
    password_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt text or file content
    #[command(alias = "e")]
    Encrypt {
        /// Literal text to encrypt
        #[arg(long, value_name = "TEXT", conflicts_with = "input")]
        text: Option<String>,

        /// Path to the file whose contents is to be encrypted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Path to write the encrypted text to (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decrypt text or file content
    #[command(alias = "d")]
    Decrypt {
        /// Literal encrypted text to decrypt
        #[arg(long, value_name = "TEXT", conflicts_with = "input")]
        text: Option<String>,

        /// Path to the file whose contents is to be decrypted
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Path to write the decrypted text to (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut reader = get_password_reader(cli.password, cli.password_stdin);
    let result = match cli.command {
        Commands::Encrypt {
            text,
            input,
            output,
        } => {
            let source = content_source(text, input);
            ops::encrypt_op(&source, output.as_deref(), &mut *reader)
        }
        Commands::Decrypt {
            text,
            input,
            output,
        } => {
            let source = content_source(text, input);
            ops::decrypt_op(&source, output.as_deref(), &mut *reader)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn content_source(text: Option<String>, input: Option<PathBuf>) -> ContentSource {
    match (text, input) {
        (Some(text), _) => ContentSource::Literal(text),
        (None, Some(path)) => ContentSource::File(path),
        (None, None) => ContentSource::Prompt,
    }
}

fn get_password_reader(password: Option<String>, use_stdin: bool) -> Box<dyn PasswordReader> {
    match password {
        Some(p) => Box::new(ConstantPasswordReader::new(p)),
        None if use_stdin => Box::new(ReaderPasswordReader::new(Box::new(std::io::stdin()))),
        None => Box::new(TerminalPasswordReader),
    }
}
