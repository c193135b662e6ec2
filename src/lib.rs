use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub mod analysis;
pub mod charset;
pub mod input;
pub mod password_generation;
pub mod report;
pub mod version;

pub use analysis::{analyze, analyze_batch, AnalysisCriteria, AnalysisResult, BatchReport, Tier};
pub use charset::{Charset, CharsetOptions};
pub use password_generation::{generate, generate_random_password, MAX_LENGTH};

/// The broad category of an [`Error`], for callers that need to branch on it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidLength,
    EmptyCharset,
    RandomSource,
    InputUnavailable,
    Io,
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorRepr);

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match &self.0 {
            ErrorRepr::InvalidLength { .. } => ErrorKind::InvalidLength,
            ErrorRepr::EmptyCharset => ErrorKind::EmptyCharset,
            ErrorRepr::RandomSource(_) => ErrorKind::RandomSource,
            ErrorRepr::NoInput | ErrorRepr::InputUnavailable { .. } => ErrorKind::InputUnavailable,
            ErrorRepr::Io { .. } => ErrorKind::Io,
        }
    }

    /// Neither a password nor a file of passwords was supplied.
    pub fn no_input() -> Error {
        ErrorRepr::NoInput.into()
    }

    pub(crate) fn input_unavailable(path: &Path, reason: impl Into<String>) -> Error {
        ErrorRepr::InputUnavailable {
            path: path.to_owned(),
            reason: reason.into(),
        }
        .into()
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Error {
        ErrorRepr::Io {
            path: path.to_owned(),
            source,
        }
        .into()
    }
}

impl From<ErrorRepr> for Error {
    fn from(err: ErrorRepr) -> Error {
        Error(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorRepr {
    #[error("password length must be between 1 and {max} characters, got {length}")]
    InvalidLength { length: usize, max: usize },
    #[error("no valid characters available for password generation")]
    EmptyCharset,
    #[error("the secure random source failed to supply entropy: {0}")]
    RandomSource(#[source] rand::Error),
    #[error("no password provided for analysis; use --password or --file")]
    NoInput,
    #[error("cannot read passwords from {}: {reason}", path.display())]
    InputUnavailable { path: PathBuf, reason: String },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A generated password.
///
/// `Debug` is opaque so that secrets don't end up in logs by accident.
#[derive(Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes) in the secret.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
