//! Error types for the enry binding
//!
//! Null or empty native results are never errors; they surface as empty
//! strings, empty lists or unconfident guesses. Everything here is either a
//! load-time failure or an argument the ABI cannot represent.

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::symbols::EntryPoint;

/// Main error type for enry binding operations
#[derive(Error, Debug)]
pub enum Error {
    /// The shared library could not be located, opened, or is missing symbols
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A name or path argument contains a NUL byte and cannot become a C string
    #[error("{argument} contains an interior NUL byte at position {position}")]
    InteriorNul {
        argument: &'static str,
        position: usize,
    },

    /// A candidate language contains a NUL byte
    #[error("candidate #{index} ({name:?}) contains an interior NUL byte")]
    InvalidCandidate { index: usize, name: String },

    /// Content is longer than the native `int` length parameter allows
    #[error("content of {len} bytes exceeds the native length limit of {} bytes", i32::MAX)]
    ContentTooLarge { len: usize },

    /// The native library returned text that is not UTF-8
    #[error("{entry_point} returned invalid UTF-8")]
    InvalidUtf8 {
        entry_point: EntryPoint,
        #[source]
        source: FromUtf8Error,
    },

    /// A loader configuration file could not be parsed
    #[error("invalid loader configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A loader configuration file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to open the native library.
///
/// Cached by the process-wide handle, so it is cheap to clone and carries
/// no live OS error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "could not load the enry shared library on {os}-{arch} (tried: {}): {reason}",
    join_paths(.attempted)
)]
pub struct LoadError {
    /// Every path handed to the loader, in search order
    pub attempted: Vec<PathBuf>,
    /// Message from the last failed attempt
    pub reason: String,
    /// `std::env::consts::OS` at load time
    pub os: &'static str,
    /// `std::env::consts::ARCH` at load time
    pub arch: &'static str,
}

impl LoadError {
    pub(crate) fn new(attempted: Vec<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            attempted,
            reason: reason.into(),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_lists_attempted_paths() {
        let err = LoadError::new(
            vec![PathBuf::from("/opt/enry/libenry.so"), PathBuf::from("libenry.so")],
            "file not found",
        );
        let msg = err.to_string();
        assert!(msg.contains("/opt/enry/libenry.so, libenry.so"));
        assert!(msg.contains("file not found"));
        assert!(msg.contains(std::env::consts::OS));
    }

    #[test]
    fn test_load_error_converts_transparently() {
        let err: Error = LoadError::new(Vec::new(), "boom").into();
        assert!(matches!(err, Error::Load(_)));
        assert!(err.to_string().contains("tried: nothing"));
    }

    #[test]
    fn test_candidate_error_message() {
        let err = Error::InvalidCandidate {
            index: 2,
            name: "Go\0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "candidate #2 (\"Go\\0\") contains an interior NUL byte"
        );
    }
}
