//! Loader configuration
//!
//! Configuration comes from, in increasing precedence:
//! - Default values
//! - A TOML file
//! - Environment variables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming the exact library file to open
pub const LIBRARY_PATH_ENV: &str = "ENRY_LIBRARY_PATH";

/// Environment variable naming an extra directory to search first
pub const LIBRARY_DIR_ENV: &str = "ENRY_LIBRARY_DIR";

/// Where and how to look for the native library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Exact library file; skips the directory search when it exists
    pub library_path: Option<PathBuf>,

    /// Directories searched in order for the platform library file
    pub search_dirs: Vec<PathBuf>,

    /// Base name of the library, without prefix or extension
    pub library_name: String,

    /// Also search `.shared/<os>-<arch>/` under the working directory
    pub development_layout: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            search_dirs: Vec::new(),
            library_name: "enry".to_string(),
            development_layout: true,
        }
    }
}

impl LoaderConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.merge_with_env();
        config
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply `ENRY_LIBRARY_PATH` and `ENRY_LIBRARY_DIR`
    pub fn merge_with_env(&mut self) {
        if let Some(path) = std::env::var_os(LIBRARY_PATH_ENV).filter(|v| !v.is_empty()) {
            self.library_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = std::env::var_os(LIBRARY_DIR_ENV).filter(|v| !v.is_empty()) {
            self.search_dirs.insert(0, PathBuf::from(dir));
        }
    }
}
