//! Native library loading and symbol resolution.

use libloading::Library;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::symbols::{Deallocators, Symbols};

/// An opened enry library with every entry point resolved.
///
/// Immutable once built, and therefore safe to share between threads.
#[derive(Debug)]
pub struct NativeLibrary {
    symbols: Symbols,
    path: Option<PathBuf>,
    // Keeps the code behind `symbols` mapped; `None` for in-process tables.
    _library: Option<Library>,
}

impl NativeLibrary {
    /// Open the library at `path` and resolve the full ABI
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        // SAFETY: loading runs the library's initializers; the caller chose
        // to trust this file by pointing the loader at it.
        let library = unsafe { Library::new(path) }
            .map_err(|e| LoadError::new(vec![path.to_path_buf()], e.to_string()))?;

        // SAFETY: the symbol table is stored next to the library that
        // backs it and never outlives it.
        let symbols = unsafe { Symbols::resolve(&library, path) }?;

        info!(path = %path.display(), "loaded enry native library");

        Ok(Self {
            symbols,
            path: Some(path.to_path_buf()),
            _library: Some(library),
        })
    }

    /// Search the configured locations and open the first library that loads
    pub fn locate(config: &LoaderConfig) -> Result<Self, LoadError> {
        let mut attempted = Vec::new();
        let mut last_reason = String::from("no candidate library file exists");

        for candidate in candidate_paths(config) {
            // bare names go to the system loader search path
            let bare = candidate.parent().map_or(true, |p| p.as_os_str().is_empty());
            if !bare && !candidate.exists() {
                debug!(path = %candidate.display(), "library candidate does not exist");
                attempted.push(candidate);
                continue;
            }

            debug!(path = %candidate.display(), "trying library candidate");
            match Self::open(&candidate) {
                Ok(library) => return Ok(library),
                Err(err) => {
                    debug!(path = %candidate.display(), reason = %err.reason, "library candidate failed");
                    last_reason = err.reason;
                    attempted.push(candidate);
                }
            }
        }

        let err = LoadError::new(attempted, last_reason);
        warn!(error = %err, "could not load enry native library");
        Err(err)
    }

    /// Wrap a symbol table that is already part of this process, such as a
    /// statically linked library or a test double
    pub fn from_symbols(symbols: Symbols) -> Self {
        Self {
            symbols,
            path: None,
            _library: None,
        }
    }

    /// The resolved function table
    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    /// Deallocators that owned return values release through
    pub fn deallocators(&self) -> &Deallocators {
        &self.symbols.dealloc
    }

    /// File the library was loaded from, if it was loaded dynamically
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Platform file name for a library base name
pub fn platform_library_name(name: &str) -> String {
    #[cfg(target_os = "windows")]
    {
        format!("lib{}.dll", name)
    }
    #[cfg(target_os = "macos")]
    {
        format!("lib{}.dylib", name)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        format!("lib{}.so", name)
    }
}

/// `<os>-<arch>` directory of the development build layout
pub fn development_platform_dir() -> String {
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        _ => "arm64",
    };
    format!("{}-{}", std::env::consts::OS, arch)
}

/// Candidate library files in search order
pub fn candidate_paths(config: &LoaderConfig) -> Vec<PathBuf> {
    let file_name = platform_library_name(&config.library_name);
    let mut candidates = Vec::new();

    if let Some(path) = &config.library_path {
        candidates.push(path.clone());
    }

    candidates.extend(config.search_dirs.iter().map(|dir| dir.join(&file_name)));

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(&file_name));
    }

    if let Ok(cwd) = std::env::current_dir() {
        if config.development_layout {
            candidates.push(
                cwd.join(".shared")
                    .join(development_platform_dir())
                    .join(&file_name),
            );
        }
        candidates.push(cwd.join(&file_name));
    }

    candidates.push(PathBuf::from(file_name));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_library_name() {
        let name = platform_library_name("enry");
        #[cfg(target_os = "windows")]
        assert_eq!(name, "libenry.dll");
        #[cfg(target_os = "macos")]
        assert_eq!(name, "libenry.dylib");
        #[cfg(target_os = "linux")]
        assert_eq!(name, "libenry.so");
    }

    #[test]
    fn test_candidate_order() {
        let config = LoaderConfig {
            library_path: Some(PathBuf::from("/explicit/libenry.so")),
            search_dirs: vec![PathBuf::from("/first"), PathBuf::from("/second")],
            ..LoaderConfig::default()
        };
        let file_name = platform_library_name("enry");
        let candidates = candidate_paths(&config);

        assert_eq!(candidates[0], PathBuf::from("/explicit/libenry.so"));
        assert_eq!(candidates[1], Path::new("/first").join(&file_name));
        assert_eq!(candidates[2], Path::new("/second").join(&file_name));
        assert_eq!(candidates.last(), Some(&PathBuf::from(&file_name)));
        assert!(candidates
            .iter()
            .any(|c| c.to_string_lossy().contains(&development_platform_dir())));
    }

    #[test]
    fn test_development_layout_can_be_disabled() {
        let config = LoaderConfig {
            development_layout: false,
            ..LoaderConfig::default()
        };
        assert!(!candidate_paths(&config)
            .iter()
            .any(|c| c.to_string_lossy().contains(".shared")));
    }

    #[test]
    fn test_open_missing_file() {
        let err = NativeLibrary::open("/nonexistent/dir/libenry.so").unwrap_err();
        assert_eq!(err.attempted, vec![PathBuf::from("/nonexistent/dir/libenry.so")]);
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_locate_reports_every_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join(platform_library_name("enry-test-missing"));
        std::fs::write(&bogus, b"not a shared object").unwrap();

        let config = LoaderConfig {
            library_name: "enry-test-missing".to_string(),
            search_dirs: vec![dir.path().to_path_buf()],
            development_layout: false,
            ..LoaderConfig::default()
        };
        let err = NativeLibrary::locate(&config).unwrap_err();

        assert!(err.attempted.contains(&bogus));
        assert!(err
            .attempted
            .contains(&PathBuf::from(platform_library_name("enry-test-missing"))));
        assert!(err.to_string().contains(&bogus.display().to_string()));
    }
}
