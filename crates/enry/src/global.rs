//! Process-wide library handle
//!
//! The first query loads the library with [`LoaderConfig::from_env`]. The
//! outcome, success or failure, is kept for the life of the process; a
//! failed load is reported again on every later call without a retry.

use std::sync::OnceLock;

use enry_ffi::{Error, LoadError, LoaderConfig, NativeLibrary, Result};
use tracing::debug;

static LIBRARY: OnceLock<std::result::Result<NativeLibrary, LoadError>> = OnceLock::new();

/// Install an already opened library as the process-wide handle
///
/// Returns `false`, leaving the existing handle in place, when a library
/// was already installed or loaded.
pub fn install(library: NativeLibrary) -> bool {
    let installed = LIBRARY.set(Ok(library)).is_ok();
    if !installed {
        debug!("enry library already initialized, install ignored");
    }
    installed
}

/// Initialize the process-wide handle with an explicit loader config
///
/// Has no effect on the search when the handle is already initialized; the
/// existing outcome is returned instead.
pub fn init_with(config: &LoaderConfig) -> Result<&'static NativeLibrary> {
    resolve(LIBRARY.get_or_init(|| NativeLibrary::locate(config)))
}

/// The process-wide library, loading it on first use
pub fn library() -> Result<&'static NativeLibrary> {
    resolve(LIBRARY.get_or_init(|| NativeLibrary::locate(&LoaderConfig::from_env())))
}

/// Whether a load has been attempted yet
pub fn is_initialized() -> bool {
    LIBRARY.get().is_some()
}

fn resolve(
    outcome: &'static std::result::Result<NativeLibrary, LoadError>,
) -> Result<&'static NativeLibrary> {
    outcome.as_ref().map_err(|e| Error::Load(e.clone()))
}
