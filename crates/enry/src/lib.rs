//! Programming language detection backed by the enry native library
//!
//! The free functions in this crate share one library handle, loaded on
//! first use from the locations described by [`LoaderConfig`]. Use
//! [`init_with`] to load with an explicit config, [`install`] to supply an
//! already opened library, or hold an [`Enry`] directly to bypass the
//! process-wide handle.
//!
//! ```no_run
//! let language = enry::get_language("main.py", b"import os")?;
//! assert_eq!(language, "Python");
//!
//! let only_go = enry::get_languages_by_extension("main.go", b"", Some(&["Go"]))?;
//! assert_eq!(only_go, vec!["Go"]);
//! # Ok::<(), enry::Error>(())
//! ```

mod api;
mod global;
mod language_type;

pub use api::*;
pub use global::{init_with, install, is_initialized, library};
pub use language_type::LanguageType;

pub use enry_ffi::{Error, Guess, LoadError, LoaderConfig, Result};

/// An opened enry library; queries are methods named after the native
/// entry points (`language`, `languages_by_extension`, ...)
pub use enry_ffi::NativeLibrary as Enry;
