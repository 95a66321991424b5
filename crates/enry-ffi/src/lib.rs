//! enry FFI - marshaling layer over the enry native C ABI
//!
//! This crate opens the enry shared library and moves values across its
//! C boundary. Detection itself happens inside the library; what lives here
//! is who owns each buffer and when it is released.
//!
//! # Safety
//!
//! Two rules are enforced by types rather than by convention:
//! - Host buffers cross the boundary only as [`Borrowed`] views, whose
//!   lifetime keeps the buffer alive until the native call has returned.
//! - Native allocations come back as [`Owned`] values that release through
//!   the library's matching deallocator exactly once, in `Drop`.

mod adapters;
mod candidates;
mod config;
mod error;
mod library;
mod marshal;
mod memory;
mod symbols;
mod types;

// Re-export public API
pub use adapters::{Flag, List, ReturnShape, Text, Verdict};
pub use candidates::{CandidateList, CandidateNames, Candidates};
pub use config::{LoaderConfig, LIBRARY_DIR_ENV, LIBRARY_PATH_ENV};
pub use error::{Error, LoadError, Result};
pub use library::{candidate_paths, development_platform_dir, platform_library_name, NativeLibrary};
pub use marshal::{content_length, TextBuffer};
pub use memory::{
    take_string, take_string_array, take_string_slice, NativeString, NativeStringArray, Owned,
    OwnedCString, OwnedCStringArray, Ownership, Release,
};
pub use symbols::{
    BytesFn, Deallocators, EntryPoint, FilteredFn, FreeCStringFn, FreeStringArrayFn, Symbols,
    TextBytesFn, TextFn, TextTextFn,
};
pub use types::{Borrowed, ByteSpan, Guess, StringSlice, TextView};
