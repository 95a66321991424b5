//! Loopback build of the enry C ABI
//!
//! Exports the same thirty symbols as the Go shared library, backed by a
//! small rule table instead of linguist data. Built as a `cdylib` it can be
//! loaded by path like the real library; linked as an `rlib` its function
//! table is available directly through [`symbols`].
//!
//! Allocation bookkeeping is kept per thread in [`Ledger`], so tests can
//! assert that the binding released everything it was handed.

#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

mod classify;
mod exports;
mod memory;

pub use exports::*;
pub use memory::{last_candidates, last_content, Ledger};

use enry_ffi::{Deallocators, Symbols};

/// Function table pointing at this crate's exports
pub fn symbols() -> Symbols {
    Symbols {
        dealloc: Deallocators {
            free_cstring: FreeCString,
            free_string_array: FreeStringArray,
        },
        get_language: GetLanguage,
        get_language_by_content: GetLanguageByContent,
        get_language_by_emacs_modeline: GetLanguageByEmacsModeline,
        get_language_by_extension: GetLanguageByExtension,
        get_language_by_filename: GetLanguageByFilename,
        get_language_by_modeline: GetLanguageByModeline,
        get_language_by_shebang: GetLanguageByShebang,
        get_language_by_vim_modeline: GetLanguageByVimModeline,
        get_mime_type: GetMimeType,
        get_color: GetColor,
        get_language_type: GetLanguageType,
        is_binary: IsBinary,
        is_configuration: IsConfiguration,
        is_documentation: IsDocumentation,
        is_dot_file: IsDotFile,
        is_image: IsImage,
        is_vendor: IsVendor,
        is_generated: IsGenerated,
        is_test: IsTest,
        get_languages: GetLanguages,
        get_language_extensions: GetLanguageExtensions,
        get_languages_by_content: GetLanguagesByContent,
        get_languages_by_emacs_modeline: GetLanguagesByEmacsModeline,
        get_languages_by_extension: GetLanguagesByExtension,
        get_languages_by_filename: GetLanguagesByFilename,
        get_languages_by_modeline: GetLanguagesByModeline,
        get_languages_by_shebang: GetLanguagesByShebang,
        get_languages_by_vim_modeline: GetLanguagesByVimModeline,
    }
}
