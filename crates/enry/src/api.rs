//! Free functions over the process-wide library
//!
//! Each function is one native call through [`crate::library`]. Content is
//! raw bytes and may contain NULs; names and paths must not.

use enry_ffi::{Guess, Result};

use crate::global::library;

/// Best single language for a file, `""` when unknown
pub fn get_language(filename: &str, content: &[u8]) -> Result<String> {
    library()?.language(filename, content)
}

pub fn get_language_by_content(filename: &str, content: &[u8]) -> Result<Guess> {
    library()?.language_by_content(filename, content)
}

pub fn get_language_by_emacs_modeline(content: &[u8]) -> Result<Guess> {
    library()?.language_by_emacs_modeline(content)
}

pub fn get_language_by_extension(filename: &str) -> Result<Guess> {
    library()?.language_by_extension(filename)
}

pub fn get_language_by_filename(filename: &str) -> Result<Guess> {
    library()?.language_by_filename(filename)
}

pub fn get_language_by_modeline(content: &[u8]) -> Result<Guess> {
    library()?.language_by_modeline(content)
}

pub fn get_language_by_shebang(content: &[u8]) -> Result<Guess> {
    library()?.language_by_shebang(content)
}

pub fn get_language_by_vim_modeline(content: &[u8]) -> Result<Guess> {
    library()?.language_by_vim_modeline(content)
}

/// MIME type for a path already known to be `language`
pub fn get_mime_type(path: &str, language: &str) -> Result<String> {
    library()?.mime_type(path, language)
}

/// Hex color linguist uses for `language`, `""` when it has none
pub fn get_color(language: &str) -> Result<String> {
    library()?.color(language)
}

/// Type name such as `"Programming"`; parse into
/// [`LanguageType`](crate::LanguageType) when a closed set is needed
pub fn get_language_type(language: &str) -> Result<String> {
    library()?.language_type(language)
}

pub fn is_binary(content: &[u8]) -> Result<bool> {
    library()?.is_binary(content)
}

pub fn is_configuration(path: &str) -> Result<bool> {
    library()?.is_configuration(path)
}

pub fn is_documentation(path: &str) -> Result<bool> {
    library()?.is_documentation(path)
}

pub fn is_dot_file(path: &str) -> Result<bool> {
    library()?.is_dot_file(path)
}

pub fn is_image(path: &str) -> Result<bool> {
    library()?.is_image(path)
}

pub fn is_vendor(path: &str) -> Result<bool> {
    library()?.is_vendor(path)
}

pub fn is_generated(path: &str, content: &[u8]) -> Result<bool> {
    library()?.is_generated(path, content)
}

pub fn is_test(path: &str) -> Result<bool> {
    library()?.is_test(path)
}

/// Every language the file could be, most likely first
pub fn get_languages(filename: &str, content: &[u8]) -> Result<Vec<String>> {
    library()?.languages(filename, content)
}

pub fn get_language_extensions(language: &str) -> Result<Vec<String>> {
    library()?.language_extensions(language)
}

/// Languages suggested by content analysis
///
/// `candidates` narrows the answer: `None` applies no filter, an empty slice
/// yields an empty result without calling into the library.
pub fn get_languages_by_content(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_content(filename, content, candidates)
}

pub fn get_languages_by_emacs_modeline(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_emacs_modeline(filename, content, candidates)
}

pub fn get_languages_by_extension(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_extension(filename, content, candidates)
}

pub fn get_languages_by_filename(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_filename(filename, content, candidates)
}

pub fn get_languages_by_modeline(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_modeline(filename, content, candidates)
}

pub fn get_languages_by_shebang(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_shebang(filename, content, candidates)
}

pub fn get_languages_by_vim_modeline(
    filename: &str,
    content: &[u8],
    candidates: Option<&[&str]>,
) -> Result<Vec<String>> {
    library()?.languages_by_vim_modeline(filename, content, candidates)
}
