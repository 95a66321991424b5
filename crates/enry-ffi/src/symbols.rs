//! Native entry points and their typed function pointers

use std::fmt;
use std::os::raw::{c_char, c_int};
use std::path::Path;

use libloading::Library;
use serde::Serialize;

use crate::error::LoadError;

/// `void FreeCString(char*)`
pub type FreeCStringFn = unsafe extern "C" fn(*mut c_char);
/// `void FreeStringArray(char**)`
pub type FreeStringArrayFn = unsafe extern "C" fn(*mut *mut c_char);
/// `T f(char* text)`
pub type TextFn<T> = unsafe extern "C" fn(*mut c_char) -> T;
/// `T f(char* content, int length)`
pub type BytesFn<T> = unsafe extern "C" fn(*mut c_char, c_int) -> T;
/// `T f(char* text, char* content, int length)`
pub type TextBytesFn<T> = unsafe extern "C" fn(*mut c_char, *mut c_char, c_int) -> T;
/// `T f(char* first, char* second)`
pub type TextTextFn<T> = unsafe extern "C" fn(*mut c_char, *mut c_char) -> T;
/// `char** f(char* filename, char* content, int length, char** candidates)`
pub type FilteredFn =
    unsafe extern "C" fn(*mut c_char, *mut c_char, c_int, *mut *mut c_char) -> *mut *mut c_char;

/// Every symbol the native library exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryPoint {
    FreeCString,
    FreeStringArray,
    GetLanguage,
    GetLanguageByContent,
    GetLanguageByEmacsModeline,
    GetLanguageByExtension,
    GetLanguageByFilename,
    GetLanguageByModeline,
    GetLanguageByShebang,
    GetLanguageByVimModeline,
    GetMimeType,
    GetColor,
    GetLanguageType,
    IsBinary,
    IsConfiguration,
    IsDocumentation,
    IsDotFile,
    IsImage,
    IsVendor,
    IsGenerated,
    IsTest,
    GetLanguages,
    GetLanguageExtensions,
    GetLanguagesByContent,
    GetLanguagesByEmacsModeline,
    GetLanguagesByExtension,
    GetLanguagesByFilename,
    GetLanguagesByModeline,
    GetLanguagesByShebang,
    GetLanguagesByVimModeline,
}

impl EntryPoint {
    /// All entry points, deallocators first
    pub const ALL: [EntryPoint; 30] = [
        EntryPoint::FreeCString,
        EntryPoint::FreeStringArray,
        EntryPoint::GetLanguage,
        EntryPoint::GetLanguageByContent,
        EntryPoint::GetLanguageByEmacsModeline,
        EntryPoint::GetLanguageByExtension,
        EntryPoint::GetLanguageByFilename,
        EntryPoint::GetLanguageByModeline,
        EntryPoint::GetLanguageByShebang,
        EntryPoint::GetLanguageByVimModeline,
        EntryPoint::GetMimeType,
        EntryPoint::GetColor,
        EntryPoint::GetLanguageType,
        EntryPoint::IsBinary,
        EntryPoint::IsConfiguration,
        EntryPoint::IsDocumentation,
        EntryPoint::IsDotFile,
        EntryPoint::IsImage,
        EntryPoint::IsVendor,
        EntryPoint::IsGenerated,
        EntryPoint::IsTest,
        EntryPoint::GetLanguages,
        EntryPoint::GetLanguageExtensions,
        EntryPoint::GetLanguagesByContent,
        EntryPoint::GetLanguagesByEmacsModeline,
        EntryPoint::GetLanguagesByExtension,
        EntryPoint::GetLanguagesByFilename,
        EntryPoint::GetLanguagesByModeline,
        EntryPoint::GetLanguagesByShebang,
        EntryPoint::GetLanguagesByVimModeline,
    ];

    /// Exported symbol name
    pub fn name(self) -> &'static str {
        match self {
            EntryPoint::FreeCString => "FreeCString",
            EntryPoint::FreeStringArray => "FreeStringArray",
            EntryPoint::GetLanguage => "GetLanguage",
            EntryPoint::GetLanguageByContent => "GetLanguageByContent",
            EntryPoint::GetLanguageByEmacsModeline => "GetLanguageByEmacsModeline",
            EntryPoint::GetLanguageByExtension => "GetLanguageByExtension",
            EntryPoint::GetLanguageByFilename => "GetLanguageByFilename",
            EntryPoint::GetLanguageByModeline => "GetLanguageByModeline",
            EntryPoint::GetLanguageByShebang => "GetLanguageByShebang",
            EntryPoint::GetLanguageByVimModeline => "GetLanguageByVimModeline",
            EntryPoint::GetMimeType => "GetMimeType",
            EntryPoint::GetColor => "GetColor",
            EntryPoint::GetLanguageType => "GetLanguageType",
            EntryPoint::IsBinary => "IsBinary",
            EntryPoint::IsConfiguration => "IsConfiguration",
            EntryPoint::IsDocumentation => "IsDocumentation",
            EntryPoint::IsDotFile => "IsDotFile",
            EntryPoint::IsImage => "IsImage",
            EntryPoint::IsVendor => "IsVendor",
            EntryPoint::IsGenerated => "IsGenerated",
            EntryPoint::IsTest => "IsTest",
            EntryPoint::GetLanguages => "GetLanguages",
            EntryPoint::GetLanguageExtensions => "GetLanguageExtensions",
            EntryPoint::GetLanguagesByContent => "GetLanguagesByContent",
            EntryPoint::GetLanguagesByEmacsModeline => "GetLanguagesByEmacsModeline",
            EntryPoint::GetLanguagesByExtension => "GetLanguagesByExtension",
            EntryPoint::GetLanguagesByFilename => "GetLanguagesByFilename",
            EntryPoint::GetLanguagesByModeline => "GetLanguagesByModeline",
            EntryPoint::GetLanguagesByShebang => "GetLanguagesByShebang",
            EntryPoint::GetLanguagesByVimModeline => "GetLanguagesByVimModeline",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two release entry points. Kept apart from [`Symbols`] so that owned
/// native values only ever see the functions allowed to free them.
#[derive(Debug, Clone, Copy)]
pub struct Deallocators {
    /// Releases one string returned by a single-answer query
    pub free_cstring: FreeCStringFn,
    /// Releases a string array and every string in it
    pub free_string_array: FreeStringArrayFn,
}

/// Resolved function table for one native library
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    pub dealloc: Deallocators,

    pub get_language: TextBytesFn<*mut c_char>,
    pub get_language_by_content: TextBytesFn<*mut c_char>,
    pub get_language_by_emacs_modeline: BytesFn<*mut c_char>,
    pub get_language_by_extension: TextFn<*mut c_char>,
    pub get_language_by_filename: TextFn<*mut c_char>,
    pub get_language_by_modeline: BytesFn<*mut c_char>,
    pub get_language_by_shebang: BytesFn<*mut c_char>,
    pub get_language_by_vim_modeline: BytesFn<*mut c_char>,
    pub get_mime_type: TextTextFn<*mut c_char>,
    pub get_color: TextFn<*mut c_char>,
    pub get_language_type: TextFn<*mut c_char>,

    pub is_binary: BytesFn<c_int>,
    pub is_configuration: TextFn<c_int>,
    pub is_documentation: TextFn<c_int>,
    pub is_dot_file: TextFn<c_int>,
    pub is_image: TextFn<c_int>,
    pub is_vendor: TextFn<c_int>,
    pub is_generated: TextBytesFn<c_int>,
    pub is_test: TextFn<c_int>,

    pub get_languages: TextBytesFn<*mut *mut c_char>,
    pub get_language_extensions: TextFn<*mut *mut c_char>,
    pub get_languages_by_content: FilteredFn,
    pub get_languages_by_emacs_modeline: FilteredFn,
    pub get_languages_by_extension: FilteredFn,
    pub get_languages_by_filename: FilteredFn,
    pub get_languages_by_modeline: FilteredFn,
    pub get_languages_by_shebang: FilteredFn,
    pub get_languages_by_vim_modeline: FilteredFn,
}

impl Symbols {
    /// Resolve every entry point from an opened library
    ///
    /// # Safety
    /// `library` must export the enry ABI with exactly the signatures
    /// declared on [`Symbols`]. The returned pointers are only valid while
    /// `library` stays loaded.
    pub unsafe fn resolve(library: &Library, path: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            dealloc: Deallocators {
                free_cstring: lookup(library, path, EntryPoint::FreeCString)?,
                free_string_array: lookup(library, path, EntryPoint::FreeStringArray)?,
            },
            get_language: lookup(library, path, EntryPoint::GetLanguage)?,
            get_language_by_content: lookup(library, path, EntryPoint::GetLanguageByContent)?,
            get_language_by_emacs_modeline: lookup(
                library,
                path,
                EntryPoint::GetLanguageByEmacsModeline,
            )?,
            get_language_by_extension: lookup(library, path, EntryPoint::GetLanguageByExtension)?,
            get_language_by_filename: lookup(library, path, EntryPoint::GetLanguageByFilename)?,
            get_language_by_modeline: lookup(library, path, EntryPoint::GetLanguageByModeline)?,
            get_language_by_shebang: lookup(library, path, EntryPoint::GetLanguageByShebang)?,
            get_language_by_vim_modeline: lookup(
                library,
                path,
                EntryPoint::GetLanguageByVimModeline,
            )?,
            get_mime_type: lookup(library, path, EntryPoint::GetMimeType)?,
            get_color: lookup(library, path, EntryPoint::GetColor)?,
            get_language_type: lookup(library, path, EntryPoint::GetLanguageType)?,
            is_binary: lookup(library, path, EntryPoint::IsBinary)?,
            is_configuration: lookup(library, path, EntryPoint::IsConfiguration)?,
            is_documentation: lookup(library, path, EntryPoint::IsDocumentation)?,
            is_dot_file: lookup(library, path, EntryPoint::IsDotFile)?,
            is_image: lookup(library, path, EntryPoint::IsImage)?,
            is_vendor: lookup(library, path, EntryPoint::IsVendor)?,
            is_generated: lookup(library, path, EntryPoint::IsGenerated)?,
            is_test: lookup(library, path, EntryPoint::IsTest)?,
            get_languages: lookup(library, path, EntryPoint::GetLanguages)?,
            get_language_extensions: lookup(library, path, EntryPoint::GetLanguageExtensions)?,
            get_languages_by_content: lookup(library, path, EntryPoint::GetLanguagesByContent)?,
            get_languages_by_emacs_modeline: lookup(
                library,
                path,
                EntryPoint::GetLanguagesByEmacsModeline,
            )?,
            get_languages_by_extension: lookup(
                library,
                path,
                EntryPoint::GetLanguagesByExtension,
            )?,
            get_languages_by_filename: lookup(library, path, EntryPoint::GetLanguagesByFilename)?,
            get_languages_by_modeline: lookup(library, path, EntryPoint::GetLanguagesByModeline)?,
            get_languages_by_shebang: lookup(library, path, EntryPoint::GetLanguagesByShebang)?,
            get_languages_by_vim_modeline: lookup(
                library,
                path,
                EntryPoint::GetLanguagesByVimModeline,
            )?,
        })
    }
}

/// Copy one function pointer out of the library
unsafe fn lookup<T: Copy>(library: &Library, path: &Path, entry: EntryPoint) -> Result<T, LoadError> {
    library
        .get::<T>(entry.name().as_bytes())
        .map(|symbol| *symbol)
        .map_err(|e| {
            LoadError::new(
                vec![path.to_path_buf()],
                format!("missing symbol `{}`: {}", entry, e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_entry_point_names_are_unique() {
        let names: HashSet<_> = EntryPoint::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), EntryPoint::ALL.len());
    }

    #[test]
    fn test_entry_point_display() {
        assert_eq!(EntryPoint::GetLanguagesByShebang.to_string(), "GetLanguagesByShebang");
        assert_eq!(EntryPoint::FreeStringArray.to_string(), "FreeStringArray");
    }
}
