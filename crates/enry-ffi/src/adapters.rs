//! Call adapters, one per native entry point
//!
//! Every adapter follows the same sequence: marshal the arguments into
//! host-owned buffers, make exactly one native call, convert the result,
//! and only then let the argument buffers go out of scope. The sequence is
//! written once per argument shape and reused across entry points. The
//! return shape is a type parameter implementing [`ReturnShape`].

use std::os::raw::{c_char, c_int};
use std::ptr;

use tracing::{debug, trace};

use crate::candidates::{CandidateList, Candidates};
use crate::error::Result;
use crate::library::NativeLibrary;
use crate::marshal::TextBuffer;
use crate::memory::{take_string, take_string_array, Ownership};
use crate::symbols::{BytesFn, Deallocators, EntryPoint, FilteredFn, TextBytesFn, TextFn, TextTextFn};
use crate::types::{ByteSpan, Guess};

/// How a raw native return value becomes a host value
pub trait ReturnShape {
    /// Value as returned across the ABI
    type Raw: Copy;
    /// Host value handed to the caller
    type Output;

    /// Convert and release `raw`
    ///
    /// # Safety
    /// `raw` must come straight from a call into the library behind
    /// `dealloc`, and must not be used again afterwards.
    unsafe fn convert(dealloc: &Deallocators, raw: Self::Raw, entry_point: EntryPoint) -> Result<Self::Output>;
}

/// Owned `char*` to `String`
#[derive(Debug)]
pub enum Text {}

/// Owned `char*` to [`Guess`]
#[derive(Debug)]
pub enum Verdict {}

/// `int` truth value to `bool`; nothing to free
#[derive(Debug)]
pub enum Flag {}

/// Owned NUL-terminated `char**` to `Vec<String>`
#[derive(Debug)]
pub enum List {}

impl ReturnShape for Text {
    type Raw = *mut c_char;
    type Output = String;

    unsafe fn convert(dealloc: &Deallocators, raw: *mut c_char, entry_point: EntryPoint) -> Result<String> {
        // every single-string entry point returns a C.CString allocation
        take_string(dealloc, raw, Ownership::Heap, entry_point)
    }
}

impl ReturnShape for Verdict {
    type Raw = *mut c_char;
    type Output = Guess;

    unsafe fn convert(dealloc: &Deallocators, raw: *mut c_char, entry_point: EntryPoint) -> Result<Guess> {
        Text::convert(dealloc, raw, entry_point).map(Guess::from_language)
    }
}

impl ReturnShape for Flag {
    type Raw = c_int;
    type Output = bool;

    unsafe fn convert(_dealloc: &Deallocators, raw: c_int, _entry_point: EntryPoint) -> Result<bool> {
        Ok(raw != 0)
    }
}

impl ReturnShape for List {
    type Raw = *mut *mut c_char;
    type Output = Vec<String>;

    unsafe fn convert(
        dealloc: &Deallocators,
        raw: *mut *mut c_char,
        entry_point: EntryPoint,
    ) -> Result<Vec<String>> {
        take_string_array(dealloc, raw, entry_point)
    }
}

// Shape helpers. Each keeps its argument buffers alive until the result has
// been converted; the borrowed views cannot outlive them.
impl NativeLibrary {
    fn call_text<R: ReturnShape>(
        &self,
        entry_point: EntryPoint,
        native: TextFn<R::Raw>,
        argument: &'static str,
        text: &str,
    ) -> Result<R::Output> {
        let text = TextBuffer::new(argument, text)?;
        let text_view = text.view();
        trace!(entry_point = %entry_point, text_len = text_view.len(), "native call");

        // SAFETY: the view borrows `text`, which lives until after `convert`.
        let raw = unsafe { native(text_view.as_ptr()) };
        unsafe { R::convert(self.deallocators(), raw, entry_point) }
    }

    fn call_bytes<R: ReturnShape>(
        &self,
        entry_point: EntryPoint,
        native: BytesFn<R::Raw>,
        content: &[u8],
    ) -> Result<R::Output> {
        let span = ByteSpan::borrow(content);
        let length = span.c_len()?;
        trace!(entry_point = %entry_point, content_len = span.len(), "native call");

        // SAFETY: the span borrows `content` for the whole call.
        let raw = unsafe { native(span.as_ptr(), length) };
        unsafe { R::convert(self.deallocators(), raw, entry_point) }
    }

    fn call_text_bytes<R: ReturnShape>(
        &self,
        entry_point: EntryPoint,
        native: TextBytesFn<R::Raw>,
        argument: &'static str,
        text: &str,
        content: &[u8],
    ) -> Result<R::Output> {
        let text = TextBuffer::new(argument, text)?;
        let text_view = text.view();
        let span = ByteSpan::borrow(content);
        let length = span.c_len()?;
        trace!(
            entry_point = %entry_point,
            text_len = text_view.len(),
            content_len = span.len(),
            "native call"
        );

        // SAFETY: both views borrow buffers that outlive `convert`.
        let raw = unsafe { native(text_view.as_ptr(), span.as_ptr(), length) };
        unsafe { R::convert(self.deallocators(), raw, entry_point) }
    }

    fn call_text_text<R: ReturnShape>(
        &self,
        entry_point: EntryPoint,
        native: TextTextFn<R::Raw>,
        first: (&'static str, &str),
        second: (&'static str, &str),
    ) -> Result<R::Output> {
        let first = TextBuffer::new(first.0, first.1)?;
        let second = TextBuffer::new(second.0, second.1)?;
        let (first_view, second_view) = (first.view(), second.view());
        trace!(
            entry_point = %entry_point,
            first_len = first_view.len(),
            second_len = second_view.len(),
            "native call"
        );

        // SAFETY: both views borrow buffers that outlive `convert`.
        let raw = unsafe { native(first_view.as_ptr(), second_view.as_ptr()) };
        unsafe { R::convert(self.deallocators(), raw, entry_point) }
    }

    fn call_filtered(
        &self,
        entry_point: EntryPoint,
        native: FilteredFn,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let names = match Candidates::prepare(candidates)? {
            Candidates::Nothing => {
                debug!(entry_point = %entry_point, "empty candidate filter, skipping native call");
                return Ok(Vec::new());
            }
            Candidates::Unfiltered => None,
            Candidates::Only(names) => Some(names),
        };

        let filename = TextBuffer::new("filename", filename)?;
        let filename_view = filename.view();
        let span = ByteSpan::borrow(content);
        let length = span.c_len()?;
        let list = names.as_ref().map(|names| names.list());
        let list_ptr = list.as_ref().map_or(ptr::null_mut(), CandidateList::as_ptr);
        trace!(
            entry_point = %entry_point,
            text_len = filename_view.len(),
            content_len = span.len(),
            candidates = list.as_ref().map_or(0, CandidateList::len),
            "native call"
        );

        // SAFETY: the filename, content and candidate list (including the
        // names it points at) all outlive `convert`.
        let raw = unsafe { native(filename_view.as_ptr(), span.as_ptr(), length, list_ptr) };
        unsafe { List::convert(self.deallocators(), raw, entry_point) }
    }
}

// Singular queries
impl NativeLibrary {
    /// `GetLanguage`: best single language for a file
    pub fn language(&self, filename: &str, content: &[u8]) -> Result<String> {
        let f = self.symbols().get_language;
        self.call_text_bytes::<Text>(EntryPoint::GetLanguage, f, "filename", filename, content)
    }

    /// `GetLanguageByContent`
    pub fn language_by_content(&self, filename: &str, content: &[u8]) -> Result<Guess> {
        let f = self.symbols().get_language_by_content;
        self.call_text_bytes::<Verdict>(EntryPoint::GetLanguageByContent, f, "filename", filename, content)
    }

    /// `GetLanguageByEmacsModeline`
    pub fn language_by_emacs_modeline(&self, content: &[u8]) -> Result<Guess> {
        let f = self.symbols().get_language_by_emacs_modeline;
        self.call_bytes::<Verdict>(EntryPoint::GetLanguageByEmacsModeline, f, content)
    }

    /// `GetLanguageByExtension`
    pub fn language_by_extension(&self, filename: &str) -> Result<Guess> {
        let f = self.symbols().get_language_by_extension;
        self.call_text::<Verdict>(EntryPoint::GetLanguageByExtension, f, "filename", filename)
    }

    /// `GetLanguageByFilename`
    pub fn language_by_filename(&self, filename: &str) -> Result<Guess> {
        let f = self.symbols().get_language_by_filename;
        self.call_text::<Verdict>(EntryPoint::GetLanguageByFilename, f, "filename", filename)
    }

    /// `GetLanguageByModeline`
    pub fn language_by_modeline(&self, content: &[u8]) -> Result<Guess> {
        let f = self.symbols().get_language_by_modeline;
        self.call_bytes::<Verdict>(EntryPoint::GetLanguageByModeline, f, content)
    }

    /// `GetLanguageByShebang`
    pub fn language_by_shebang(&self, content: &[u8]) -> Result<Guess> {
        let f = self.symbols().get_language_by_shebang;
        self.call_bytes::<Verdict>(EntryPoint::GetLanguageByShebang, f, content)
    }

    /// `GetLanguageByVimModeline`
    pub fn language_by_vim_modeline(&self, content: &[u8]) -> Result<Guess> {
        let f = self.symbols().get_language_by_vim_modeline;
        self.call_bytes::<Verdict>(EntryPoint::GetLanguageByVimModeline, f, content)
    }

    /// `GetMimeType`
    pub fn mime_type(&self, path: &str, language: &str) -> Result<String> {
        let f = self.symbols().get_mime_type;
        self.call_text_text::<Text>(EntryPoint::GetMimeType, f, ("path", path), ("language", language))
    }

    /// `GetColor`: hex color for a language, empty when unknown
    pub fn color(&self, language: &str) -> Result<String> {
        let f = self.symbols().get_color;
        self.call_text::<Text>(EntryPoint::GetColor, f, "language", language)
    }

    /// `GetLanguageType`
    pub fn language_type(&self, language: &str) -> Result<String> {
        let f = self.symbols().get_language_type;
        self.call_text::<Text>(EntryPoint::GetLanguageType, f, "language", language)
    }
}

// Predicates
impl NativeLibrary {
    /// `IsBinary`
    pub fn is_binary(&self, content: &[u8]) -> Result<bool> {
        self.call_bytes::<Flag>(EntryPoint::IsBinary, self.symbols().is_binary, content)
    }

    /// `IsConfiguration`
    pub fn is_configuration(&self, path: &str) -> Result<bool> {
        self.call_text::<Flag>(EntryPoint::IsConfiguration, self.symbols().is_configuration, "path", path)
    }

    /// `IsDocumentation`
    pub fn is_documentation(&self, path: &str) -> Result<bool> {
        self.call_text::<Flag>(EntryPoint::IsDocumentation, self.symbols().is_documentation, "path", path)
    }

    /// `IsDotFile`
    pub fn is_dot_file(&self, path: &str) -> Result<bool> {
        self.call_text::<Flag>(EntryPoint::IsDotFile, self.symbols().is_dot_file, "path", path)
    }

    /// `IsImage`
    pub fn is_image(&self, path: &str) -> Result<bool> {
        self.call_text::<Flag>(EntryPoint::IsImage, self.symbols().is_image, "path", path)
    }

    /// `IsVendor`
    pub fn is_vendor(&self, path: &str) -> Result<bool> {
        self.call_text::<Flag>(EntryPoint::IsVendor, self.symbols().is_vendor, "path", path)
    }

    /// `IsGenerated`
    pub fn is_generated(&self, path: &str, content: &[u8]) -> Result<bool> {
        let f = self.symbols().is_generated;
        self.call_text_bytes::<Flag>(EntryPoint::IsGenerated, f, "path", path, content)
    }

    /// `IsTest`
    pub fn is_test(&self, path: &str) -> Result<bool> {
        self.call_text::<Flag>(EntryPoint::IsTest, self.symbols().is_test, "path", path)
    }
}

// Plural queries
impl NativeLibrary {
    /// `GetLanguages`: every language the file could be
    pub fn languages(&self, filename: &str, content: &[u8]) -> Result<Vec<String>> {
        let f = self.symbols().get_languages;
        self.call_text_bytes::<List>(EntryPoint::GetLanguages, f, "filename", filename, content)
    }

    /// `GetLanguageExtensions`
    pub fn language_extensions(&self, language: &str) -> Result<Vec<String>> {
        let f = self.symbols().get_language_extensions;
        self.call_text::<List>(EntryPoint::GetLanguageExtensions, f, "language", language)
    }

    /// `GetLanguagesByContent`
    pub fn languages_by_content(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_content;
        self.call_filtered(EntryPoint::GetLanguagesByContent, f, filename, content, candidates)
    }

    /// `GetLanguagesByEmacsModeline`
    pub fn languages_by_emacs_modeline(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_emacs_modeline;
        self.call_filtered(EntryPoint::GetLanguagesByEmacsModeline, f, filename, content, candidates)
    }

    /// `GetLanguagesByExtension`
    pub fn languages_by_extension(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_extension;
        self.call_filtered(EntryPoint::GetLanguagesByExtension, f, filename, content, candidates)
    }

    /// `GetLanguagesByFilename`
    pub fn languages_by_filename(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_filename;
        self.call_filtered(EntryPoint::GetLanguagesByFilename, f, filename, content, candidates)
    }

    /// `GetLanguagesByModeline`
    pub fn languages_by_modeline(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_modeline;
        self.call_filtered(EntryPoint::GetLanguagesByModeline, f, filename, content, candidates)
    }

    /// `GetLanguagesByShebang`
    pub fn languages_by_shebang(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_shebang;
        self.call_filtered(EntryPoint::GetLanguagesByShebang, f, filename, content, candidates)
    }

    /// `GetLanguagesByVimModeline`
    pub fn languages_by_vim_modeline(
        &self,
        filename: &str,
        content: &[u8],
        candidates: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        let f = self.symbols().get_languages_by_vim_modeline;
        self.call_filtered(EntryPoint::GetLanguagesByVimModeline, f, filename, content, candidates)
    }
}
