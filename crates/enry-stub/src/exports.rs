//! C ABI exports, one per enry entry point
//!
//! Argument conventions match the Go library: text as a NUL-terminated
//! `char*`, content as `char*` plus `int` length, candidates as a
//! NUL-terminated `char**` where null or empty means "no filter".

use std::os::raw::{c_char, c_int};
use std::panic::UnwindSafe;
use std::ptr;

use crate::classify;
use crate::memory::{
    allocate_array, allocate_string, guard, read_candidates, read_content, read_text,
    record_call, release_array, release_string,
};

fn single(query: impl FnOnce() -> &'static str + UnwindSafe) -> *mut c_char {
    guard(ptr::null_mut(), || {
        record_call();
        allocate_string(query())
    })
}

fn verdict(query: impl FnOnce() -> bool + UnwindSafe) -> c_int {
    guard(0, || {
        record_call();
        c_int::from(query())
    })
}

fn list(query: impl FnOnce() -> Vec<&'static str> + UnwindSafe) -> *mut *mut c_char {
    guard(ptr::null_mut(), || {
        record_call();
        allocate_array(&query())
    })
}

/// Free a string returned by any single-answer query
///
/// # Safety
/// `s` must come from this library and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn FreeCString(s: *mut c_char) {
    guard((), move || release_string(s))
}

/// Free a string array and every string it holds
///
/// # Safety
/// `array` must come from this library and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn FreeStringArray(array: *mut *mut c_char) {
    guard((), move || release_array(array))
}

/// # Safety
/// `filename` must be a C string; `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguage(
    filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
) -> *mut c_char {
    single(move || classify::language(&read_text(filename), &read_content(content, length)))
}

/// # Safety
/// `filename` must be a C string; `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByContent(
    filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
) -> *mut c_char {
    single(move || {
        let langs = classify::by_content(&read_text(filename), &read_content(content, length), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByEmacsModeline(
    content: *mut c_char,
    length: c_int,
) -> *mut c_char {
    single(move || {
        let langs = classify::by_emacs_modeline(&read_content(content, length), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `filename` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByExtension(filename: *mut c_char) -> *mut c_char {
    single(move || {
        let langs = classify::by_extension(&read_text(filename), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `filename` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByFilename(filename: *mut c_char) -> *mut c_char {
    single(move || {
        let langs = classify::by_filename(&read_text(filename), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByModeline(content: *mut c_char, length: c_int) -> *mut c_char {
    single(move || {
        let langs = classify::by_modeline(&read_content(content, length), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByShebang(content: *mut c_char, length: c_int) -> *mut c_char {
    single(move || {
        let langs = classify::by_shebang(&read_content(content, length), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageByVimModeline(
    content: *mut c_char,
    length: c_int,
) -> *mut c_char {
    single(move || {
        let langs = classify::by_vim_modeline(&read_content(content, length), &[]);
        langs.first().copied().unwrap_or("")
    })
}

/// # Safety
/// `path` and `language` must be C strings.
#[no_mangle]
pub unsafe extern "C" fn GetMimeType(path: *mut c_char, language: *mut c_char) -> *mut c_char {
    single(move || classify::mime_type(&read_text(path), &read_text(language)))
}

/// # Safety
/// `language` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn GetColor(language: *mut c_char) -> *mut c_char {
    single(move || classify::color(&read_text(language)))
}

/// # Safety
/// `language` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageType(language: *mut c_char) -> *mut c_char {
    single(move || classify::language_type(&read_text(language)))
}

/// # Safety
/// `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn IsBinary(content: *mut c_char, length: c_int) -> c_int {
    verdict(move || classify::is_binary(&read_content(content, length)))
}

/// # Safety
/// `path` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn IsConfiguration(path: *mut c_char) -> c_int {
    verdict(move || classify::is_configuration(&read_text(path)))
}

/// # Safety
/// `path` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn IsDocumentation(path: *mut c_char) -> c_int {
    verdict(move || classify::is_documentation(&read_text(path)))
}

/// # Safety
/// `path` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn IsDotFile(path: *mut c_char) -> c_int {
    verdict(move || classify::is_dot_file(&read_text(path)))
}

/// # Safety
/// `path` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn IsImage(path: *mut c_char) -> c_int {
    verdict(move || classify::is_image(&read_text(path)))
}

/// # Safety
/// `path` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn IsVendor(path: *mut c_char) -> c_int {
    verdict(move || classify::is_vendor(&read_text(path)))
}

/// # Safety
/// `path` must be a C string; `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn IsGenerated(
    path: *mut c_char,
    content: *mut c_char,
    length: c_int,
) -> c_int {
    verdict(move || classify::is_generated(&read_text(path), &read_content(content, length)))
}

/// # Safety
/// `path` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn IsTest(path: *mut c_char) -> c_int {
    verdict(move || classify::is_test(&read_text(path)))
}

/// # Safety
/// `filename` must be a C string; `content` must hold `length` bytes.
#[no_mangle]
pub unsafe extern "C" fn GetLanguages(
    filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
) -> *mut *mut c_char {
    list(move || classify::languages(&read_text(filename), &read_content(content, length)))
}

/// # Safety
/// `language` must be a C string.
#[no_mangle]
pub unsafe extern "C" fn GetLanguageExtensions(language: *mut c_char) -> *mut *mut c_char {
    list(move || classify::extensions(&read_text(language)))
}

/// # Safety
/// `filename` must be a C string; `content` must hold `length` bytes;
/// `candidates` must be null or a NUL-terminated array of C strings.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByContent(
    filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_content(&read_text(filename), &read_content(content, length), &candidates)
    })
}

/// # Safety
/// Same contract as [`GetLanguagesByContent`]; `filename` is ignored.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByEmacsModeline(
    _filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_emacs_modeline(&read_content(content, length), &candidates)
    })
}

/// # Safety
/// Same contract as [`GetLanguagesByContent`]; `content` is ignored.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByExtension(
    filename: *mut c_char,
    _content: *mut c_char,
    _length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_extension(&read_text(filename), &candidates)
    })
}

/// # Safety
/// Same contract as [`GetLanguagesByContent`]; `content` is ignored.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByFilename(
    filename: *mut c_char,
    _content: *mut c_char,
    _length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_filename(&read_text(filename), &candidates)
    })
}

/// # Safety
/// Same contract as [`GetLanguagesByContent`]; `filename` is ignored.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByModeline(
    _filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_modeline(&read_content(content, length), &candidates)
    })
}

/// # Safety
/// Same contract as [`GetLanguagesByContent`]; `filename` is ignored.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByShebang(
    _filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_shebang(&read_content(content, length), &candidates)
    })
}

/// # Safety
/// Same contract as [`GetLanguagesByContent`]; `filename` is ignored.
#[no_mangle]
pub unsafe extern "C" fn GetLanguagesByVimModeline(
    _filename: *mut c_char,
    content: *mut c_char,
    length: c_int,
    candidates: *mut *mut c_char,
) -> *mut *mut c_char {
    list(move || {
        let candidates = read_candidates(candidates).unwrap_or_default();
        classify::by_vim_modeline(&read_content(content, length), &candidates)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Ledger;
    use std::ffi::{CStr, CString};

    #[test]
    fn test_get_language_returns_heap_string() {
        let before = Ledger::snapshot();
        let filename = CString::new("test.py").unwrap();
        let content = b"import os";
        unsafe {
            let out = GetLanguage(
                filename.as_ptr() as *mut c_char,
                content.as_ptr() as *mut c_char,
                content.len() as c_int,
            );
            assert_eq!(CStr::from_ptr(out).to_str().unwrap(), "Python");
            FreeCString(out);
        }
        let delta = Ledger::snapshot().since(&before);
        assert_eq!(delta.calls, 1);
        assert_eq!(delta.live_strings(), 0);
    }

    #[test]
    fn test_unknown_answer_is_empty_not_null() {
        let filename = CString::new("README").unwrap();
        unsafe {
            let out = GetLanguageByExtension(filename.as_ptr() as *mut c_char);
            assert!(!out.is_null());
            assert_eq!(CStr::from_ptr(out).to_bytes(), b"");
            FreeCString(out);
        }
    }

    #[test]
    fn test_null_candidates_mean_unfiltered() {
        let filename = CString::new("x.h").unwrap();
        unsafe {
            let out = GetLanguagesByExtension(
                filename.as_ptr() as *mut c_char,
                ptr::null_mut(),
                0,
                ptr::null_mut(),
            );
            let mut len = 0;
            while !(*out.add(len)).is_null() {
                len += 1;
            }
            assert_eq!(len, 3);
            FreeStringArray(out);
        }
        assert_eq!(crate::memory::last_candidates(), None);
    }

    #[test]
    fn test_ignored_arguments_are_not_read() {
        let seen = b"seen";
        let unseen = b"unseen";
        let filename = CString::new("Makefile").unwrap();
        unsafe {
            IsBinary(seen.as_ptr() as *mut c_char, seen.len() as c_int);
            let out = GetLanguagesByFilename(
                filename.as_ptr() as *mut c_char,
                unseen.as_ptr() as *mut c_char,
                unseen.len() as c_int,
                ptr::null_mut(),
            );
            assert_eq!(CStr::from_ptr(*out).to_str().unwrap(), "Makefile");
            FreeStringArray(out);
            assert_eq!(crate::memory::last_content(), Some(seen.to_vec()));

            let shebang = b"#!/bin/sh";
            let out = GetLanguagesByShebang(
                ptr::null_mut(),
                shebang.as_ptr() as *mut c_char,
                shebang.len() as c_int,
                ptr::null_mut(),
            );
            assert_eq!(CStr::from_ptr(*out).to_str().unwrap(), "Shell");
            FreeStringArray(out);
        }
        assert_eq!(crate::memory::last_content(), Some(b"#!/bin/sh".to_vec()));
    }
}
