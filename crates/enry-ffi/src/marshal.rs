//! Host-to-native primitive marshalers
//!
//! Each marshaler hands out a [`Borrowed`] view plus, for text, the buffer
//! that backs it. The caller keeps the buffer alive across the native call;
//! the lifetime on the view makes forgetting that a compile error.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};

use crate::error::{Error, Result};
use crate::types::{Borrowed, ByteSpan, TextView};

impl ByteSpan {
    /// Borrow a host byte buffer. Empty input still yields a non-null
    /// pointer so the native side can tell "no data" from "no buffer".
    pub fn borrow(bytes: &[u8]) -> Borrowed<'_, ByteSpan> {
        let span = ByteSpan {
            data: bytes.as_ptr(),
            len: bytes.len(),
            cap: bytes.len(),
        };
        // SAFETY: the span points into `bytes`, which outlives the borrow.
        unsafe { Borrowed::new(span) }
    }
}

impl TextView {
    /// Borrow NUL-terminated host text
    pub fn borrow(text: &CStr) -> Borrowed<'_, TextView> {
        let view = TextView {
            data: text.as_ptr(),
            len: text.to_bytes().len(),
        };
        // SAFETY: the view points into `text`, which outlives the borrow.
        unsafe { Borrowed::new(view) }
    }
}

impl<'a> Borrowed<'a, ByteSpan> {
    /// Content pointer in the shape the ABI declares (`char*`)
    pub fn as_ptr(&self) -> *mut c_char {
        self.get().data as *mut c_char
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.get().len
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.get().len == 0
    }

    /// Length as the native `int` parameter
    pub fn c_len(&self) -> Result<c_int> {
        content_length(self.len())
    }
}

impl<'a> Borrowed<'a, TextView> {
    /// Text pointer in the shape the ABI declares (`char*`)
    pub fn as_ptr(&self) -> *mut c_char {
        self.get().data as *mut c_char
    }

    /// Length in bytes, excluding the terminator
    pub fn len(&self) -> usize {
        self.get().len
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.get().len == 0
    }
}

/// Convert a host length to the native `int` length parameter
pub fn content_length(len: usize) -> Result<c_int> {
    c_int::try_from(len).map_err(|_| Error::ContentTooLarge { len })
}

/// Host-owned NUL-terminated copy of a name, path or language argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    inner: CString,
}

impl TextBuffer {
    /// Copy `text` into a NUL-terminated buffer.
    ///
    /// `argument` names the parameter in the error raised when `text`
    /// contains a NUL byte.
    pub fn new(argument: &'static str, text: &str) -> Result<Self> {
        CString::new(text)
            .map(|inner| Self { inner })
            .map_err(|e| Error::InteriorNul {
                argument,
                position: e.nul_position(),
            })
    }

    /// Borrow the buffer for a native call
    pub fn view(&self) -> Borrowed<'_, TextView> {
        TextView::borrow(&self.inner)
    }

    /// The buffer as a C string
    pub fn as_c_str(&self) -> &CStr {
        &self.inner
    }
}
