//! ABI-level records and host-side value types
//!
//! The `#[repr(C)]` records here are views only. None of them owns memory:
//! host buffers are reached through [`Borrowed`], native buffers through
//! [`crate::memory::Owned`].

use std::marker::PhantomData;
use std::os::raw::c_char;

use serde::{Deserialize, Serialize};

/// Fat pointer over a contiguous byte buffer
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ByteSpan {
    /// Pointer to the first byte; never null, even for empty spans
    pub data: *const u8,
    /// Number of readable bytes
    pub len: usize,
    /// Capacity of the backing buffer as seen by the native side
    pub cap: usize,
}

/// Pointer + length record over NUL-terminated text
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct TextView {
    /// Pointer to the first byte; a NUL byte follows the last one
    pub data: *const c_char,
    /// Length in bytes, excluding the terminator
    pub len: usize,
}

/// Counted array of native strings, `{data, len, cap}`
///
/// Unlike a NUL-terminated array, entries may be null; each null entry
/// stands for an empty string.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StringSlice {
    /// Base of the pointer array, allocated by the native library
    pub data: *mut *mut c_char,
    /// Number of entries
    pub len: isize,
    /// Allocated entries
    pub cap: isize,
}

/// A view into host memory that must not outlive its backing buffer.
///
/// There is no way to release a `Borrowed` value: the host buffer it points
/// into is freed by its own owner once `'a` ends, which the borrow checker
/// guarantees happens after every native call that received the view.
#[derive(Debug, Clone, Copy)]
pub struct Borrowed<'a, V> {
    view: V,
    _owner: PhantomData<&'a [u8]>,
}

impl<'a, V: Copy> Borrowed<'a, V> {
    /// Tie a raw view to the lifetime of its backing buffer
    ///
    /// # Safety
    /// Every pointer inside `view` must stay valid for reads during `'a`.
    pub(crate) unsafe fn new(view: V) -> Self {
        Self {
            view,
            _owner: PhantomData,
        }
    }

    /// The raw record, for passing by value across the ABI
    pub fn get(&self) -> V {
        self.view
    }
}

/// A single-answer detection result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Guess {
    /// Detected language, empty when nothing matched
    pub language: String,
    /// Whether the strategy settled on a single language
    pub confident: bool,
}

impl Guess {
    /// Build a guess from a bare name. The native ABI does not report
    /// confidence, so any non-empty name counts as confident.
    pub fn from_language(language: String) -> Self {
        let confident = !language.is_empty();
        Self {
            language,
            confident,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_confidence_follows_name() {
        assert!(Guess::from_language("Python".to_string()).confident);
        assert_eq!(Guess::from_language(String::new()), Guess::default());
    }

    #[test]
    fn test_guess_serialization() {
        let guess = Guess::from_language("Maven POM".to_string());
        let json = serde_json::to_value(&guess).unwrap();
        assert_eq!(json, serde_json::json!({"language": "Maven POM", "confident": true}));

        let back: Guess = serde_json::from_value(json).unwrap();
        assert_eq!(back, guess);
    }

    #[test]
    fn test_abi_record_layout() {
        use std::mem::size_of;
        assert_eq!(size_of::<ByteSpan>(), 3 * size_of::<usize>());
        assert_eq!(size_of::<TextView>(), 2 * size_of::<usize>());
        assert_eq!(size_of::<StringSlice>(), 3 * size_of::<usize>());
    }
}
