//! Memory management for values handed across the FFI boundary
//!
//! Strings and string arrays are allocated here and must come back through
//! `FreeCString` / `FreeStringArray`. Every allocation and release is
//! counted in a per-thread [`Ledger`], so a caller can check that each
//! query released exactly what it received.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::panic;
use std::ptr;

use tracing::error;

thread_local! {
    static LEDGER: Cell<Ledger> = const { Cell::new(Ledger::ZERO) };
    static LAST_CONTENT: RefCell<Option<Vec<u8>>> = const { RefCell::new(None) };
    static LAST_CANDIDATES: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Allocation counters for the current thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ledger {
    /// Strings handed out, including those inside arrays
    pub strings_allocated: usize,
    /// Strings released, including those released with their array
    pub strings_freed: usize,
    /// Arrays handed out
    pub arrays_allocated: usize,
    /// Arrays released
    pub arrays_freed: usize,
    /// Calls into query entry points
    pub calls: usize,
}

impl Ledger {
    const ZERO: Ledger = Ledger {
        strings_allocated: 0,
        strings_freed: 0,
        arrays_allocated: 0,
        arrays_freed: 0,
        calls: 0,
    };

    /// Current counters for this thread
    pub fn snapshot() -> Ledger {
        LEDGER.with(Cell::get)
    }

    /// Counter deltas since `earlier`
    pub fn since(&self, earlier: &Ledger) -> Ledger {
        Ledger {
            strings_allocated: self.strings_allocated - earlier.strings_allocated,
            strings_freed: self.strings_freed - earlier.strings_freed,
            arrays_allocated: self.arrays_allocated - earlier.arrays_allocated,
            arrays_freed: self.arrays_freed - earlier.arrays_freed,
            calls: self.calls - earlier.calls,
        }
    }

    /// Strings not yet released
    pub fn live_strings(&self) -> isize {
        self.strings_allocated as isize - self.strings_freed as isize
    }

    /// Arrays not yet released
    pub fn live_arrays(&self) -> isize {
        self.arrays_allocated as isize - self.arrays_freed as isize
    }
}

fn record(update: impl FnOnce(&mut Ledger)) {
    LEDGER.with(|cell| {
        let mut ledger = cell.get();
        update(&mut ledger);
        cell.set(ledger);
    });
}

pub(crate) fn record_call() {
    record(|l| l.calls += 1);
}

/// Content bytes seen by the most recent content-taking call on this thread
pub fn last_content() -> Option<Vec<u8>> {
    LAST_CONTENT.with(|c| c.borrow().clone())
}

/// Candidate list seen by the most recent filtered call on this thread;
/// `None` when the caller passed a null array
pub fn last_candidates() -> Option<Vec<String>> {
    LAST_CANDIDATES.with(|c| c.borrow().clone())
}

/// Allocate a new string for FFI return
///
/// The caller must free this string using `FreeCString`. Text with an
/// interior NUL is truncated at the NUL, as `C.CString` would read it back.
pub(crate) fn allocate_string(s: &str) -> *mut c_char {
    let bytes = s.split('\0').next().unwrap_or_default();
    match CString::new(bytes) {
        Ok(c_str) => {
            record(|l| l.strings_allocated += 1);
            c_str.into_raw()
        }
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string allocated by [`allocate_string`]
///
/// # Safety
/// The pointer must have been allocated by `allocate_string` and not freed.
pub(crate) unsafe fn release_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }

    // Reconstruct the CString and let it drop
    drop(CString::from_raw(s));
    record(|l| l.strings_freed += 1);
}

/// Allocate a NUL-terminated array of fresh strings
///
/// The caller must free the array with `FreeStringArray`, which also frees
/// every element.
pub(crate) fn allocate_array<S: AsRef<str>>(items: &[S]) -> *mut *mut c_char {
    let mut entries: Vec<*mut c_char> = items.iter().map(|s| allocate_string(s.as_ref())).collect();
    entries.push(ptr::null_mut());
    record(|l| l.arrays_allocated += 1);
    Box::into_raw(entries.into_boxed_slice()) as *mut *mut c_char
}

/// Free an array allocated by [`allocate_array`] together with its strings
///
/// # Safety
/// The pointer must have been allocated by `allocate_array` and not freed.
pub(crate) unsafe fn release_array(array: *mut *mut c_char) {
    if array.is_null() {
        return;
    }

    let mut len = 0;
    while !(*array.add(len)).is_null() {
        len += 1;
    }

    let entries = Box::from_raw(ptr::slice_from_raw_parts_mut(array, len + 1));
    for entry in entries.iter().take(len) {
        release_string(*entry);
    }
    record(|l| l.arrays_freed += 1);
}

/// Read a NUL-terminated argument; null reads as empty
///
/// # Safety
/// `s` must be null or a valid C string.
pub(crate) unsafe fn read_text(s: *const c_char) -> String {
    if s.is_null() {
        String::new()
    } else {
        CStr::from_ptr(s).to_string_lossy().into_owned()
    }
}

/// Read a pointer + length content argument and remember it
///
/// # Safety
/// When `length > 0`, `content` must point to `length` readable bytes.
pub(crate) unsafe fn read_content(content: *const c_char, length: c_int) -> Vec<u8> {
    let bytes = if content.is_null() || length <= 0 {
        Vec::new()
    } else {
        std::slice::from_raw_parts(content as *const u8, length as usize).to_vec()
    };
    LAST_CONTENT.with(|c| *c.borrow_mut() = Some(bytes.clone()));
    bytes
}

/// Read a NUL-terminated candidate array and remember it
///
/// # Safety
/// `candidates` must be null or a NUL-terminated array of C strings.
pub(crate) unsafe fn read_candidates(candidates: *const *mut c_char) -> Option<Vec<String>> {
    let names = if candidates.is_null() {
        None
    } else {
        let mut names = Vec::new();
        let mut cursor = candidates;
        while !(*cursor).is_null() {
            names.push(read_text(*cursor));
            cursor = cursor.add(1);
        }
        Some(names)
    };
    LAST_CANDIDATES.with(|c| *c.borrow_mut() = names.clone());
    names
}

/// Run an export body, turning a panic into `fallback` so it never
/// unwinds into the caller
pub(crate) fn guard<R>(fallback: R, f: impl FnOnce() -> R + panic::UnwindSafe) -> R {
    match panic::catch_unwind(f) {
        Ok(value) => value,
        Err(panic_info) => {
            error!(panic = %panic_message(&panic_info), "panic in export");
            fallback
        }
    }
}

fn panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}
