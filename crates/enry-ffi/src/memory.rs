//! Ownership of native allocations
//!
//! Values returned by the native library are adopted into [`Owned`], which
//! releases them through the matching deallocator when dropped. `Owned` is
//! neither `Clone` nor `Copy` and has no public release method, so each
//! native allocation is freed exactly once, on every exit path.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::symbols::{Deallocators, EntryPoint};
use crate::types::StringSlice;

/// A native allocation kind and the deallocator that frees it
pub trait Release {
    /// Pointee of the raw pointer the native side hands back
    type Raw;

    /// Free `ptr` with the library's deallocator for this kind
    ///
    /// # Safety
    /// `ptr` must be non-null, allocated by the library that `dealloc`
    /// belongs to, and not released before.
    unsafe fn release(dealloc: &Deallocators, ptr: *mut Self::Raw);
}

/// A `char*` allocated by the library, freed with `FreeCString`
#[derive(Debug)]
pub enum NativeString {}

/// A NUL-terminated `char**` allocated by the library, freed together with
/// every element by `FreeStringArray`
#[derive(Debug)]
pub enum NativeStringArray {}

impl Release for NativeString {
    type Raw = c_char;

    unsafe fn release(dealloc: &Deallocators, ptr: *mut c_char) {
        (dealloc.free_cstring)(ptr)
    }
}

impl Release for NativeStringArray {
    type Raw = *mut c_char;

    unsafe fn release(dealloc: &Deallocators, ptr: *mut *mut c_char) {
        (dealloc.free_string_array)(ptr)
    }
}

/// A native allocation whose release responsibility now sits with the host
pub struct Owned<'lib, K: Release> {
    ptr: NonNull<K::Raw>,
    dealloc: &'lib Deallocators,
    _kind: PhantomData<K>,
}

/// Owned `char*`
pub type OwnedCString<'lib> = Owned<'lib, NativeString>;

/// Owned NUL-terminated `char**`
pub type OwnedCStringArray<'lib> = Owned<'lib, NativeStringArray>;

impl<'lib, K: Release> Owned<'lib, K> {
    /// Take ownership of a pointer returned by the native library.
    /// Null means there is nothing to own and yields `None`.
    ///
    /// # Safety
    /// A non-null `ptr` must be a fresh heap allocation of kind `K` from the
    /// library behind `dealloc`, with no other owner.
    pub unsafe fn adopt(ptr: *mut K::Raw, dealloc: &'lib Deallocators) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            dealloc,
            _kind: PhantomData,
        })
    }

    /// The adopted pointer, still owned by `self`
    pub fn as_ptr(&self) -> *const K::Raw {
        self.ptr.as_ptr()
    }
}

impl<K: Release> Drop for Owned<'_, K> {
    fn drop(&mut self) {
        // SAFETY: `adopt` established sole ownership and drop runs once.
        unsafe { K::release(self.dealloc, self.ptr.as_ptr()) }
    }
}

impl<K: Release> std::fmt::Debug for Owned<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owned")
            .field("kind", &std::any::type_name::<K>())
            .field("ptr", &self.ptr)
            .finish()
    }
}

impl OwnedCString<'_> {
    /// Borrow the native bytes without copying
    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: adopted strings are NUL-terminated and live until drop.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }
}

impl OwnedCStringArray<'_> {
    /// Copy every entry before the NUL terminator
    pub fn to_strings(&self, entry_point: EntryPoint) -> Result<Vec<String>> {
        let mut strings = Vec::new();
        let mut cursor = self.ptr.as_ptr();
        // SAFETY: the array is NUL-terminated, so every read up to and
        // including the terminator is in bounds.
        unsafe {
            while !(*cursor).is_null() {
                strings.push(copy_c_str(CStr::from_ptr(*cursor), entry_point)?);
                cursor = cursor.add(1);
            }
        }
        Ok(strings)
    }

    /// Copy exactly `len` entries; a null entry becomes an empty string
    ///
    /// # Safety
    /// The array must hold at least `len` readable entries.
    pub unsafe fn to_strings_counted(&self, len: usize, entry_point: EntryPoint) -> Result<Vec<String>> {
        let base = self.ptr.as_ptr();
        (0..len)
            .map(|i| {
                let entry = *base.add(i);
                if entry.is_null() {
                    Ok(String::new())
                } else {
                    copy_c_str(CStr::from_ptr(entry), entry_point)
                }
            })
            .collect()
    }
}

/// How a single-string entry point hands out its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Always a fresh heap allocation, empty results included; must be freed
    Heap,
    /// Static or library-owned text; must never be freed
    Static,
}

/// Convert a single returned `char*` into a host string.
///
/// Null is an empty string and releases nothing. A non-null [`Ownership::Heap`]
/// result is copied first and then released exactly once, even when empty.
///
/// # Safety
/// `ptr` must be null or a NUL-terminated string returned by the library
/// behind `dealloc`, handed out under the given `ownership`.
pub unsafe fn take_string(
    dealloc: &Deallocators,
    ptr: *mut c_char,
    ownership: Ownership,
    entry_point: EntryPoint,
) -> Result<String> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    match ownership {
        Ownership::Heap => match OwnedCString::adopt(ptr, dealloc) {
            Some(owned) => copy_c_str(owned.as_c_str(), entry_point),
            None => Ok(String::new()),
        },
        Ownership::Static => copy_c_str(CStr::from_ptr(ptr), entry_point),
    }
}

/// Convert a returned NUL-terminated `char**` into host strings, then
/// release the array and its elements with one `FreeStringArray` call.
///
/// # Safety
/// `ptr` must be null or a fresh NUL-terminated array from the library
/// behind `dealloc`.
pub unsafe fn take_string_array(
    dealloc: &Deallocators,
    ptr: *mut *mut c_char,
    entry_point: EntryPoint,
) -> Result<Vec<String>> {
    match OwnedCStringArray::adopt(ptr, dealloc) {
        Some(array) => array.to_strings(entry_point),
        None => Ok(Vec::new()),
    }
}

/// Convert a returned counted array into host strings. Null entries become
/// empty strings and do not end the iteration. The array is released once.
///
/// No current enry entry point returns this shape; it exists for
/// counted-slice returns, where a null entry must not truncate the list.
///
/// # Safety
/// `slice.data` must be null or a fresh array of at least `slice.len`
/// entries from the library behind `dealloc`.
pub unsafe fn take_string_slice(
    dealloc: &Deallocators,
    slice: StringSlice,
    entry_point: EntryPoint,
) -> Result<Vec<String>> {
    match OwnedCStringArray::adopt(slice.data, dealloc) {
        Some(array) => array.to_strings_counted(slice.len.max(0) as usize, entry_point),
        None => Ok(Vec::new()),
    }
}

fn copy_c_str(text: &CStr, entry_point: EntryPoint) -> Result<String> {
    String::from_utf8(text.to_bytes().to_vec())
        .map_err(|source| Error::InvalidUtf8 { entry_point, source })
}
