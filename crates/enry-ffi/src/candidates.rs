//! Candidate-list arguments for the filtered `GetLanguagesBy*` queries

use std::ffi::{CStr, CString};
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::ptr;

use crate::error::{Error, Result};
use crate::types::TextView;

/// A caller's candidate filter, prepared for the native call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidates {
    /// No filter: pass a null array and let the library consider everything
    Unfiltered,
    /// An explicitly empty filter. The answer is always empty, and the
    /// library must not be called because it reads an empty array as
    /// "no filter".
    Nothing,
    /// Restrict the answer to these names
    Only(CandidateNames),
}

impl Candidates {
    /// Validate and copy a host filter. Fails on the first name that holds
    /// a NUL byte, before anything reaches the native side.
    pub fn prepare(filter: Option<&[&str]>) -> Result<Self> {
        match filter {
            None => Ok(Candidates::Unfiltered),
            Some([]) => Ok(Candidates::Nothing),
            Some(names) => CandidateNames::new(names).map(Candidates::Only),
        }
    }
}

/// NUL-terminated host copies of candidate names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNames {
    names: Vec<CString>,
}

impl CandidateNames {
    fn new(names: &[&str]) -> Result<Self> {
        let names = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                CString::new(*name).map_err(|_| Error::InvalidCandidate {
                    index,
                    name: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { names })
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no names
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Build the pointer array for one call
    pub fn list(&self) -> CandidateList<'_> {
        let mut pointers: Vec<*mut c_char> = Vec::with_capacity(self.names.len() + 1);
        pointers.extend(
            self.names
                .iter()
                .map(|name| TextView::borrow(name).as_ptr()),
        );
        pointers.push(ptr::null_mut());
        CandidateList {
            pointers,
            _names: PhantomData,
        }
    }
}

/// A NUL-terminated `char**` over borrowed [`CandidateNames`]
#[derive(Debug)]
pub struct CandidateList<'a> {
    pointers: Vec<*mut c_char>,
    _names: PhantomData<&'a CStr>,
}

impl CandidateList<'_> {
    /// Base of the array, in the shape the ABI declares. The native side
    /// only reads through it.
    pub fn as_ptr(&self) -> *mut *mut c_char {
        self.pointers.as_ptr() as *mut *mut c_char
    }

    /// Number of names, excluding the terminator
    pub fn len(&self) -> usize {
        self.pointers.len() - 1
    }

    /// Whether the list holds only the terminator
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_way_filter() {
        assert_eq!(Candidates::prepare(None).unwrap(), Candidates::Unfiltered);
        assert_eq!(Candidates::prepare(Some(&[])).unwrap(), Candidates::Nothing);
        match Candidates::prepare(Some(&["Go", "Rust"])).unwrap() {
            Candidates::Only(names) => assert_eq!(names.len(), 2),
            other => panic!("unexpected filter: {other:?}"),
        }
    }

    #[test]
    fn test_list_is_nul_terminated() {
        let Candidates::Only(names) = Candidates::prepare(Some(&["C", "C++"])).unwrap() else {
            panic!("expected names");
        };
        let list = names.list();
        assert_eq!(list.len(), 2);

        let read: Vec<String> = unsafe {
            let base = list.as_ptr();
            let mut out = Vec::new();
            let mut i = 0;
            while !(*base.add(i)).is_null() {
                out.push(CStr::from_ptr(*base.add(i)).to_string_lossy().into_owned());
                i += 1;
            }
            out
        };
        assert_eq!(read, vec!["C", "C++"]);
    }

    #[test]
    fn test_nul_in_candidate_fails_fast() {
        let err = Candidates::prepare(Some(&["Go", "Py\0thon"])).unwrap_err();
        match err {
            Error::InvalidCandidate { index, name } => {
                assert_eq!(index, 1);
                assert_eq!(name, "Py\0thon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
