//! Content and text cross the boundary unchanged

mod support;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use enry::Enry;
use enry_stub::{last_content, Ledger};
use proptest::prelude::*;
use support::stub;

/// Hands back a fresh copy of its argument, released through `FreeCString`
unsafe extern "C" fn echo(text: *mut c_char) -> *mut c_char {
    match CString::new(CStr::from_ptr(text).to_bytes()) {
        Ok(copy) => copy.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

#[test]
fn test_multibyte_text_comes_back_unchanged() {
    let mut symbols = enry_stub::symbols();
    symbols.get_color = echo;
    let enry = Enry::from_symbols(symbols);

    for text in ["", "Ĉ++ 日本語", "Common Lisp", "emoji 🦀"] {
        assert_eq!(enry.color(text).unwrap(), text);
    }
}

#[test]
fn test_embedded_nul_survives() {
    let enry = stub();
    let content = b"#!/bin/sh\0\0echo \0done".to_vec();
    enry.languages("run", &content).unwrap();
    assert_eq!(last_content(), Some(content));
}

#[test]
fn test_empty_content() {
    let enry = stub();
    assert!(!enry.is_binary(b"").unwrap());
    assert_eq!(last_content(), Some(Vec::new()));
}

proptest! {
    #[test]
    fn prop_content_round_trips(content in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let enry = stub();
        enry.is_binary(&content).unwrap();
        prop_assert_eq!(last_content(), Some(content));
    }

    #[test]
    fn prop_text_round_trips(text in "[^\\x00]{0,48}") {
        let mut symbols = enry_stub::symbols();
        symbols.get_color = echo;
        let enry = Enry::from_symbols(symbols);

        let before = Ledger::snapshot();
        let out = enry.color(&text).unwrap();
        let delta = Ledger::snapshot().since(&before);

        prop_assert_eq!(out, text);
        prop_assert_eq!(delta.strings_freed, 1);
    }
}
