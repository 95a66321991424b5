//! Three-way candidate filter semantics

mod support;

use enry_stub::{last_candidates, Ledger};
use support::{stub, sorted};

#[test]
fn test_none_is_unfiltered() {
    let enry = stub();
    let langs = enry.languages_by_extension("view.h", b"", None).unwrap();
    assert_eq!(sorted(langs), vec!["C", "C++", "Objective-C"]);
    assert_eq!(last_candidates(), None);
}

#[test]
fn test_empty_filter_skips_native_call() {
    let enry = stub();
    let before = Ledger::snapshot();

    let langs = enry.languages_by_extension("view.h", b"", Some(&[])).unwrap();

    assert!(langs.is_empty());
    let delta = Ledger::snapshot().since(&before);
    assert_eq!(delta.calls, 0);
    assert_eq!(delta.arrays_allocated, 0);
}

#[test]
fn test_filter_restricts_answer() {
    let enry = stub();
    let langs = enry
        .languages_by_extension("view.h", b"", Some(&["C", "Objective-C"]))
        .unwrap();
    assert_eq!(sorted(langs), vec!["C", "Objective-C"]);
    assert_eq!(
        last_candidates(),
        Some(vec!["C".to_string(), "Objective-C".to_string()])
    );
}

#[test]
fn test_single_candidate_against_ambiguous_file() {
    let enry = stub();
    let langs = enry.languages_by_extension("solver.m", b"", Some(&["Go"])).unwrap();
    assert!(langs.is_empty() || langs == vec!["Go"]);

    let langs = enry.languages_by_extension("solver.m", b"", Some(&["MATLAB"])).unwrap();
    assert_eq!(langs, vec!["MATLAB"]);
}

#[test]
fn test_nul_in_candidate_fails_before_native_call() {
    let enry = stub();
    let before = Ledger::snapshot();

    let err = enry
        .languages_by_content("x.pl", b"use strict;", Some(&["Perl", "Pro\0log"]))
        .unwrap_err();

    assert!(matches!(err, enry::Error::InvalidCandidate { index: 1, .. }));
    assert_eq!(Ledger::snapshot().since(&before).calls, 0);
}

#[test]
fn test_every_filtered_query_honors_empty_filter() {
    let enry = stub();
    let before = Ledger::snapshot();
    let content: &[u8] = b"#!/usr/bin/env python\n# vim: ft=python\n-*- mode: python -*-";

    assert!(enry.languages_by_content("a.py", content, Some(&[])).unwrap().is_empty());
    assert!(enry.languages_by_emacs_modeline("a.py", content, Some(&[])).unwrap().is_empty());
    assert!(enry.languages_by_extension("a.py", content, Some(&[])).unwrap().is_empty());
    assert!(enry.languages_by_filename("a.py", content, Some(&[])).unwrap().is_empty());
    assert!(enry.languages_by_modeline("a.py", content, Some(&[])).unwrap().is_empty());
    assert!(enry.languages_by_shebang("a.py", content, Some(&[])).unwrap().is_empty());
    assert!(enry.languages_by_vim_modeline("a.py", content, Some(&[])).unwrap().is_empty());

    assert_eq!(Ledger::snapshot().since(&before).calls, 0);
}
