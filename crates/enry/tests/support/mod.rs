//! Shared setup: route the process-wide handle to the in-process stub

#![allow(dead_code)]

use enry::Enry;

pub fn stub() -> Enry {
    Enry::from_symbols(enry_stub::symbols())
}

/// Install the stub unless another test in this binary already did
pub fn install_stub() {
    enry::install(stub());
    assert!(enry::library().is_ok());
}

pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}
