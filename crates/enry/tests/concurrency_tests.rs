//! Queries from many threads share one handle

mod support;

use std::thread;

use enry_stub::Ledger;
use support::install_stub;

#[test]
fn test_concurrent_queries() {
    install_stub();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let before = Ledger::snapshot();
                for _ in 0..500 {
                    let (name, expected) = if i % 2 == 0 {
                        ("main.go", "Go")
                    } else {
                        ("main.rs", "Rust")
                    };
                    assert_eq!(enry::get_language(name, b"").unwrap(), expected);
                    let langs = enry::get_languages_by_extension("x.pl", b"", Some(&["Perl"])).unwrap();
                    assert_eq!(langs, vec!["Perl"]);
                }
                Ledger::snapshot().since(&before)
            })
        })
        .collect();

    for handle in handles {
        let delta = handle.join().unwrap();
        assert_eq!(delta.calls, 1000);
        assert_eq!(delta.live_strings(), 0);
        assert_eq!(delta.live_arrays(), 0);
    }
}
