//! Query surface through the process-wide handle

mod support;

use enry::{Guess, LanguageType};
use support::{install_stub, sorted};

#[test]
fn test_get_language() {
    install_stub();
    assert_eq!(enry::get_language("test.py", b"import os").unwrap(), "Python");
    assert_eq!(enry::get_language("", b"#!/usr/bin/bash").unwrap(), "Shell");
    assert_eq!(enry::get_language("README", b"").unwrap(), "");
}

#[test]
fn test_get_language_by_extension() {
    install_stub();
    let guess = enry::get_language_by_extension("test.py").unwrap();
    assert_eq!(guess.language, "Python");
    assert!(guess.confident);

    assert_eq!(enry::get_language_by_extension("noext").unwrap(), Guess::default());
}

#[test]
fn test_get_language_by_filename() {
    install_stub();
    assert_eq!(enry::get_language_by_filename("pom.xml").unwrap().language, "Maven POM");
}

#[test]
fn test_get_language_by_content() {
    install_stub();
    let guess = enry::get_language_by_content("test.php", b"<?php $foo = bar();").unwrap();
    assert_eq!(guess.language, "PHP");
}

#[test]
fn test_modeline_queries() {
    install_stub();
    let emacs = b"// -*- font:bar;mode:c++ -*-\ntemplate <typename X> class { X i; };";
    assert_eq!(enry::get_language_by_emacs_modeline(emacs).unwrap().language, "C++");

    let vim = b"# vim: noexpandtab: ft=javascript";
    assert_eq!(enry::get_language_by_vim_modeline(vim).unwrap().language, "JavaScript");
    assert_eq!(enry::get_language_by_modeline(vim).unwrap().language, "JavaScript");
}

#[test]
fn test_get_language_by_shebang() {
    install_stub();
    let guess = enry::get_language_by_shebang(b"#!/usr/bin/python3\nprint()").unwrap();
    assert_eq!(guess.language, "Python");
    assert!(!enry::get_language_by_shebang(b"import os").unwrap().confident);
}

#[test]
fn test_metadata_queries() {
    install_stub();
    assert_eq!(enry::get_mime_type("test.rb", "Ruby").unwrap(), "text/x-ruby");
    assert_eq!(enry::get_color("Go").unwrap(), "#00ADD8");
    assert_eq!(enry::get_color("NotALanguage").unwrap(), "");

    let kind = enry::get_language_type("Python").unwrap();
    assert_eq!(LanguageType::from(kind.as_str()), LanguageType::Programming);
    let kind = enry::get_language_type("Markdown").unwrap();
    assert_eq!(LanguageType::from(kind.as_str()), LanguageType::Prose);
}

#[test]
fn test_predicates() {
    install_stub();
    assert!(enry::is_binary(b"\x7fELF\0\0\0").unwrap());
    assert!(!enry::is_binary(b"println!('Hello world!\n');").unwrap());
    assert!(enry::is_configuration("configuration.yml").unwrap());
    assert!(enry::is_documentation("docs/").unwrap());
    assert!(enry::is_documentation("sss/documentation/").unwrap());
    assert!(!enry::is_documentation("test/").unwrap());
    assert!(enry::is_dot_file(".env").unwrap());
    assert!(!enry::is_dot_file("something.py").unwrap());
    assert!(enry::is_image("shrek-picture.png").unwrap());
    assert!(!enry::is_image("openjdk-1000.parquet").unwrap());
    assert!(enry::is_vendor("vendor/golang.org/x/sys/unix.go").unwrap());
    assert!(enry::is_test("pkg/parser_test.go").unwrap());
    assert!(enry::is_generated("api.pb.go", b"").unwrap());
    assert!(!enry::is_generated("main.go", b"package main").unwrap());
}

#[test]
fn test_get_languages() {
    install_stub();
    assert_eq!(enry::get_languages("test.py", b"import os").unwrap(), vec!["Python"]);
    assert_eq!(
        sorted(enry::get_languages("view.h", b"").unwrap()),
        vec!["C", "C++", "Objective-C"]
    );
    assert!(enry::get_languages("README", b"").unwrap().is_empty());
}

#[test]
fn test_get_language_extensions() {
    install_stub();
    let extensions = enry::get_language_extensions("Python").unwrap();
    assert_eq!(extensions.first().map(String::as_str), Some(".py"));
    assert!(extensions.iter().any(|e| e == ".pyi"));
    assert!(enry::get_language_extensions("NotALanguage").unwrap().is_empty());
}

#[test]
fn test_plural_strategies_without_filter() {
    install_stub();
    assert_eq!(
        enry::get_languages_by_filename("Makefile", b"", None).unwrap(),
        vec!["Makefile"]
    );
    assert_eq!(
        enry::get_languages_by_shebang("", b"#!/usr/bin/env node", None).unwrap(),
        vec!["JavaScript"]
    );
    assert_eq!(
        enry::get_languages_by_modeline("", b"# vim: ft=python", None).unwrap(),
        vec!["Python"]
    );
    assert_eq!(
        enry::get_languages_by_vim_modeline("", b"# vim: ft=python", None).unwrap(),
        vec!["Python"]
    );
    assert_eq!(
        enry::get_languages_by_emacs_modeline("", b"-*- mode: ruby -*-", None).unwrap(),
        vec!["Ruby"]
    );
    assert_eq!(
        enry::get_languages_by_content("x.m", b"#import <Foundation/Foundation.h>", None).unwrap(),
        vec!["Objective-C"]
    );
}

#[test]
fn test_interior_nul_in_name_is_rejected() {
    install_stub();
    let err = enry::get_language("te\0st.py", b"").unwrap_err();
    assert!(matches!(err, enry::Error::InteriorNul { argument: "filename", position: 2 }));
}

#[test]
fn test_results_serialize() {
    install_stub();
    let guess = enry::get_language_by_extension("main.go").unwrap();
    assert_eq!(
        serde_json::to_value(&guess).unwrap(),
        serde_json::json!({"language": "Go", "confident": true})
    );

    let kind = LanguageType::from(enry::get_language_type("YAML").unwrap().as_str());
    assert_eq!(serde_json::to_string(&kind).unwrap(), r#""Data""#);
}
