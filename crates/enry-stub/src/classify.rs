//! Toy classification tables behind the loopback exports
//!
//! Just enough detection to give each entry point deterministic, checkable
//! answers: a handful of extensions, file names, interpreters and modeline
//! aliases. Ambiguous extensions (`.h`, `.m`, `.pl`) return several names.

fn extension(filename: &str) -> Option<String> {
    let base = filename.rsplit('/').next().unwrap_or(filename);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

fn filter(langs: Vec<&'static str>, candidates: &[String]) -> Vec<&'static str> {
    // an empty candidate list means "no filtering", as in go-enry
    if candidates.is_empty() {
        return langs;
    }
    langs
        .into_iter()
        .filter(|lang| candidates.iter().any(|c| c.as_str() == *lang))
        .collect()
}

fn alias(name: &str) -> Option<&'static str> {
    let lang = match name.to_ascii_lowercase().as_str() {
        "javascript" | "js" => "JavaScript",
        "python" | "py" => "Python",
        "c++" | "cpp" => "C++",
        "c" => "C",
        "ruby" | "rb" => "Ruby",
        "go" | "golang" => "Go",
        "sh" | "bash" | "shell" => "Shell",
        "rust" | "rs" => "Rust",
        "lisp" | "common-lisp" => "Common Lisp",
        "php" => "PHP",
        _ => return None,
    };
    Some(lang)
}

pub fn by_extension(filename: &str, candidates: &[String]) -> Vec<&'static str> {
    let langs = match extension(filename).as_deref() {
        Some("py") | Some("pyi") | Some("pyw") => vec!["Python"],
        Some("go") => vec!["Go"],
        Some("rb") => vec!["Ruby"],
        Some("rs") => vec!["Rust"],
        Some("hs") => vec!["Haskell"],
        Some("sh") | Some("bash") => vec!["Shell"],
        Some("js") => vec!["JavaScript"],
        Some("lisp") => vec!["Common Lisp"],
        Some("php") => vec!["PHP"],
        Some("xml") => vec!["XML"],
        Some("md") => vec!["Markdown"],
        Some("c") => vec!["C"],
        Some("cpp") | Some("cc") => vec!["C++"],
        Some("h") => vec!["C", "C++", "Objective-C"],
        Some("m") => vec!["MATLAB", "Objective-C"],
        Some("pl") => vec!["Perl", "Prolog"],
        Some("yml") | Some("yaml") => vec!["YAML"],
        Some("toml") => vec!["TOML"],
        Some("json") => vec!["JSON"],
        _ => Vec::new(),
    };
    filter(langs, candidates)
}

pub fn by_filename(filename: &str, candidates: &[String]) -> Vec<&'static str> {
    let langs = match basename(filename) {
        "pom.xml" => vec!["Maven POM"],
        "Makefile" | "GNUmakefile" => vec!["Makefile"],
        "Dockerfile" => vec!["Dockerfile"],
        "Gemfile" | "Rakefile" => vec!["Ruby"],
        ".bashrc" | ".zshrc" => vec!["Shell"],
        _ => Vec::new(),
    };
    filter(langs, candidates)
}

pub fn by_shebang(content: &[u8], candidates: &[String]) -> Vec<&'static str> {
    let first_line = content.split(|b| *b == b'\n').next().unwrap_or_default();
    let Some(rest) = first_line.strip_prefix(b"#!") else {
        return Vec::new();
    };
    let line = String::from_utf8_lossy(rest);
    let mut tokens = line.split_whitespace();
    let Some(program) = tokens.next() else {
        return Vec::new();
    };
    let mut interpreter = basename(program);
    if interpreter == "env" {
        match tokens.find(|t| !t.starts_with('-')) {
            Some(t) => interpreter = t,
            None => return Vec::new(),
        }
    }
    let interpreter = interpreter.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    let langs = match interpreter {
        "bash" | "sh" | "zsh" | "ksh" => vec!["Shell"],
        "python" => vec!["Python"],
        "ruby" => vec!["Ruby"],
        "node" => vec!["JavaScript"],
        "perl" => vec!["Perl"],
        "gorun" => vec!["Go"],
        _ => Vec::new(),
    };
    filter(langs, candidates)
}

pub fn by_vim_modeline(content: &[u8], candidates: &[String]) -> Vec<&'static str> {
    let text = String::from_utf8_lossy(content);
    let found = text.lines().find_map(|line| {
        let start = line.find("vim:").or_else(|| line.find("vi:"))?;
        let settings = &line[start..];
        ["filetype=", "ft=", "syntax="].iter().find_map(|key| {
            let at = settings.find(key)? + key.len();
            let value: String = settings[at..]
                .chars()
                .take_while(|c| !c.is_whitespace() && *c != ':')
                .collect();
            alias(&value)
        })
    });
    filter(found.into_iter().collect(), candidates)
}

pub fn by_emacs_modeline(content: &[u8], candidates: &[String]) -> Vec<&'static str> {
    let text = String::from_utf8_lossy(content);
    let found = text.lines().find_map(|line| {
        let start = line.find("-*-")? + 3;
        let end = start + line[start..].find("-*-")?;
        let body = line[start..end].trim();
        let mode = match body.split(';').find_map(|kv| kv.trim().strip_prefix("mode:")) {
            Some(mode) => mode.trim(),
            None if !body.contains(':') => body,
            None => return None,
        };
        alias(mode)
    });
    filter(found.into_iter().collect(), candidates)
}

pub fn by_modeline(content: &[u8], candidates: &[String]) -> Vec<&'static str> {
    let emacs = by_emacs_modeline(content, candidates);
    if !emacs.is_empty() {
        return emacs;
    }
    by_vim_modeline(content, candidates)
}

pub fn by_content(filename: &str, content: &[u8], candidates: &[String]) -> Vec<&'static str> {
    let text = String::from_utf8_lossy(content);
    let langs = match extension(filename).as_deref() {
        Some("h") if text.contains("@interface") || text.contains("#import") => vec!["Objective-C"],
        Some("h") if text.contains("template") || text.contains("namespace") => vec!["C++"],
        Some("m") if text.contains("@interface") || text.contains("#import") => vec!["Objective-C"],
        Some("m") if text.contains("function") => vec!["MATLAB"],
        Some("pl") if text.contains(":-") => vec!["Prolog"],
        Some("pl") if text.contains("use strict") => vec!["Perl"],
        Some("php") if text.contains("<?php") => vec!["PHP"],
        _ => Vec::new(),
    };
    filter(langs, candidates)
}

/// Strategies in the order go-enry applies them; an ambiguous answer
/// narrows the candidates for the next strategy
pub fn languages(filename: &str, content: &[u8]) -> Vec<&'static str> {
    let mut candidates: Vec<String> = Vec::new();
    let strategies: [&dyn Fn(&[String]) -> Vec<&'static str>; 5] = [
        &|c| by_modeline(content, c),
        &|c| by_filename(filename, c),
        &|c| by_shebang(content, c),
        &|c| by_extension(filename, c),
        &|c| by_content(filename, content, c),
    ];
    for strategy in strategies {
        let langs = strategy(candidates.as_slice());
        match langs.len() {
            0 => continue,
            1 => return langs,
            _ => candidates = langs.iter().map(|l| l.to_string()).collect(),
        }
    }
    candidates
        .into_iter()
        .filter_map(|c| KNOWN.iter().copied().find(|k| *k == c))
        .collect()
}

const KNOWN: &[&str] = &[
    "C", "C++", "Objective-C", "MATLAB", "Perl", "Prolog", "Python", "Go", "Ruby", "Rust",
    "Haskell", "Shell", "JavaScript", "Common Lisp", "PHP", "XML", "Markdown", "YAML", "TOML",
    "JSON", "Maven POM", "Makefile", "Dockerfile",
];

pub fn language(filename: &str, content: &[u8]) -> &'static str {
    languages(filename, content).first().copied().unwrap_or("")
}

pub fn mime_type(path: &str, language: &str) -> &'static str {
    match language {
        "Ruby" => "text/x-ruby",
        "Python" => "text/x-python",
        "Go" => "text/x-go",
        "JavaScript" => "text/javascript",
        "Shell" => "text/x-sh",
        "C" => "text/x-csrc",
        "C++" => "text/x-c++src",
        "Rust" => "text/x-rustsrc",
        _ if matches!(extension(path).as_deref(), Some("png") | Some("jpg")) => "image/png",
        _ => "text/plain",
    }
}

pub fn color(language: &str) -> &'static str {
    match language {
        "Go" => "#00ADD8",
        "Python" => "#3572A5",
        "Ruby" => "#701516",
        "Rust" => "#dea584",
        "Shell" => "#89e051",
        "JavaScript" => "#f1e05a",
        "C" => "#555555",
        "C++" => "#f34b7d",
        _ => "",
    }
}

pub fn language_type(language: &str) -> &'static str {
    match language {
        "XML" | "JSON" | "YAML" | "TOML" | "Maven POM" => "Data",
        "Markdown" => "Prose",
        "" => "Unknown",
        l if KNOWN.contains(&l) => "Programming",
        _ => "Unknown",
    }
}

pub fn extensions(language: &str) -> Vec<&'static str> {
    match language {
        "Python" => vec![
            ".py", ".cgi", ".fcgi", ".gyp", ".gypi", ".lmi", ".py3", ".pyde", ".pyi", ".pyp",
            ".pyt", ".pyw", ".rpy", ".spec", ".tac", ".wsgi", ".xpy",
        ],
        "Go" => vec![".go"],
        "Rust" => vec![".rs", ".rs.in"],
        "Ruby" => vec![".rb", ".builder", ".gemspec", ".rake"],
        "Shell" => vec![".sh", ".bash", ".zsh"],
        _ => Vec::new(),
    }
}

pub fn is_binary(content: &[u8]) -> bool {
    content.iter().take(8000).any(|b| *b == 0)
}

pub fn is_vendor(path: &str) -> bool {
    ["vendor/", "node_modules/", "third_party/"]
        .iter()
        .any(|dir| path.starts_with(dir) || path.contains(&format!("/{}", dir)))
}

pub fn is_documentation(path: &str) -> bool {
    ["docs/", "documentation/", "doc/"]
        .iter()
        .any(|dir| path.starts_with(dir) || path.contains(&format!("/{}", dir)))
}

pub fn is_dot_file(path: &str) -> bool {
    basename(path).starts_with('.')
}

pub fn is_configuration(path: &str) -> bool {
    matches!(
        extension(path).as_deref(),
        Some("yml") | Some("yaml") | Some("toml") | Some("ini") | Some("json") | Some("cfg")
    )
}

pub fn is_image(path: &str) -> bool {
    matches!(
        extension(path).as_deref(),
        Some("png") | Some("jpg") | Some("jpeg") | Some("gif") | Some("svg")
    )
}

pub fn is_test(path: &str) -> bool {
    let name = basename(path);
    name.contains("_test.") || name.starts_with("test_") || path.contains("/tests/")
}

pub fn is_generated(path: &str, content: &[u8]) -> bool {
    path.ends_with(".pb.go")
        || path.ends_with(".min.js")
        || String::from_utf8_lossy(content).contains("Code generated")
}
