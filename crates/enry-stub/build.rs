use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let output_dir = PathBuf::from(&crate_dir).join("include");

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        println!("cargo:warning=could not create {}: {}", output_dir.display(), e);
        return;
    }

    // Header for C callers of the loopback library
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("ENRY_H")
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(output_dir.join("enry.h"));
        }
        Err(e) => println!("cargo:warning=unable to generate enry.h: {}", e),
    }

    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/exports.rs");
}
