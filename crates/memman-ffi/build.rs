//! Regenerates `include/memman.h` from the crate's exported items.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let header = crate_dir.join("include").join("memman.h");

    let config = match cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(config) => config,
        Err(e) => panic!("memman-ffi: cannot read cbindgen.toml: {e}"),
    };
    if let Some(dir) = header.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            panic!("memman-ffi: cannot create {}: {e}", dir.display());
        }
    }

    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            bindings.write_to_file(&header);
        }
        Err(e) => panic!("memman-ffi: header generation failed: {e}"),
    }
}
