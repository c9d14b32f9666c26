//! The `gen` command: validate a declaration file and write the bindings.

use std::path::Path;

use mri_codegen::{generate_batch, BindingConfig};
use mric::{load_descriptors, write_bindings};

use super::fail;

pub fn gen_file(path: &str, out_dir: &Path, config: &BindingConfig) {
    let classes = load_descriptors(Path::new(path)).unwrap_or_else(|e| fail(&e));
    let bindings = generate_batch(&classes, config);
    let written = write_bindings(&bindings, out_dir).unwrap_or_else(|e| fail(&e));

    for file in &written {
        println!("  wrote {}", file.display());
    }
    println!(
        "OK: {path} ({} classes, {} files)",
        bindings.len(),
        written.len()
    );
}
