//! The `dump` command: print the generated header and source per class.

use std::path::Path;

use mri_codegen::{generate_batch, BindingConfig};
use mric::load_descriptors;

use super::fail;

pub fn dump_file(path: &str, config: &BindingConfig) {
    let classes = load_descriptors(Path::new(path)).unwrap_or_else(|e| fail(&e));

    for binding in generate_batch(&classes, config) {
        println!("==================== {} ====================", binding.header_file());
        print!("{}", binding.header);
        println!("==================== {} ====================", binding.source_file());
        print!("{}", binding.source);
    }
    println!("==================== end ====================");
}
