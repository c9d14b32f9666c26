//! The `check` command: validate a declaration file without generating.

use std::path::Path;

use mri_ir::ClassDescriptor;
use mric::load_descriptors;

use super::fail;

pub fn check_file(path: &str) {
    let classes = load_descriptors(Path::new(path)).unwrap_or_else(|e| fail(&e));

    for class in &classes {
        println!("  {}", summarize(class));
    }
    println!("OK: {path} ({} classes)", classes.len());
}

fn summarize(class: &ClassDescriptor) -> String {
    let kind = if class.is_module() { "module" } else { "class" };
    let fallbacks = class.fallback_count();
    let mut line = format!(
        "{kind} {}: {} attributes, {} methods, {} implementations",
        class.name(),
        class.attributes().len(),
        class.methods().len(),
        class.implementations().len()
    );
    if fallbacks > 0 {
        line.push_str(&format!(", {fallbacks} type(s) defaulted to integer"));
    }
    line
}

