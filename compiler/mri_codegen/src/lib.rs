//! C++ Glue Generation for MRI Bindings
//!
//! Turns validated [`ClassDescriptor`]s into the C++ sources that expose
//! native engine classes to an embedded MRI runtime:
//!
//! 1. **Header** - include guard, data-type declaration, init forward declaration
//! 2. **Definition unit** - one marshaling function per implementation, with
//!    arity dispatch for overloaded methods
//! 3. **Declaration unit** - `Init<Class>Binding`, registering the class and
//!    its members
//!
//! # Architecture
//!
//! ```text
//! ClassDescriptor + BindingConfig
//!        ↓
//!   TypeMapping        (kind → parse tag, conversions)
//!        ↓
//!   cxx emitters       (header, definition, declaration, includes)
//!        ↓
//!   GeneratedBinding   (header text + assembled source text)
//! ```
//!
//! Output is a pure function of its input: the same descriptor and config
//! always produce byte-identical text.

mod config;
mod context;
pub mod cxx;
pub mod naming;
pub mod types;

#[cfg(test)]
mod fixtures;

use mri_ir::ClassDescriptor;

pub use config::BindingConfig;
pub use context::EmitContext;
pub use naming::{file_stem, BindingNames};

/// Generated sources for one class or module.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeneratedBinding {
    pub class_name: String,
    /// `autogen_<class>_binding`; the header is `<stem>.h`, the source `<stem>.cc`.
    pub file_stem: String,
    pub header: String,
    /// `Init<Class>Binding` on its own.
    pub declaration: String,
    /// Data type, accessors and marshaling functions on their own.
    pub definition: String,
    /// Includes plus both units inside the binding namespace.
    pub source: String,
}

impl GeneratedBinding {
    pub fn header_file(&self) -> String {
        format!("{}.h", self.file_stem)
    }

    pub fn source_file(&self) -> String {
        format!("{}.cc", self.file_stem)
    }
}

/// Generate every unit for one class.
#[tracing::instrument(level = "debug", skip_all, fields(class = %class.name()))]
pub fn generate(class: &ClassDescriptor, config: &BindingConfig) -> GeneratedBinding {
    let names = BindingNames::new(class.name(), config);

    let header = cxx::emit_header(class, &names);
    let definition = cxx::emit_definition(class, &names);
    let declaration = cxx::emit_declaration(class, &names);
    let source = cxx::assemble_source(class, &names, &definition, &declaration);

    tracing::debug!(
        header_len = header.len(),
        source_len = source.len(),
        "binding generated"
    );

    GeneratedBinding {
        class_name: class.name().to_string(),
        file_stem: file_stem(class.name()),
        header,
        declaration,
        definition,
        source,
    }
}

/// Generate a whole batch in input order.
pub fn generate_batch(classes: &[ClassDescriptor], config: &BindingConfig) -> Vec<GeneratedBinding> {
    classes.iter().map(|class| generate(class, config)).collect()
}
