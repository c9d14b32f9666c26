//! C++ Emitters
//!
//! One emitter per generated unit:
//!
//! - `header` - include guard, data-type declaration, init forward declaration
//! - `definition` - data type, attribute accessors, one `MRI_METHOD` per
//!   implementation
//! - `declaration` - the `Init<Class>Binding` registration function
//! - `source` - include directives and the assembled source file

mod declaration;
mod definition;
mod header;
mod source;

pub use declaration::emit_declaration;
pub use definition::emit_definition;
pub use header::emit_header;
pub use source::{assemble_source, emit_includes};
