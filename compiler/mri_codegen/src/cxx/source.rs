//! Source file assembly.

use mri_ir::ClassDescriptor;

use crate::context::EmitContext;
use crate::naming::BindingNames;

/// Include directives of `autogen_<class>_binding.cc`.
///
/// The class's own generated header comes first, then the generated headers
/// of every referenced class, then the engine interface headers of the
/// referenced classes and of the class itself.
pub fn emit_includes(class: &ClassDescriptor, names: &BindingNames<'_>) -> String {
    let mut ctx = EmitContext::new();
    let kname = names.class();

    ctx.writeln(&format!("#include \"{}\"", names.binding_header(kname)));
    ctx.newline();

    let deps = class.dependencies();
    for dep in deps {
        ctx.writeln(&format!("#include \"{}\"", names.binding_header(dep)));
    }
    if !deps.is_empty() {
        ctx.newline();
    }

    for engine in deps.iter().map(String::as_str).chain([kname]) {
        ctx.writeln(&format!("#include \"{}\"", names.engine_header(engine)));
    }

    ctx.take_output()
}

/// Join the includes, definition unit and declaration unit into the final
/// source file inside the binding namespace.
pub fn assemble_source(
    class: &ClassDescriptor,
    names: &BindingNames<'_>,
    definition: &str,
    declaration: &str,
) -> String {
    let namespace = &names.config().binding_namespace;
    let mut out = emit_includes(class, names);
    out.push('\n');
    out.push_str(&format!("namespace {namespace} {{\n\n"));
    out.push_str(definition);
    out.push_str(declaration);
    out.push_str(&format!("\n}}  // namespace {namespace}\n"));
    out
}
