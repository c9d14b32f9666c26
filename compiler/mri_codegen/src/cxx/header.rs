//! Header unit emission.

use mri_ir::ClassDescriptor;

use crate::context::EmitContext;
use crate::naming::BindingNames;

/// Emit `autogen_<class>_binding.h`.
pub fn emit_header(class: &ClassDescriptor, names: &BindingNames<'_>) -> String {
    let mut ctx = EmitContext::new();
    let guard = names.include_guard();
    let namespace = &names.config().binding_namespace;

    ctx.writeln(&format!("#ifndef {guard}"));
    ctx.writeln(&format!("#define {guard}"));
    ctx.newline();
    ctx.writeln(&format!("#include \"{}\"", names.config().util_header()));
    ctx.newline();
    ctx.writeln(&format!("namespace {namespace} {{"));
    ctx.newline();
    if !class.is_module() {
        ctx.writeln(&format!("MRI_DECLARE_DATATYPE({});", names.class()));
        ctx.newline();
    }
    ctx.writeln(&format!("void {}();", names.init_fn()));
    ctx.newline();
    ctx.writeln(&format!("}}  // namespace {namespace}"));
    ctx.newline();
    ctx.writeln(&format!("#endif  // {guard}"));

    ctx.take_output()
}
