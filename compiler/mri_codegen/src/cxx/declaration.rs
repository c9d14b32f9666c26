//! Declaration unit emission.
//!
//! Produces `Init<Class>Binding`, which creates the class or module and
//! registers its hooks, attributes and methods with the runtime. Registration
//! is keyed by exposed name: each name is registered once, even when several
//! names share one implementation.

use mri_ir::roles::is_instance_hook;
use mri_ir::ClassDescriptor;

use crate::context::EmitContext;
use crate::naming::BindingNames;

/// Emit the registration function.
#[tracing::instrument(level = "debug", skip_all, fields(class = %class.name()))]
pub fn emit_declaration(class: &ClassDescriptor, names: &BindingNames<'_>) -> String {
    let mut ctx = EmitContext::new();
    let kname = names.class();

    ctx.writeln(&format!("void {}() {{", names.init_fn()));
    ctx.indent();

    if class.is_module() {
        ctx.writeln(&format!("VALUE klass = rb_define_module(\"{kname}\");"));
    } else {
        ctx.writeln(&format!(
            "VALUE klass = rb_define_class(\"{kname}\", rb_cObject);"
        ));
        ctx.writeln(&format!(
            "rb_define_alloc_func(klass, MriClassAllocate<&{}>);",
            BindingNames::data_type(kname)
        ));
        ctx.writeln("MriDefineMethod(klass, \"engine_id\", MriGetEngineID);");
        ctx.writeln(&format!("MRI_DECLARE_OBJECT_COMPARE({kname});"));
    }

    if class.is_serializable() {
        ctx.newline();
        ctx.writeln(&format!(
            "MriInitSerializableBinding<{}>(klass);",
            names.native(kname)
        ));
    }

    emit_attribute_registrations(&mut ctx, class, kname);
    emit_method_registrations(&mut ctx, class, names);

    ctx.dedent();
    ctx.writeln("}");
    ctx.take_output()
}

fn emit_attribute_registrations(ctx: &mut EmitContext, class: &ClassDescriptor, kname: &str) {
    let mut first = true;
    for attr in class.attributes() {
        if !ctx.first_emission(&format!("attr:{}", attr.name)) {
            continue;
        }
        if std::mem::take(&mut first) {
            ctx.newline();
        }
        let macro_name = if class.is_module() {
            "MRI_DECLARE_MODULE_ATTRIBUTE"
        } else if attr.is_static {
            "MRI_DECLARE_CLASS_ATTRIBUTE"
        } else {
            "MRI_DECLARE_ATTRIBUTE"
        };
        ctx.writeln(&format!(
            "{macro_name}(klass, \"{}\", {kname}, {});",
            attr.name, attr.func
        ));
    }
}

fn emit_method_registrations(
    ctx: &mut EmitContext,
    class: &ClassDescriptor,
    names: &BindingNames<'_>,
) {
    let mut first = true;
    for method in class.methods() {
        if !ctx.first_emission(&format!("method:{}", method.name)) {
            continue;
        }
        if std::mem::take(&mut first) {
            ctx.newline();
        }
        let define = if class.is_module() {
            "MriDefineModuleFunction"
        } else if method.is_static && !is_instance_hook(&method.name) {
            "MriDefineClassMethod"
        } else {
            "MriDefineMethod"
        };
        ctx.writeln(&format!(
            "{define}(klass, \"{}\", {});",
            method.name,
            names.method_fn(&method.func)
        ));
    }
}

#[cfg(test)]
mod tests;
