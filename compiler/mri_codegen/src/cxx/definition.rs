//! Definition unit emission.
//!
//! Emits, in order:
//!
//! 1. the runtime data type and identity comparison (classes only)
//! 2. one accessor macro per attribute implementation
//! 3. one `MRI_METHOD` per implementation name
//!
//! A method with several parameter shapes switches on `argc`; each shape
//! parses its arguments, converts object arguments, calls the native
//! implementation, propagates the exception state and converts the result.

use mri_ir::{
    ClassDescriptor, Dispatch, Implementation, OverloadSignature, ParameterDescriptor, ReturnType,
};

use crate::context::EmitContext;
use crate::naming::BindingNames;
use crate::types::{
    native_value_type, ArgConversion, AttributeAccessor, ListElement, ReturnConversion,
    TypeMapping,
};

/// Emit the definition unit.
#[tracing::instrument(level = "debug", skip_all, fields(
    class = %class.name(),
    implementations = class.implementations().len(),
))]
pub fn emit_definition(class: &ClassDescriptor, names: &BindingNames<'_>) -> String {
    let mut ctx = EmitContext::new();
    let kname = names.class();

    if !class.is_module() {
        ctx.writeln(&format!(
            "MRI_DEFINE_DATATYPE_REF({kname}, \"{kname}\", {});",
            names.native(kname)
        ));
        let compare = if class.is_comparable() {
            "MRI_OBJECT_ID_COMPARE_CUSTOM"
        } else {
            "MRI_OBJECT_ID_COMPARE"
        };
        ctx.writeln(&format!("{compare}({kname});"));
        ctx.newline();
    }

    emit_attribute_accessors(&mut ctx, class, kname);

    for imp in class.implementations() {
        if !ctx.first_emission(&imp.func) {
            continue;
        }
        MethodEmitter {
            ctx: &mut ctx,
            class,
            names,
            imp,
        }
        .emit();
        ctx.newline();
    }

    ctx.take_output()
}

fn emit_attribute_accessors(ctx: &mut EmitContext, class: &ClassDescriptor, kname: &str) {
    let mut any = false;
    for attr in class.attributes() {
        if !ctx.first_emission(&format!("attr:{}", attr.func)) {
            continue;
        }
        any = true;
        let prefix = if attr.is_static { "STATIC_" } else { "" };
        let accessor = AttributeAccessor::of(attr.ty.kind());
        let referenced = accessor
            .class
            .map(|c| format!(", {c}"))
            .unwrap_or_default();
        ctx.writeln(&format!(
            "MRI_DEFINE_{prefix}ATTRIBUTE_{}({kname}, {}{referenced});",
            accessor.suffix, attr.func
        ));
    }
    if any {
        ctx.newline();
    }
}

/// Emits one `MRI_METHOD`.
struct MethodEmitter<'a, 'c> {
    ctx: &'c mut EmitContext,
    class: &'a ClassDescriptor,
    names: &'a BindingNames<'a>,
    imp: &'a Implementation,
}

impl MethodEmitter<'_, '_> {
    fn emit(mut self) {
        let imp = self.imp;
        self.ctx.writeln(&format!(
            "MRI_METHOD({}) {{",
            self.names.method_fn(&imp.func)
        ));
        self.ctx.indent();

        match &imp.dispatch {
            Dispatch::Single(sig) => self.emit_overload(sig, true),
            Dispatch::ByArity(overloads) => self.emit_arity_switch(overloads),
        }

        self.ctx.dedent();
        self.ctx.writeln("}");
    }

    /// One `case` per shape; the default case reports a count mismatch
    /// against the widest shape.
    fn emit_arity_switch(&mut self, overloads: &[OverloadSignature]) {
        self.ctx.writeln("switch (argc) {");
        self.ctx.indent();
        for sig in overloads {
            self.ctx.writeln(&format!("case {}: {{", sig.arity()));
            self.ctx.indent();
            self.emit_overload(sig, false);
            self.ctx.dedent();
            self.ctx.writeln("}");
        }
        self.ctx.writeln("default:");
        self.ctx.indent();
        self.ctx.writeln(&format!(
            "MriCheckArgc(argc, {});",
            self.imp.dispatch.max_arity()
        ));
        self.ctx.writeln("return Qnil;");
        self.ctx.dedent();
        self.ctx.dedent();
        self.ctx.writeln("}");
    }

    fn emit_overload(&mut self, sig: &OverloadSignature, check_argc: bool) {
        let mut format = String::new();
        let mut parser_args = Vec::with_capacity(sig.arity());
        let mut call_args = Vec::with_capacity(sig.arity());
        let first_optional = sig.first_optional();

        for (idx, param) in sig.params.iter().enumerate() {
            let mapping = TypeMapping::of(param.ty.kind());
            self.emit_local(param, &mapping);
            if first_optional == Some(idx) {
                format.push('|');
            }
            format.push(mapping.parse_tag);
            parser_args.push(format!("&{}", param.name));
            call_args.push(format!(
                "{}{}",
                param.name,
                mapping.arg_conversion.call_suffix()
            ));
        }

        if sig.params.is_empty() {
            if check_argc {
                self.ctx.writeln("MriCheckArgc(argc, 0);");
            }
        } else {
            self.ctx.writeln(&format!(
                "MriParseArgsTo(argc, argv, \"{format}\", {});",
                parser_args.join(", ")
            ));
            for param in &sig.params {
                let mapping = TypeMapping::of(param.ty.kind());
                self.emit_arg_conversion(param, mapping.arg_conversion);
            }
        }

        self.emit_call(&call_args);
        self.emit_return();
    }

    /// Declare the local the argument parser writes into.
    fn emit_local(&mut self, param: &ParameterDescriptor, mapping: &TypeMapping<'_>) {
        let init = if param.ty.kind().is_object() {
            Some("Qnil")
        } else {
            param.default_value.as_deref()
        };
        match init {
            Some(value) => self.ctx.writeln(&format!(
                "{} {} = {value};",
                mapping.native_param_type, param.name
            )),
            None => self
                .ctx
                .writeln(&format!("{} {};", mapping.native_param_type, param.name)),
        }
    }

    fn emit_arg_conversion(&mut self, param: &ParameterDescriptor, conversion: ArgConversion<'_>) {
        let name = &param.name;
        match conversion {
            ArgConversion::Direct => {}
            ArgConversion::Unwrap { class } => {
                let target = format!("{} {name}_obj", self.names.native_handle(class));
                let unwrap = self.unwrap_expr(class, name);
                if param.is_optional() {
                    self.ctx.writeln(&format!("{target};"));
                    self.ctx.writeln(&format!("if (!NIL_P({name}))"));
                    self.ctx.indent();
                    self.ctx.writeln(&format!("{name}_obj = {unwrap};"));
                    self.ctx.dedent();
                } else {
                    self.ctx.writeln(&format!("{target} = {unwrap};"));
                }
            }
            ArgConversion::List(element) => {
                self.ctx.writeln(&format!(
                    "{} {name}_list;",
                    native_value_type(&param.ty, self.names)
                ));
                if param.is_optional() {
                    self.ctx.writeln(&format!("if (!NIL_P({name})) {{"));
                    self.ctx.indent();
                }
                self.ctx
                    .writeln(&format!("if (rb_type({name}) != RUBY_T_ARRAY)"));
                self.ctx.indent();
                self.ctx.writeln(&format!(
                    "rb_raise(rb_eArgError, \"Argument {name}: Expected array\");"
                ));
                self.ctx.dedent();
                self.ctx
                    .writeln(&format!("for (long i = 0; i < RARRAY_LEN({name}); ++i) {{"));
                self.ctx.indent();
                self.ctx.writeln(&format!("VALUE item = rb_ary_entry({name}, i);"));
                match element {
                    ListElement::Integer => {
                        self.ctx
                            .writeln(&format!("{name}_list.push_back(NUM2INT(item));"));
                    }
                    ListElement::String => {
                        self.ctx.writeln("StringValue(item);");
                        self.ctx.writeln(&format!(
                            "{name}_list.emplace_back(RSTRING_PTR(item), RSTRING_LEN(item));"
                        ));
                    }
                    ListElement::Handle { class } => {
                        let unwrap = self.unwrap_expr(class, "item");
                        self.ctx.writeln(&format!("{name}_list.push_back({unwrap});"));
                    }
                }
                self.ctx.dedent();
                self.ctx.writeln("}");
                if param.is_optional() {
                    self.ctx.dedent();
                    self.ctx.writeln("}");
                }
            }
        }
    }

    /// Call the native implementation and propagate its exception state.
    fn emit_call(&mut self, call_args: &[String]) {
        let kname = self.names.class();
        let ns = &self.names.config().native_namespace;

        if !self.imp.is_static {
            let receiver = if self.class.is_module() {
                format!("MriGetGlobalModules()->{kname}")
            } else {
                format!("MriGetStructData<{}>(self)", self.names.native(kname))
            };
            self.ctx.writeln(&format!(
                "{} self_obj = {receiver};",
                self.names.native_handle(kname)
            ));
        }

        self.ctx
            .writeln(&format!("{ns}::ExceptionState exception_state;"));

        let result = if self.imp.role.is_some() {
            format!("{} result_value = ", self.names.native_handle(kname))
        } else {
            match &self.imp.return_type {
                ReturnType::Void => String::new(),
                ReturnType::Value(ty) => {
                    format!("{} result_value = ", native_value_type(ty, self.names))
                }
            }
        };

        let mut args: String = call_args.iter().map(|arg| format!("{arg}, ")).collect();
        args.push_str("exception_state");
        let func = &self.imp.func;
        if self.imp.is_static {
            self.ctx.writeln(&format!(
                "{result}{}::{func}(MriGetCurrentContext(), {args});",
                self.names.native(kname)
            ));
        } else {
            self.ctx
                .writeln(&format!("{result}self_obj->{func}({args});"));
        }
        self.ctx.writeln("MriProcessException(exception_state);");
    }

    fn emit_return(&mut self) {
        if let Some(role) = self.imp.role {
            tracing::trace!(func = role.func(), "attaching constructed object to receiver");
            self.ctx.writeln("result_value->AddRef();");
            self.ctx
                .writeln("MriSetStructData(self, result_value.get());");
            self.ctx.writeln("return self;");
            return;
        }

        let ty = match &self.imp.return_type {
            ReturnType::Void => {
                self.ctx.writeln("return self;");
                return;
            }
            ReturnType::Value(ty) => ty,
        };

        match TypeMapping::of(ty.kind()).return_conversion {
            ReturnConversion::Integer => self.ctx.writeln("return rb_fix_new(result_value);"),
            ReturnConversion::Float => self.ctx.writeln("return rb_float_new(result_value);"),
            ReturnConversion::Boolean => {
                self.ctx.writeln("return result_value ? Qtrue : Qfalse;");
            }
            ReturnConversion::String => self.ctx.writeln(
                "return rb_utf8_str_new(result_value.c_str(), result_value.size());",
            ),
            ReturnConversion::Wrap { class } => self.ctx.writeln(&format!(
                "return MriWrapObject(result_value, {});",
                BindingNames::data_type(class)
            )),
            ReturnConversion::List(element) => {
                let value = match element {
                    ListElement::Integer => "INT2NUM(it)".to_string(),
                    ListElement::String => "rb_utf8_str_new(it.c_str(), it.size())".to_string(),
                    ListElement::Handle { class } => {
                        format!("MriWrapObject(it, {})", BindingNames::data_type(class))
                    }
                };
                self.ctx.writeln("VALUE ary = rb_ary_new();");
                self.ctx.writeln("for (auto& it : result_value)");
                self.ctx.indent();
                self.ctx.writeln(&format!("rb_ary_push(ary, {value});"));
                self.ctx.dedent();
                self.ctx.writeln("return ary;");
            }
        }
    }

    fn unwrap_expr(&self, class: &str, value: &str) -> String {
        format!(
            "MriCheckStructData<{}>({value}, {})",
            self.names.native(class),
            BindingNames::data_type(class)
        )
    }
}
