//! Type Mapping: semantic kinds → marshaling strategies
//!
//! Maps each [`TypeKind`] to how its values cross the language boundary:
//!
//! - Scalars and strings are parsed directly into a native local
//! - Handles and lists are parsed as an opaque `VALUE` and converted after
//!   parsing (unwrap, array check, element-wise conversion)
//! - Return values are converted back into runtime values
//!
//! The table is pure; rendering the strategies into C++ lives in
//! `cxx::definition`.

use mri_ir::{TypeKind, TypeRef};

use crate::naming::BindingNames;

/// Everything the definition emitter needs to marshal one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeMapping<'a> {
    /// Type of the local the argument parser writes into.
    pub native_param_type: &'static str,
    /// Format character for `MriParseArgsTo`.
    pub parse_tag: char,
    pub arg_conversion: ArgConversion<'a>,
    pub return_conversion: ReturnConversion<'a>,
}

/// Post-parse conversion of an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgConversion<'a> {
    /// The parsed local is passed as-is.
    Direct,
    /// Unwrap the object's native payload, checking its data type.
    Unwrap { class: &'a str },
    /// Check for an array and convert each element.
    List(ListElement<'a>),
}

impl ArgConversion<'_> {
    /// Suffix of the converted local passed to the native call.
    pub fn call_suffix(&self) -> &'static str {
        match self {
            Self::Direct => "",
            Self::Unwrap { .. } => "_obj",
            Self::List(_) => "_list",
        }
    }
}

/// Element conversion inside list arguments and list returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListElement<'a> {
    Integer,
    String,
    Handle { class: &'a str },
}

/// Conversion of a native return value into a runtime value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnConversion<'a> {
    Integer,
    Float,
    Boolean,
    String,
    Wrap { class: &'a str },
    List(ListElement<'a>),
}

impl<'a> TypeMapping<'a> {
    /// Look up the mapping for a kind.
    pub fn of(kind: &'a TypeKind) -> Self {
        match kind {
            TypeKind::String => Self::direct("std::string", 's', ReturnConversion::String),
            TypeKind::Float => Self::direct("double", 'f', ReturnConversion::Float),
            TypeKind::Boolean => Self::direct("bool", 'b', ReturnConversion::Boolean),
            TypeKind::Integer => Self::direct("int32_t", 'i', ReturnConversion::Integer),
            TypeKind::Handle(class) => {
                let class = class.as_str();
                Self::object(
                    ArgConversion::Unwrap { class },
                    ReturnConversion::Wrap { class },
                )
            }
            TypeKind::ScalarList(_) => Self::list(ListElement::Integer),
            TypeKind::StringList => Self::list(ListElement::String),
            TypeKind::HandleList(class) => Self::list(ListElement::Handle {
                class: class.as_str(),
            }),
        }
    }

    fn direct(
        native_param_type: &'static str,
        parse_tag: char,
        return_conversion: ReturnConversion<'a>,
    ) -> Self {
        Self {
            native_param_type,
            parse_tag,
            arg_conversion: ArgConversion::Direct,
            return_conversion,
        }
    }

    fn object(arg_conversion: ArgConversion<'a>, return_conversion: ReturnConversion<'a>) -> Self {
        Self {
            native_param_type: "VALUE",
            parse_tag: 'o',
            arg_conversion,
            return_conversion,
        }
    }

    fn list(element: ListElement<'a>) -> Self {
        Self::object(ArgConversion::List(element), ReturnConversion::List(element))
    }
}

/// Native type holding a converted value (`std::vector<int32_t>`,
/// `scoped_refptr<content::Font>`, `float`).
pub fn native_value_type(ty: &TypeRef, names: &BindingNames<'_>) -> String {
    match ty.kind() {
        TypeKind::String => "std::string".to_string(),
        TypeKind::Float | TypeKind::Boolean | TypeKind::Integer => ty.spelling().to_string(),
        TypeKind::Handle(class) => names.native_handle(class),
        TypeKind::ScalarList(element) => format!("std::vector<{element}>"),
        TypeKind::StringList => "std::vector<std::string>".to_string(),
        TypeKind::HandleList(class) => format!("std::vector<{}>", names.native_handle(class)),
    }
}

/// Accessor macro selection for an attribute.
///
/// `OBJLIST` and `INTEGERLIST` are not part of the scalar accessor family;
/// `mri_util.h` must define them for list attributes to compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttributeAccessor<'a> {
    /// `MRI_DEFINE_ATTRIBUTE_<suffix>`
    pub suffix: &'static str,
    /// Referenced class for object attributes, passed as the last macro argument.
    pub class: Option<&'a str>,
}

impl<'a> AttributeAccessor<'a> {
    pub fn of(kind: &'a TypeKind) -> Self {
        let suffix = match kind {
            TypeKind::Handle(_) => "OBJ",
            TypeKind::HandleList(_) => "OBJLIST",
            TypeKind::Float => "FLOAT",
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::StringList => "STRINGLIST",
            TypeKind::String => "STRING",
            TypeKind::ScalarList(_) => "INTEGERLIST",
            TypeKind::Integer => "INTEGER",
        };
        Self {
            suffix,
            class: kind.handle_class(),
        }
    }
}
