//! Declaration builders shared by the emitter tests.

use mri_ir::{
    lower_class, AttributeDecl, ClassDecl, ClassDescriptor, MethodDecl, ParameterDecl,
};

pub fn param(ty: &str, name: &str) -> ParameterDecl {
    ParameterDecl {
        ty: ty.to_string(),
        name: name.to_string(),
        ..ParameterDecl::default()
    }
}

pub fn optional(ty: &str, name: &str, default_value: &str) -> ParameterDecl {
    ParameterDecl {
        optional: true,
        default_value: Some(default_value.to_string()),
        ..param(ty, name)
    }
}

pub fn method(
    name: &str,
    func: &str,
    return_type: &str,
    overloads: Vec<Vec<ParameterDecl>>,
) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        func: func.to_string(),
        is_static: false,
        return_type: return_type.to_string(),
        overloads,
    }
}

pub fn static_method(
    name: &str,
    func: &str,
    return_type: &str,
    overloads: Vec<Vec<ParameterDecl>>,
) -> MethodDecl {
    MethodDecl {
        is_static: true,
        ..method(name, func, return_type, overloads)
    }
}

pub fn attribute(name: &str, func: &str, ty: &str, is_static: bool) -> AttributeDecl {
    AttributeDecl {
        name: name.to_string(),
        func: func.to_string(),
        ty: ty.to_string(),
        is_static,
    }
}

pub fn class(name: &str) -> ClassDecl {
    ClassDecl {
        class_name: name.to_string(),
        ..ClassDecl::default()
    }
}

pub fn module(name: &str) -> ClassDecl {
    ClassDecl {
        is_module: true,
        ..class(name)
    }
}

pub fn lowered(decl: &ClassDecl) -> ClassDescriptor {
    lower_class(decl).unwrap_or_else(|e| panic!("fixture failed to lower: {e}"))
}
