//! Parser output declarations.
//!
//! These mirror the dictionaries produced by the annotation parser, field for
//! field. Nothing here is validated; see [`crate::lower_class`].

use serde::Deserialize;

/// One annotated class or module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassDecl {
    pub class_name: String,
    pub is_module: bool,
    pub is_serializable: bool,
    pub is_comparable: bool,
    /// Other classes referenced by handle. May contain the class itself.
    #[serde(rename = "dependency")]
    pub dependencies: Vec<String>,
    pub attributes: Vec<AttributeDecl>,
    pub methods: Vec<MethodDecl>,
}

/// An exported attribute (`URGE_EXPORT_ATTRIBUTE`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttributeDecl {
    pub name: String,
    pub func: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub is_static: bool,
}

/// An exported method. Every entry lists the parameter shapes of its `func`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MethodDecl {
    pub name: String,
    pub func: String,
    pub is_static: bool,
    pub return_type: String,
    #[serde(rename = "parameters")]
    pub overloads: Vec<Vec<ParameterDecl>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParameterDecl {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    pub optional: bool,
    pub default_value: Option<String>,
}
