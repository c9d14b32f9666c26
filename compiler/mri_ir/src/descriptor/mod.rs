//! Validated class descriptors.
//!
//! Descriptors are built by [`crate::lower_class`] and never mutated
//! afterwards. Member descriptors keep the parser's declaration order; the
//! class additionally carries its methods grouped by implementation name, which
//! is what the definition emitter walks.

use crate::roles::ImplRole;
use crate::ty::{ReturnType, TypeRef};

/// One class or module, ready for emission.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassDescriptor {
    pub(crate) name: String,
    pub(crate) is_module: bool,
    pub(crate) is_serializable: bool,
    pub(crate) is_comparable: bool,
    pub(crate) dependencies: Vec<String>,
    pub(crate) attributes: Vec<AttributeDescriptor>,
    pub(crate) methods: Vec<MethodDescriptor>,
    pub(crate) implementations: Vec<Implementation>,
}

impl ClassDescriptor {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modules have no instances: no allocator, no identity comparison.
    #[inline]
    pub fn is_module(&self) -> bool {
        self.is_module
    }

    #[inline]
    pub fn is_serializable(&self) -> bool {
        self.is_serializable
    }

    #[inline]
    pub fn is_comparable(&self) -> bool {
        self.is_comparable
    }

    /// Referenced classes in declaration order, without duplicates or self.
    #[inline]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    #[inline]
    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    /// Exposed methods in declaration order, one per parser entry.
    #[inline]
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Methods grouped by `func`, in order of first appearance.
    #[inline]
    pub fn implementations(&self) -> &[Implementation] {
        &self.implementations
    }

    /// Number of attribute, parameter and return types that matched no rule
    /// and defaulted to integer.
    pub fn fallback_count(&self) -> usize {
        let attributes = self.attributes.iter().map(|attr| &attr.ty);
        let methods = self.methods.iter().flat_map(|method| {
            let params = method
                .overloads
                .iter()
                .flat_map(|sig| sig.params.iter().map(|param| &param.ty));
            method.return_type.value().into_iter().chain(params)
        });
        attributes
            .chain(methods)
            .filter(|ty| ty.is_fallback())
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeDescriptor {
    /// Exposed member name.
    pub name: String,
    /// Accessor base name on the native class.
    pub func: String,
    pub ty: TypeRef,
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    /// Exposed method name. Several names may share one `func`.
    pub name: String,
    pub func: String,
    pub is_static: bool,
    pub return_type: ReturnType,
    pub overloads: Vec<OverloadSignature>,
}

/// One parameter-list shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OverloadSignature {
    pub params: Vec<ParameterDescriptor>,
}

impl OverloadSignature {
    /// Argument count this overload is selected by.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Index of the first optional parameter. Every parameter from here on is
    /// optional too.
    pub fn first_optional(&self) -> Option<usize> {
        self.params.iter().position(ParameterDescriptor::is_optional)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: TypeRef,
    /// Default literal; present exactly when the parameter is optional.
    pub default_value: Option<String>,
}

impl ParameterDescriptor {
    #[inline]
    pub fn is_optional(&self) -> bool {
        self.default_value.is_some()
    }
}

/// Everything exposed under one implementation name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Implementation {
    pub func: String,
    pub is_static: bool,
    pub return_type: ReturnType,
    pub role: Option<ImplRole>,
    pub dispatch: Dispatch,
}

/// How a generated function picks among parameter-list shapes.
///
/// Overloads never share an arity; that is rejected when descriptors are built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// One shape, emitted without branching.
    Single(OverloadSignature),
    /// Two or more shapes, selected by received argument count.
    ByArity(Vec<OverloadSignature>),
}

impl Dispatch {
    pub(crate) fn from_overloads(mut overloads: Vec<OverloadSignature>) -> Self {
        if overloads.len() == 1 {
            if let Some(only) = overloads.pop() {
                return Self::Single(only);
            }
        }
        Self::ByArity(overloads)
    }

    pub fn overloads(&self) -> &[OverloadSignature] {
        match self {
            Self::Single(only) => std::slice::from_ref(only),
            Self::ByArity(overloads) => overloads,
        }
    }

    /// Largest arity across all shapes.
    pub fn max_arity(&self) -> usize {
        self.overloads()
            .iter()
            .map(OverloadSignature::arity)
            .max()
            .unwrap_or(0)
    }
}
