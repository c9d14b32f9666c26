//! Lowering parser declarations into validated descriptors.
//!
//! Lowering classifies every type tag, drops self and duplicate dependencies,
//! groups methods by implementation name, and rejects shapes the emitters
//! cannot express:
//!
//! - handle/list tags without a generic parameter
//! - two overloads of one implementation with the same arity
//! - a required parameter after an optional one
//! - parameter names that are repeated or collide with generated locals
//! - optional list parameters with a non-empty default
//! - aliases of one implementation that disagree on static-ness or return type
//! - duplicate class names within a batch

use rustc_hash::{FxHashMap, FxHashSet};

use crate::decl::{AttributeDecl, ClassDecl, MethodDecl, ParameterDecl};
use crate::descriptor::{
    AttributeDescriptor, ClassDescriptor, Dispatch, Implementation, MethodDescriptor,
    OverloadSignature, ParameterDescriptor,
};
use crate::roles::{is_generated_local, ImplRole};
use crate::ty::{is_identifier, ReturnType, TypeRef, TypeTagError};

/// A declaration that cannot be turned into a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("class name `{0}` is not a valid identifier")]
    InvalidClassName(String),
    #[error("class `{0}` is declared more than once")]
    DuplicateClass(String),
    #[error("{class}: `{name}` is not a valid {what} name")]
    InvalidName {
        class: String,
        what: &'static str,
        name: String,
    },
    #[error("{class}.{member}: {source}")]
    TypeTag {
        class: String,
        member: String,
        source: TypeTagError,
    },
    #[error("{class}.{func}: more than one overload takes {arity} argument(s)")]
    AmbiguousOverload {
        class: String,
        func: String,
        arity: usize,
    },
    #[error("{class}.{func}: required parameter `{param}` follows an optional parameter")]
    NonTrailingOptional {
        class: String,
        func: String,
        param: String,
    },
    #[error("{class}.{func}: optional parameter `{param}` has no default value")]
    MissingDefault {
        class: String,
        func: String,
        param: String,
    },
    #[error("{class}.{func}: parameter `{param}` is declared more than once")]
    DuplicateParameter {
        class: String,
        func: String,
        param: String,
    },
    #[error("{class}.{func}: parameter `{param}` collides with a generated local")]
    ReservedParameter {
        class: String,
        func: String,
        param: String,
    },
    #[error("{class}.{func}: optional list parameter `{param}` can only default to empty")]
    ListDefault {
        class: String,
        func: String,
        param: String,
    },
    #[error("{class}.{func}: exposed names disagree on {what}")]
    ConflictingAlias {
        class: String,
        func: String,
        what: &'static str,
    },
}

/// Lower a whole generation batch. Fails on the first invalid class.
#[tracing::instrument(level = "debug", skip_all, fields(classes = decls.len()))]
pub fn lower_batch(decls: &[ClassDecl]) -> Result<Vec<ClassDescriptor>, DescriptorError> {
    let mut seen = FxHashSet::default();
    let mut classes = Vec::with_capacity(decls.len());
    for decl in decls {
        if !seen.insert(decl.class_name.as_str()) {
            return Err(DescriptorError::DuplicateClass(decl.class_name.clone()));
        }
        classes.push(lower_class(decl)?);
    }
    tracing::debug!("descriptor lowering complete");
    Ok(classes)
}

/// Lower one class declaration.
#[tracing::instrument(level = "debug", skip_all, fields(class = %decl.class_name))]
pub fn lower_class(decl: &ClassDecl) -> Result<ClassDescriptor, DescriptorError> {
    if !is_identifier(&decl.class_name) {
        return Err(DescriptorError::InvalidClassName(decl.class_name.clone()));
    }
    let lowerer = Lowerer {
        class: &decl.class_name,
    };

    let dependencies = lowerer.dependencies(&decl.dependencies)?;
    let attributes = decl
        .attributes
        .iter()
        .map(|attr| lowerer.attribute(attr))
        .collect::<Result<Vec<_>, _>>()?;
    let methods = decl
        .methods
        .iter()
        .map(|method| lowerer.method(method))
        .collect::<Result<Vec<_>, _>>()?;
    let implementations = lowerer.implementations(&methods)?;

    Ok(ClassDescriptor {
        name: decl.class_name.clone(),
        is_module: decl.is_module,
        is_serializable: decl.is_serializable,
        is_comparable: decl.is_comparable,
        dependencies,
        attributes,
        methods,
        implementations,
    })
}

struct Lowerer<'a> {
    class: &'a str,
}

impl Lowerer<'_> {
    fn dependencies(&self, deps: &[String]) -> Result<Vec<String>, DescriptorError> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::with_capacity(deps.len());
        for dep in deps {
            if dep == self.class || !seen.insert(dep.as_str()) {
                continue;
            }
            self.check_identifier("dependency", dep)?;
            out.push(dep.clone());
        }
        Ok(out)
    }

    fn attribute(&self, attr: &AttributeDecl) -> Result<AttributeDescriptor, DescriptorError> {
        self.check_exposed(&attr.name)?;
        self.check_identifier("accessor", &attr.func)?;
        let ty = self.classify(&attr.name, &attr.ty)?;
        Ok(AttributeDescriptor {
            name: attr.name.clone(),
            func: attr.func.clone(),
            ty,
            is_static: attr.is_static,
        })
    }

    fn method(&self, method: &MethodDecl) -> Result<MethodDescriptor, DescriptorError> {
        self.check_exposed(&method.name)?;
        self.check_identifier("implementation", &method.func)?;
        let return_type =
            ReturnType::parse(&method.return_type).map_err(|source| self.tag_error(&method.name, source))?;
        if let Some(ty) = return_type.value() {
            self.warn_fallback(&method.name, ty);
        }

        let mut overloads = method
            .overloads
            .iter()
            .map(|params| self.overload(&method.func, params))
            .collect::<Result<Vec<_>, _>>()?;
        if overloads.is_empty() {
            overloads.push(OverloadSignature::default());
        }

        Ok(MethodDescriptor {
            name: method.name.clone(),
            func: method.func.clone(),
            is_static: method.is_static,
            return_type,
            overloads,
        })
    }

    fn overload(
        &self,
        func: &str,
        params: &[ParameterDecl],
    ) -> Result<OverloadSignature, DescriptorError> {
        self.check_parameter_names(func, params)?;

        let mut seen_optional = false;
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let member = format!("{func}({})", param.name);
            let ty = self.classify(&member, &param.ty)?;

            if seen_optional && !param.optional {
                return Err(DescriptorError::NonTrailingOptional {
                    class: self.class.to_string(),
                    func: func.to_string(),
                    param: param.name.clone(),
                });
            }
            seen_optional |= param.optional;

            let default_value = if param.optional {
                Some(self.default_value(func, param, &ty)?)
            } else {
                None
            };

            out.push(ParameterDescriptor {
                name: param.name.clone(),
                ty,
                default_value,
            });
        }
        Ok(OverloadSignature { params: out })
    }

    /// Parameter names become locals next to the ones every marshaling
    /// function declares, plus `<name>_obj` / `<name>_list` for converted
    /// arguments.
    fn check_parameter_names(
        &self,
        func: &str,
        params: &[ParameterDecl],
    ) -> Result<(), DescriptorError> {
        let mut names = FxHashSet::default();
        for param in params {
            self.check_identifier("parameter", &param.name)?;
            if !names.insert(param.name.as_str()) {
                return Err(DescriptorError::DuplicateParameter {
                    class: self.class.to_string(),
                    func: func.to_string(),
                    param: param.name.clone(),
                });
            }
        }

        for param in params {
            let name = param.name.as_str();
            let derived = ["_obj", "_list"]
                .into_iter()
                .filter_map(|suffix| name.strip_suffix(suffix))
                .any(|base| names.contains(base));
            if derived || is_generated_local(name) {
                return Err(DescriptorError::ReservedParameter {
                    class: self.class.to_string(),
                    func: func.to_string(),
                    param: param.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Default literal of an optional parameter.
    fn default_value(
        &self,
        func: &str,
        param: &ParameterDecl,
        ty: &TypeRef,
    ) -> Result<String, DescriptorError> {
        let literal = param
            .default_value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());

        // Lists always start out empty.
        if ty.kind().is_list() {
            return match literal {
                None | Some("{}") => Ok("{}".to_string()),
                Some(_) => Err(DescriptorError::ListDefault {
                    class: self.class.to_string(),
                    func: func.to_string(),
                    param: param.name.clone(),
                }),
            };
        }

        match literal {
            Some(value) => Ok(value.to_string()),
            // Handles arrive as nil when omitted.
            None if ty.kind().is_object() => Ok("nullptr".to_string()),
            None => Err(DescriptorError::MissingDefault {
                class: self.class.to_string(),
                func: func.to_string(),
                param: param.name.clone(),
            }),
        }
    }

    /// Group methods by `func`, merging the parameter shapes of every alias.
    fn implementations(
        &self,
        methods: &[MethodDescriptor],
    ) -> Result<Vec<Implementation>, DescriptorError> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut groups: Vec<(&MethodDescriptor, Vec<OverloadSignature>)> = Vec::new();

        for method in methods {
            let Some(&slot) = index.get(method.func.as_str()) else {
                index.insert(&method.func, groups.len());
                groups.push((method, method.overloads.clone()));
                continue;
            };

            let (first, overloads) = &mut groups[slot];
            if first.is_static != method.is_static {
                return Err(self.conflict(&method.func, "static-ness"));
            }
            if first.return_type != method.return_type {
                return Err(self.conflict(&method.func, "return type"));
            }
            for sig in &method.overloads {
                if !overloads.contains(sig) {
                    overloads.push(sig.clone());
                }
            }
        }

        groups
            .into_iter()
            .map(|(first, overloads)| {
                let mut arities = FxHashSet::default();
                for sig in &overloads {
                    if !arities.insert(sig.arity()) {
                        return Err(DescriptorError::AmbiguousOverload {
                            class: self.class.to_string(),
                            func: first.func.clone(),
                            arity: sig.arity(),
                        });
                    }
                }
                Ok(Implementation {
                    func: first.func.clone(),
                    is_static: first.is_static,
                    return_type: first.return_type.clone(),
                    role: ImplRole::of(&first.func),
                    dispatch: Dispatch::from_overloads(overloads),
                })
            })
            .collect()
    }

    fn classify(&self, member: &str, tag: &str) -> Result<TypeRef, DescriptorError> {
        let ty = TypeRef::parse(tag).map_err(|source| self.tag_error(member, source))?;
        self.warn_fallback(member, &ty);
        Ok(ty)
    }

    fn warn_fallback(&self, member: &str, ty: &TypeRef) {
        if ty.is_fallback() {
            tracing::warn!(
                class = self.class,
                member,
                tag = ty.spelling(),
                "unrecognized type tag, treating as integer"
            );
        }
    }

    fn check_identifier(&self, what: &'static str, name: &str) -> Result<(), DescriptorError> {
        if is_identifier(name) {
            Ok(())
        } else {
            Err(self.invalid_name(what, name))
        }
    }

    /// Exposed names are runtime method names (`dispose?`, `x=`, `==`), so
    /// only emptiness and quoting characters are rejected.
    fn check_exposed(&self, name: &str) -> Result<(), DescriptorError> {
        if name.is_empty() || name.contains(['"', '\\']) || name.chars().any(char::is_whitespace) {
            Err(self.invalid_name("exposed", name))
        } else {
            Ok(())
        }
    }

    fn invalid_name(&self, what: &'static str, name: &str) -> DescriptorError {
        DescriptorError::InvalidName {
            class: self.class.to_string(),
            what,
            name: name.to_string(),
        }
    }

    fn tag_error(&self, member: &str, source: TypeTagError) -> DescriptorError {
        DescriptorError::TypeTag {
            class: self.class.to_string(),
            member: member.to_string(),
            source,
        }
    }

    fn conflict(&self, func: &str, what: &'static str) -> DescriptorError {
        DescriptorError::ConflictingAlias {
            class: self.class.to_string(),
            func: func.to_string(),
            what,
        }
    }
}

#[cfg(test)]
mod tests;
