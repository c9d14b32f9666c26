//! Descriptor Model for MRI Binding Generation
//!
//! This crate holds the intermediate representation consumed by the code
//! emitters in `mri_codegen`:
//!
//! - **Declarations** (`decl`) - the annotation parser's output, deserialized
//!   as-is with raw type tags.
//! - **Descriptors** (`descriptor`) - validated, immutable class/module
//!   descriptions with classified types and grouped implementations.
//! - **Type kinds** (`ty`) - the closed set of semantic kinds a type tag can
//!   denote.
//! - **Roles** (`roles`) - implementation and method names with fixed meaning.
//!
//! # Architecture
//!
//! ```text
//! Vec<ClassDecl>   (parser output, raw tags)
//!        ↓
//!   lower_batch    (classify tags, group overloads, validate)
//!        ↓
//! Vec<ClassDescriptor>
//! ```

pub mod decl;
pub mod descriptor;
mod lower;
pub mod roles;
pub mod ty;

pub use decl::{AttributeDecl, ClassDecl, MethodDecl, ParameterDecl};
pub use descriptor::{
    AttributeDescriptor, ClassDescriptor, Dispatch, Implementation, MethodDescriptor,
    OverloadSignature, ParameterDescriptor,
};
pub use lower::{lower_batch, lower_class, DescriptorError};
pub use roles::ImplRole;
pub use ty::{ReturnType, TypeKind, TypeRef, TypeTagError};
