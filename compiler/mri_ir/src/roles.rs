//! Well-known implementation roles.
//!
//! A few names carry fixed meaning for the runtime. Both emitters consult this
//! table instead of comparing names inline.

/// Implementation names whose result becomes the receiver's native payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImplRole {
    /// `New`, behind `initialize`.
    Constructor,
    /// `Copy`, behind `initialize_copy`.
    CopyConstructor,
}

const IMPL_ROLES: &[(&str, ImplRole)] = &[
    ("New", ImplRole::Constructor),
    ("Copy", ImplRole::CopyConstructor),
];

/// Exposed names the runtime always calls on an instance.
const INSTANCE_HOOKS: &[&str] = &["initialize", "initialize_copy"];

/// Names every marshaling function already declares.
const GENERATED_LOCALS: &[&str] = &[
    "self",
    "argc",
    "argv",
    "self_obj",
    "exception_state",
    "result_value",
    "ary",
    "it",
    "item",
    "i",
];

impl ImplRole {
    /// Look up the role of an implementation name.
    pub fn of(func: &str) -> Option<Self> {
        IMPL_ROLES
            .iter()
            .find(|(name, _)| *name == func)
            .map(|(_, role)| *role)
    }

    /// The implementation name carrying this role.
    pub fn func(self) -> &'static str {
        match self {
            Self::Constructor => "New",
            Self::CopyConstructor => "Copy",
        }
    }
}

/// Whether an exposed method name must be registered on instances even when
/// its implementation is static.
pub fn is_instance_hook(name: &str) -> bool {
    INSTANCE_HOOKS.contains(&name)
}

/// Whether a parameter name would collide with a local of the generated
/// marshaling function.
pub fn is_generated_local(name: &str) -> bool {
    GENERATED_LOCALS.contains(&name)
}
