//! Output layout configuration.

/// Paths and namespaces the generated sources refer to.
///
/// The defaults match the engine's source tree: bindings live in
/// `binding/mri`, engine interfaces in `content/public` under namespace
/// `content`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingConfig {
    /// Directory of generated and hand-written binding sources.
    pub binding_dir: String,
    /// Directory of the engine's public interface headers.
    pub engine_header_dir: String,
    /// Namespace of the native engine classes.
    pub native_namespace: String,
    /// Namespace wrapping all generated code.
    pub binding_namespace: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            binding_dir: "binding/mri".to_string(),
            engine_header_dir: "content/public".to_string(),
            native_namespace: "content".to_string(),
            binding_namespace: "binding".to_string(),
        }
    }
}

impl BindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_binding_dir(mut self, dir: impl Into<String>) -> Self {
        self.binding_dir = trim_dir(dir.into());
        self
    }

    #[must_use]
    pub fn with_engine_header_dir(mut self, dir: impl Into<String>) -> Self {
        self.engine_header_dir = trim_dir(dir.into());
        self
    }

    #[must_use]
    pub fn with_native_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.native_namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_binding_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.binding_namespace = namespace.into();
        self
    }

    /// Include-guard prefix derived from the binding directory
    /// (`binding/mri` → `BINDING_MRI`).
    pub fn guard_prefix(&self) -> String {
        self.binding_dir
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// The hand-written runtime helper header every binding header includes.
    pub fn util_header(&self) -> String {
        format!("{}/mri_util.h", self.binding_dir)
    }
}

fn trim_dir(dir: String) -> String {
    match dir.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => dir,
    }
}
