//! Generated symbol and file names.
//!
//! Every name the emitters produce is derived here from the class name and
//! the [`BindingConfig`], so the header, definition and declaration units agree.

use crate::config::BindingConfig;

/// File stem of a class's generated sources (`autogen_bitmap_binding`).
pub fn file_stem(class: &str) -> String {
    format!("autogen_{}_binding", class.to_lowercase())
}

/// Name derivation for one class.
#[derive(Clone, Copy, Debug)]
pub struct BindingNames<'a> {
    class: &'a str,
    config: &'a BindingConfig,
}

impl<'a> BindingNames<'a> {
    pub fn new(class: &'a str, config: &'a BindingConfig) -> Self {
        Self { class, config }
    }

    #[inline]
    pub fn class(&self) -> &'a str {
        self.class
    }

    #[inline]
    pub fn config(&self) -> &'a BindingConfig {
        self.config
    }

    /// `InitBitmapBinding`
    pub fn init_fn(&self) -> String {
        format!("Init{}Binding", self.class)
    }

    /// `Bitmap_Dispose`
    pub fn method_fn(&self, func: &str) -> String {
        format!("{}_{func}", self.class)
    }

    /// `BINDING_MRI_AUTOGEN_BITMAP_BINDING_H_`
    pub fn include_guard(&self) -> String {
        format!(
            "{}_AUTOGEN_{}_BINDING_H_",
            self.config.guard_prefix(),
            self.class.to_uppercase()
        )
    }

    /// `binding/mri/autogen_bitmap_binding.h` for this class or a dependency.
    pub fn binding_header(&self, class: &str) -> String {
        format!("{}/{}.h", self.config.binding_dir, file_stem(class))
    }

    /// `content/public/engine_bitmap.h`
    pub fn engine_header(&self, class: &str) -> String {
        format!(
            "{}/engine_{}.h",
            self.config.engine_header_dir,
            class.to_lowercase()
        )
    }

    /// Qualified native class (`content::Bitmap`).
    pub fn native(&self, class: &str) -> String {
        format!("{}::{class}", self.config.native_namespace)
    }

    /// Owning native pointer type (`scoped_refptr<content::Bitmap>`).
    pub fn native_handle(&self, class: &str) -> String {
        format!("scoped_refptr<{}>", self.native(class))
    }

    /// Runtime data-type registry entry (`kBitmapDataType`).
    pub fn data_type(class: &str) -> String {
        format!("k{class}DataType")
    }
}
