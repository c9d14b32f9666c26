//! MRI Binding Generator
//!
//! Reads the annotation parser's class declarations (JSON), validates them
//! into descriptors and writes one header and one source file per class.
//!
//! # Pipeline
//!
//! ```text
//! descriptors.json
//!     │
//!     ▼
//! parse_declarations() ──► Vec<ClassDecl>
//!     │
//!     ▼
//! lower_batch() ──► Vec<ClassDescriptor>
//!     │
//!     ▼
//! generate_batch() ──► Vec<GeneratedBinding>
//!     │
//!     ▼
//! write_bindings() ──► autogen_<class>_binding.{h,cc}
//! ```
//!
//! Every class is generated before anything is written, so an invalid
//! declaration anywhere in the batch leaves the output directory untouched.

pub mod options;

use std::path::{Path, PathBuf};
use std::sync::Once;

use mri_codegen::{generate_batch, BindingConfig, GeneratedBinding};
use mri_ir::{lower_batch, ClassDecl, ClassDescriptor, DescriptorError};

pub use options::{parse_options, CliOptions};

/// A failed generation run.
#[derive(Debug, thiserror::Error)]
pub enum BindgenError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid declaration input: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

/// Deserialize the parser's output: a JSON array of class declarations.
pub fn parse_declarations(text: &str) -> Result<Vec<ClassDecl>, BindgenError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and deserialize a declaration file.
pub fn load_declarations(path: &Path) -> Result<Vec<ClassDecl>, BindgenError> {
    let text = std::fs::read_to_string(path).map_err(|source| BindgenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_declarations(&text)
}

/// Parse and validate a declaration file.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_descriptors(path: &Path) -> Result<Vec<ClassDescriptor>, BindgenError> {
    let decls = load_declarations(path)?;
    Ok(lower_batch(&decls)?)
}

/// Parse, validate and generate a whole batch from JSON text.
pub fn generate_from_json(
    text: &str,
    config: &BindingConfig,
) -> Result<Vec<GeneratedBinding>, BindgenError> {
    let decls = parse_declarations(text)?;
    let classes = lower_batch(&decls)?;
    Ok(generate_batch(&classes, config))
}

/// Write `<stem>.h` and `<stem>.cc` for every binding into `out_dir`,
/// creating it if needed. Returns the written paths in order.
#[tracing::instrument(level = "debug", skip_all, fields(
    out_dir = %out_dir.display(),
    bindings = bindings.len(),
))]
pub fn write_bindings(
    bindings: &[GeneratedBinding],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, BindgenError> {
    std::fs::create_dir_all(out_dir).map_err(|source| BindgenError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(bindings.len() * 2);
    for binding in bindings {
        for (file, text) in [
            (binding.header_file(), &binding.header),
            (binding.source_file(), &binding.source),
        ] {
            let path = out_dir.join(file);
            std::fs::write(&path, text).map_err(|source| BindgenError::Write {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }
    }

    tracing::debug!(files = written.len(), "bindings written");
    Ok(written)
}
