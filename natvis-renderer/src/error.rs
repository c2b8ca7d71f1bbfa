//! Error types for natvis-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while generating the natvis file.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template could not be found or read.
    #[error("cannot read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tera template engine error (syntax or render failure).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// The rendered output could not be written.
    #[error("cannot write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RenderError::Write`].
pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Write {
        path: path.into(),
        source,
    }
}
