//! Template context — the variables visible to the natvis template.

use serde::Serialize;

use crate::error::RenderError;
use crate::namespace::Namespace;

/// Rendering payload. The template sees a single variable, `namespace`.
#[derive(Debug, Clone, Serialize)]
pub struct NatvisContext {
    pub namespace: Namespace,
}

impl NatvisContext {
    pub fn new(namespace: Namespace) -> Self {
        NatvisContext { namespace }
    }

    /// Convert into a [`tera::Context`].
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}
