//! Output writer.
//!
//! The target is opened for writing and truncated in place, so a read-only
//! target fails and a symlinked target is written through. Content is
//! normalised to LF line endings before writing.

use std::path::Path;

use crate::error::{write_err, RenderError};

/// Write `content` to `path`, creating or truncating it.
pub fn write_output(path: &Path, content: &str) -> Result<(), RenderError> {
    let normalized = content.replace("\r\n", "\n");

    std::fs::write(path, &normalized).map_err(|e| write_err(path, e))?;

    tracing::info!(path = %path.display(), bytes = normalized.len(), "wrote natvis");
    Ok(())
}
