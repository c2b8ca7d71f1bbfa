//! # natvis-renderer
//!
//! Tera-based renderer that produces the fkYAML debugger visualizer file
//! (`fkYAML.natvis`) from a template and a library version.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use natvis_renderer::{generate, GeneratorConfig, Namespace};
//!
//! fn run(tool_dir: &std::path::Path) -> Result<(), natvis_renderer::RenderError> {
//!     let namespace = Namespace::from_version("0.3.1");
//!     let config = GeneratorConfig::new(tool_dir, "fkYAML.natvis");
//!     let generated = generate(&namespace, &config)?;
//!     println!("{} -> {}", generated.namespace, generated.output_path.display());
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod namespace;
pub mod whitespace;
pub mod writer;

pub use context::NatvisContext;
pub use engine::{
    generate, load_template, GeneratorConfig, Generated, TemplateEngine, OUTPUT_FILE_NAME,
    TEMPLATE_FILE_NAME,
};
pub use error::RenderError;
pub use namespace::Namespace;
pub use whitespace::apply_block_whitespace;
