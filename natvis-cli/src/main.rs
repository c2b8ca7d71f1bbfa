//! natvis_generator — render `fkYAML.natvis` for one fkYAML release.
//!
//! # Usage
//!
//! ```text
//! natvis_generator <VERSION> [--template-dir <DIR>] [--output <FILE>]
//! ```
//!
//! Prints the versioned namespace (e.g. `fkyaml::v0_3_1`) on stdout and
//! writes the rendered visualizer file. Diagnostics go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use natvis_renderer::{generate, GeneratorConfig, Namespace, OUTPUT_FILE_NAME};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "natvis_generator",
    version,
    about = "Generate the fkYAML debugger visualizer (natvis) for a library version",
    long_about = None,
)]
struct Cli {
    /// Library version, e.g. "0.3.1".
    #[arg(value_name = "VERSION")]
    release: String,

    /// Directory containing fkYAML.natvis.tera (default: next to this executable).
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Output file (default: ./fkYAML.natvis).
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<GeneratorConfig> {
        let template_dir = match &self.template_dir {
            Some(dir) => dir.clone(),
            None => tool_dir()?,
        };
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(OUTPUT_FILE_NAME));
        Ok(GeneratorConfig::new(template_dir, output))
    }

    fn run(self) -> Result<()> {
        let namespace = Namespace::from_version(&self.release);
        println!("{namespace}");

        let config = self.config()?;
        let generated = generate(&namespace, &config).with_context(|| {
            format!(
                "failed to generate {} for version '{}'",
                config.output_path.display(),
                self.release
            )
        })?;
        tracing::debug!(
            namespace = %generated.namespace,
            path = %generated.output_path.display(),
            "done"
        );
        Ok(())
    }
}

/// Directory containing the running executable.
fn tool_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot locate the running executable")?;
    let dir = exe
        .parent()
        .with_context(|| format!("executable path '{}' has no parent", exe.display()))?;
    Ok(dir.to_path_buf())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    cli.run()
}
