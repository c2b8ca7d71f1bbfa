//! Tera rendering engine and the load → render → write pipeline.

use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::NatvisContext;
use crate::error::RenderError;
use crate::namespace::Namespace;
use crate::whitespace::apply_block_whitespace;
use crate::writer::write_output;

/// Template file name, looked up inside [`GeneratorConfig::template_dir`].
pub const TEMPLATE_FILE_NAME: &str = "fkYAML.natvis.tera";

/// Default output file name.
pub const OUTPUT_FILE_NAME: &str = "fkYAML.natvis";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Explicit paths for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding [`TEMPLATE_FILE_NAME`].
    pub template_dir: PathBuf,
    /// File the rendered natvis is written to.
    pub output_path: PathBuf,
}

impl GeneratorConfig {
    pub fn new(template_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        GeneratorConfig {
            template_dir: template_dir.into(),
            output_path: output_path.into(),
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(TEMPLATE_FILE_NAME)
    }
}

/// Result of a successful [`generate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub namespace: Namespace,
    pub output_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Template loading
// ---------------------------------------------------------------------------

/// Read [`TEMPLATE_FILE_NAME`] from `dir`.
pub fn load_template(dir: &Path) -> Result<String, RenderError> {
    let path = dir.join(TEMPLATE_FILE_NAME);
    tracing::debug!(path = %path.display(), "loading template");
    std::fs::read_to_string(&path).map_err(|source| RenderError::TemplateRead { path, source })
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// XML escaping for substituted values; natvis files are XML.
fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Tera wrapper rendering a single template source against a [`NatvisContext`].
///
/// Block tags follow the lstrip/trim conventions of [`apply_block_whitespace`];
/// every `{{ }}` expression is XML-escaped unless marked `| safe`.
///
/// Variables other than `namespace` are undefined and make rendering fail
/// with [`RenderError::Tera`]; they do not render as empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        TemplateEngine
    }

    /// Render `source` with the variables in `ctx`.
    pub fn render(&self, source: &str, ctx: &NatvisContext) -> Result<String, RenderError> {
        let prepared = apply_block_whitespace(source);

        let mut tera = Tera::default();
        tera.autoescape_on(vec![TEMPLATE_FILE_NAME]);
        tera.set_escape_fn(escape_xml);
        tera.add_raw_template(TEMPLATE_FILE_NAME, &prepared)?;

        let tera_ctx = ctx.to_tera_context()?;
        Ok(tera.render(TEMPLATE_FILE_NAME, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Load the template, render it for `namespace` and write the output file.
///
/// The output file is only opened once rendering has succeeded.
pub fn generate(namespace: &Namespace, config: &GeneratorConfig) -> Result<Generated, RenderError> {
    let source = load_template(&config.template_dir)?;
    let ctx = NatvisContext::new(namespace.clone());
    let rendered = TemplateEngine::new().render(&source, &ctx)?;
    write_output(&config.output_path, &rendered)?;
    Ok(Generated {
        namespace: namespace.clone(),
        output_path: config.output_path.clone(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, version: &str) -> String {
        let ctx = NatvisContext::new(Namespace::from_version(version));
        TemplateEngine::new()
            .render(source, &ctx)
            .unwrap_or_else(|e| panic!("render failed: {e}"))
    }

    #[test]
    fn substitutes_namespace() {
        assert_eq!(
            render("namespace={{ namespace }}", "2.0.0"),
            "namespace=fkyaml::v2_0_0"
        );
    }

    #[test]
    fn keeps_trailing_newline() {
        assert_eq!(
            render("namespace={{ namespace }}\n", "2.0.0"),
            "namespace=fkyaml::v2_0_0\n"
        );
    }

    #[test]
    fn template_without_placeholder_is_unchanged() {
        let src = "<AutoVisualizer>\n  <Type Name=\"x\"/>\n</AutoVisualizer>\n";
        assert_eq!(render(src, "0.3.1"), src);
    }

    #[test]
    fn substituted_values_are_xml_escaped() {
        assert_eq!(
            render("{{ namespace }}", "<1>&\"'"),
            "fkyaml::v&lt;1&gt;&amp;&#34;&#39;"
        );
    }

    #[test]
    fn safe_filter_bypasses_escaping() {
        assert_eq!(render("{{ namespace | safe }}", "<1>"), "fkyaml::v<1>");
    }

    #[test]
    fn block_tags_leave_no_residue() {
        let src = "<T>\n  {% for kind in [\"a\", \"b\"] %}\n  <I>{{ namespace }}::{{ kind }}</I>\n  {% endfor %}\n</T>\n";
        assert_eq!(
            render(src, "0.3.1"),
            "<T>\n  <I>fkyaml::v0_3_1::a</I>\n  <I>fkyaml::v0_3_1::b</I>\n</T>\n"
        );
    }

    #[test]
    fn raw_block_body_is_rendered_verbatim() {
        assert_eq!(
            render("{% raw %}\n  {% x %}\n{% endraw %}\n", "0.3.1"),
            "\n  {% x %}\n"
        );
    }

    #[test]
    fn tag_opener_inside_expression_string_keeps_newline() {
        assert_eq!(render("{{ '{%' }} a %}\n", "0.3.1"), "{% a %}\n");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let ctx = NatvisContext::new(Namespace::from_version("0.3.1"));
        let err = TemplateEngine::new()
            .render("{{ other }}|{{ namespace }}", &ctx)
            .expect_err("undefined variable must fail");
        assert!(matches!(err, RenderError::Tera(_)));
    }

    #[test]
    fn syntax_error_is_reported() {
        let ctx = NatvisContext::new(Namespace::from_version("0.3.1"));
        let err = TemplateEngine::new()
            .render("{% if %}", &ctx)
            .expect_err("invalid template must fail");
        assert!(matches!(err, RenderError::Tera(_)));
    }

    #[test]
    fn escape_xml_passes_namespace_characters_through() {
        assert_eq!(escape_xml("fkyaml::v0_3_1/x"), "fkyaml::v0_3_1/x");
    }

    #[test]
    fn template_path_joins_file_name() {
        let cfg = GeneratorConfig::new("/opt/tool", OUTPUT_FILE_NAME);
        assert_eq!(cfg.template_path(), PathBuf::from("/opt/tool/fkYAML.natvis.tera"));
    }
}
