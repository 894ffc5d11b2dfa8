//! Template environment.

use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::diagnostic::GeneratorError;
use super::naming;

/// Built-in templates, keyed by the file name an override must use.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("handler.go.tmpl", include_str!("../../templates/handler.go.tmpl")),
    ("model.apib.tmpl", include_str!("../../templates/model.apib.tmpl")),
    ("root_handler.go.tmpl", include_str!("../../templates/root_handler.go.tmpl")),
    ("index.apib.tmpl", include_str!("../../templates/index.apib.tmpl")),
    ("router.go.tmpl", include_str!("../../templates/router.go.tmpl")),
    ("db.go.tmpl", include_str!("../../templates/db.go.tmpl")),
];

/// Renders artifacts from the built-in templates and any overrides.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Creates a renderer with the built-in templates only.
    pub fn new() -> Result<Self, GeneratorError> {
        Self::with_overrides(None)
    }

    /// Creates a renderer, replacing built-ins by same-named files in `dir`.
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self, GeneratorError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.add_filter("snake_case", |s: String| naming::to_snake_case(&s));
        env.add_filter("lower_camel", |s: String| naming::to_lower_camel(&s));
        env.add_filter("original_case", |s: String| naming::to_original_case(&s));
        env.add_filter("pluralize", |s: String| naming::pluralize(&s));
        env.add_filter("article", |s: String| naming::article(&s));

        for (name, builtin) in TEMPLATES {
            let source = match dir.map(|d| d.join(name)).filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(template = *name, path = %path.display(), "using template override");
                    std::fs::read_to_string(&path)
                        .map_err(|e| GeneratorError::io(&path, e.to_string()))?
                }
                None => builtin.to_string(),
            };

            env.add_template_owned(*name, source)
                .map_err(|e| GeneratorError::template(*name, e))?;
        }

        Ok(Self { env })
    }

    /// Renders a template with the given context.
    pub fn render<S: Serialize>(&self, template: &str, ctx: &S) -> Result<String, GeneratorError> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| GeneratorError::template(template, e))?;
        tmpl.render(ctx).map_err(|e| GeneratorError::template(template, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn builtin_templates_compile() {
        let renderer = Renderer::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(renderer.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn overrides_replace_builtins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("router.go.tmpl"),
            "{{ project.namespace }}|{% for m in models %}{{ m.name | pluralize | snake_case }} {% endfor %}",
        )
        .unwrap();

        let renderer = Renderer::with_overrides(Some(dir.path())).unwrap();
        let out = renderer
            .render(
                "router.go.tmpl",
                &json!({ "project": { "namespace": "/api" }, "models": [{ "name": "JobHistory" }] }),
            )
            .unwrap();
        assert_eq!(out, "/api|job_histories ");
    }

    #[test]
    fn broken_override_is_a_template_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("db.go.tmpl"), "{% for %}").unwrap();

        assert!(matches!(
            Renderer::with_overrides(Some(dir.path())),
            Err(GeneratorError::TemplateFailed { template, .. }) if template == "db.go.tmpl"
        ));
    }

    #[test]
    fn undefined_variables_fail_rendering() {
        let renderer = Renderer::new().unwrap();
        assert!(matches!(
            renderer.render("handler.go.tmpl", &json!({})),
            Err(GeneratorError::TemplateFailed { .. })
        ));
    }
}
