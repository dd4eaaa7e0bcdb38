//! Template engine for the server-rendered pages, using Jinja2 syntax.
//!
//! Page templates live in `templates/pages/` and are compiled into the
//! binary, so a deployed server never depends on its working directory.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::core::error::AppError;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Page templates embedded at compile time, keyed by template name
const PAGE_TEMPLATES: &[(&str, &str)] = &[
    (
        "base.jinja",
        include_str!("../../../templates/pages/base.jinja"),
    ),
    (
        "index.jinja",
        include_str!("../../../templates/pages/index.jinja"),
    ),
    (
        "peta.jinja",
        include_str!("../../../templates/pages/peta.jinja"),
    ),
    (
        "laporan.jinja",
        include_str!("../../../templates/pages/laporan.jinja"),
    ),
    (
        "review.jinja",
        include_str!("../../../templates/pages/review.jinja"),
    ),
    (
        "admin.jinja",
        include_str!("../../../templates/pages/admin.jinja"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::Internal(e.to_string())
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for (name, source) in PAGE_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with a serializable context
pub fn render_page<C: Serialize>(template_name: &str, ctx: &C) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_page_templates_load() {
        let env = get_environment();
        for (name, _) in PAGE_TEMPLATES {
            assert!(env.get_template(name).is_ok(), "template {} missing", name);
        }
    }

    #[test]
    fn test_unknown_template() {
        let result = render_page("definitely_not_a_page.jinja", &());
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }
}
