//! Template rendering
//!
//! A thin wrapper around Tera. Templates live in a directory of `.html`
//! files; handlers hand over a template name and a context and get a page
//! body back.

use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tera::{Context, Tera};

/// Template engine
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Load all templates under `path`.
    pub fn new(path: &Path) -> Result<Self> {
        let glob = format!("{}/**/*.html", path.display());
        let tera = Tera::new(&glob)
            .with_context(|| format!("Failed to load templates from {:?}", path))?;
        Ok(Self { tera })
    }

    /// Render a template with the given context.
    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("Failed to render template {}", template))
    }
}
