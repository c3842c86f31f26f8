//! Purpose: Orchestrate template validation: load, substitute, parse, annotate.
//! Exports: `TemplateContext`, `validate_file`, `validate_source`, `render_file`,
//! `render_source`.
//! Role: The linear pipeline tying the engine and parser seams to annotation.
//! Invariants: Substitution failures are annotated against the template text;
//! parse failures against the rendered text. The two never cross.
//! Invariants: Load failures carry the path and no position annotation.
//! Invariants: No retries, no recovery; each failure is annotated exactly once.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::core::annotate::annotate;
use crate::core::error::{Error, ErrorKind};
use crate::{json, template};

/// Named values substituted into a template. Keys are unique by construction;
/// values are text-renderable scalars (a prompt, a step count as text, a
/// content identifier).
#[derive(Clone, Debug, Default)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion; later writes win.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert a value, returning the previous one when the key was present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read a template from disk and run the full validation pipeline.
pub fn validate_file(path: &Path, context: &TemplateContext) -> Result<Value, Error> {
    let template = load(path)?;
    validate_source(&template, context)
}

/// Substitute `context` into `template` and parse the output as JSON.
pub fn validate_source(template: &str, context: &TemplateContext) -> Result<Value, Error> {
    let rendered = render_source(template, context)?;
    debug!(bytes = rendered.len(), "template rendered");
    let value = json::parse::from_str(&rendered).map_err(|err| annotate(&rendered, err))?;
    debug!("rendered output parsed as JSON");
    Ok(value)
}

/// Read a template from disk and run the substitution step alone.
pub fn render_file(path: &Path, context: &TemplateContext) -> Result<String, Error> {
    let template = load(path)?;
    render_source(&template, context)
}

/// The substitution step alone; failures are annotated against the template
/// text, the text their offsets (when present) are relative to.
pub fn render_source(template: &str, context: &TemplateContext) -> Result<String, Error> {
    template::render(template, context).map_err(|err| annotate(template, err))
}

fn load(path: &Path) -> Result<String, Error> {
    debug!(path = %path.display(), "loading template");
    fs::read_to_string(path).map_err(|err| {
        let kind = if err.kind() == io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("failed to read template")
            .with_path(path)
            .with_source(err)
    })
}
