//! Purpose: Template-engine boundary for placeholder substitution.
//! Exports: `render`.
//! Role: Single seam for the engine so callsites avoid ad hoc render logic.
//! Invariants: Strict mode is on; an undefined placeholder fails the render
//! instead of expanding to empty text.
//! Invariants: Output is raw text destined for a JSON parser, so the engine's
//! HTML escaping is disabled.
//! Notes: The engine's public API reports render failures as messages without
//! a byte offset, so substitution errors reach the annotator offset-free and
//! pass through unannotated.

use handlebars::{Handlebars, no_escape};

use crate::core::error::{Error, ErrorKind};
use crate::core::validate::TemplateContext;

pub(crate) fn render(template: &str, context: &TemplateContext) -> Result<String, Error> {
    let mut engine = Handlebars::new();
    engine.set_strict_mode(true);
    engine.register_escape_fn(no_escape);
    engine
        .render_template(template, context.values())
        .map_err(|err| Error::new(ErrorKind::Template).with_message(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::core::error::ErrorKind;
    use crate::core::validate::TemplateContext;

    #[test]
    fn placeholders_substitute_from_the_context() {
        let context = TemplateContext::new()
            .with_value("Prompt", "hello")
            .with_value("Steps", "50");
        let rendered = render(r#"{"prompt": "{{Prompt}}", "steps": {{Steps}}}"#, &context)
            .expect("render");
        assert_eq!(rendered, r#"{"prompt": "hello", "steps": 50}"#);
    }

    #[test]
    fn undefined_placeholders_fail_in_strict_mode() {
        let err = render(r#"{"a": "{{Missing}}"}"#, &TemplateContext::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn values_are_not_html_escaped() {
        let context = TemplateContext::new().with_value("Cid", "a&b<c>");
        let rendered = render(r#"{"cid": "{{Cid}}"}"#, &context).expect("render");
        assert_eq!(rendered, r#"{"cid": "a&b<c>"}"#);
    }

    #[test]
    fn malformed_template_syntax_is_a_template_error() {
        let err = render("{{#if}", &TemplateContext::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
    }
}
