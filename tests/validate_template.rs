//! Purpose: Library-level coverage for the validation pipeline.
//! Exports: Integration tests only.
//! Role: Verify end-to-end behavior and the diagnostic pairing invariant.
//! Invariants: Substitution failures resolve positions against the template
//! text; parse failures against the rendered text.

use serde_json::json;
use templint::{ErrorKind, TemplateContext, render_source, validate_file, validate_source};

#[test]
fn valid_template_yields_the_parsed_value() {
    let context = TemplateContext::new().with_value("Prompt", "hello");
    let value = validate_source(r#"{"prompt": "{{Prompt}}"}"#, &context).expect("validate");
    assert_eq!(value, json!({"prompt": "hello"}));
}

#[test]
fn full_context_round_trips_through_the_pipeline() {
    let context = TemplateContext::new()
        .with_value("Prompt", "a fox jumping")
        .with_value("Steps", "50")
        .with_value("ImagesCid", "bafybeihkoviema");
    let template = r#"{
  "prompt": "{{Prompt}}",
  "steps": {{Steps}},
  "images_cid": "{{ImagesCid}}"
}"#;
    let value = validate_source(template, &context).expect("validate");
    assert_eq!(
        value,
        json!({
            "prompt": "a fox jumping",
            "steps": 50,
            "images_cid": "bafybeihkoviema"
        })
    );
}

#[test]
fn non_numeric_value_points_at_the_unquoted_text() {
    let context = TemplateContext::new()
        .with_value("Prompt", "x")
        .with_value("Steps", "abc");
    let template = r#"{"prompt": "{{Prompt}}", "steps": {{Steps}}}"#;

    let rendered = render_source(template, &context).expect("render");
    let column = rendered.find("abc").expect("rendered abc") + 1;

    let err = validate_source(template, &context).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    let message = err.message().expect("message");
    assert!(
        message.starts_with(&format!("error in line 1, char {column}: ")),
        "unexpected message: {message}"
    );
    let location = err.location().expect("location");
    assert_eq!((location.line, location.column), (1, column));
}

#[test]
fn parse_failures_resolve_against_the_rendered_text() {
    // The template is a single line; the value expands to three. A diagnostic
    // on line 2 can only come from the rendered output.
    let context = TemplateContext::new().with_value("Body", "{\n \"a\": xyz\n}");
    let err = validate_source("{{Body}}", &context).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    let location = err.location().expect("location");
    assert_eq!(location.line, 2);
}

#[test]
fn undefined_placeholder_fails_substitution_without_a_position() {
    let err = validate_source(r#"{"a": "{{Missing}}"}"#, &TemplateContext::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Template);
    assert_eq!(err.offset(), None);
    assert_eq!(err.location(), None);
    let message = err.message().expect("message");
    assert!(
        !message.starts_with("error in line"),
        "substitution failure must not carry a fabricated position: {message}"
    );
}

#[test]
fn missing_template_file_surfaces_unannotated() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("absent.json.tmpl");
    let err = validate_file(&path, &TemplateContext::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.path(), Some(path.as_path()));
    assert_eq!(err.location(), None);
    let message = err.message().expect("message");
    assert!(!message.contains("error in line"));
}

#[test]
fn template_file_validates_from_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("module.json.tmpl");
    std::fs::write(&path, "{\"steps\": {{Steps}}}\n").expect("write");

    let context = TemplateContext::new().with_value("Steps", "50");
    let value = validate_file(&path, &context).expect("validate");
    assert_eq!(value, json!({"steps": 50}));
}

#[test]
fn multiline_template_diagnostics_land_on_the_right_line() {
    let context = TemplateContext::new()
        .with_value("Prompt", "x")
        .with_value("Steps", "abc");
    let template = "{\n  \"prompt\": \"{{Prompt}}\",\n  \"steps\": {{Steps}}\n}\n";

    let rendered = render_source(template, &context).expect("render");
    let err = validate_source(template, &context).unwrap_err();
    let location = err.location().expect("location");
    assert_eq!(location.line, 3);
    let line = rendered.lines().nth(2).expect("line 3");
    assert_eq!(location.column, line.find("abc").expect("value") + 1);
}
