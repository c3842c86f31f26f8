//! Purpose: Shared library crate used by the `templint` CLI and tests.
//! Exports: `core` (locator, annotator, pipeline, errors) plus flat re-exports.
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Treat the crate API as internal until a dedicated library release.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod core;
mod json;
mod template;

pub use crate::core::annotate::annotate;
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::locate::{Location, locate};
pub use crate::core::validate::{
    TemplateContext, render_file, render_source, validate_file, validate_source,
};
