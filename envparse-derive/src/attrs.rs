//! Annotation extraction for `#[env("...")]` attributes.
//!
//! The attribute payload is a single string literal carrying the annotation
//! grammar (`VAR` or `name=VAR,parser=transformer`). This module only
//! extracts the raw text; interpreting it is the job of the runtime
//! directive parser, once per populate call.

use syn::{Field, LitStr};

/// Extract the raw annotation text from a field's `#[env("...")]` attribute.
///
/// Returns `None` when the field carries no `env` attribute. Attributes
/// whose payload is not a single string literal are skipped rather than
/// rejected.
pub fn annotation(field: &Field) -> Option<String> {
    for attr in &field.attrs {
        if !attr.path().is_ident("env") {
            continue;
        }

        if let Ok(lit) = attr.parse_args::<LitStr>() {
            return Some(lit.value());
        }
    }

    None
}
