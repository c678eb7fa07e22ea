use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationErrors, ValidationErrorsKind};

lazy_static! {
    /// Regex for validating optional phone fields
    /// Digits with optional leading `+` and single spaces, dashes or dots as separators
    /// - Valid: "+52 55 1234 5678", "55-1234-5678", "5512345678"
    /// - Invalid: "call me", "55--1234", "+", ""
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^\+?[0-9]+(?:[ .\-][0-9]+)*$").unwrap();
}

/// Flatten validator errors into one human readable line, field order stable.
///
/// Uses each rule's `message` when present, otherwise `"<field> is invalid"`.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let mut messages = Vec::new();
    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                messages.push(format_validation_errors(inner));
            }
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    messages.push(format_validation_errors(inner));
                }
            }
        }
    }

    messages.join("; ")
}
