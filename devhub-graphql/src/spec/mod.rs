//! Document handling: classification, field expressions, selections and the static schema.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

mod document;
mod field;
mod scanner;
pub(crate) mod schema;
mod selection;

pub(crate) use document::Document;
pub(crate) use document::OperationKind;
pub(crate) use field::FieldExpression;
pub(crate) use scanner::split_selections;
pub(crate) use selection::*;

/// Characters allowed in field, argument and operation names.
pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `s` after its leading run of name characters.
pub(crate) fn take_name(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_name_char(c)).unwrap_or(s.len());
    s.split_at(end)
}
