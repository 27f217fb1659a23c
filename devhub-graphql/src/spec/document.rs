use std::fmt;

use crate::spec::take_name;

const INTROSPECTION_MARKERS: [&str; 2] = ["__schema", "__type"];

/// The kind of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum OperationKind {
    Introspection,
    Query,
    Mutation,
}

impl OperationKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OperationKind::Introspection => "introspection",
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified document, borrowing from the request text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Document<'a> {
    pub(crate) kind: OperationKind,
    /// Operation name, used for logging only.
    pub(crate) name: Option<&'a str>,
    /// Raw variable definitions, never interpreted.
    pub(crate) variables: Option<&'a str>,
    /// The trimmed text between the outer braces. Empty for introspection.
    pub(crate) body: &'a str,
}

impl<'a> Document<'a> {
    /// Classify a document, or `None` if it has neither the query nor the mutation shape.
    ///
    /// Any mention of `__schema` or `__type` makes the document an introspection request,
    /// wherever it appears.
    pub(crate) fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim();

        if INTROSPECTION_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
        {
            return Some(Document {
                kind: OperationKind::Introspection,
                name: None,
                variables: None,
                body: "",
            });
        }

        if let Some(rest) = text.strip_prefix("mutation") {
            return operation(OperationKind::Mutation, rest);
        }
        if let Some(rest) = text.strip_prefix("query") {
            return operation(OperationKind::Query, rest);
        }

        Some(Document {
            kind: OperationKind::Query,
            name: None,
            variables: None,
            body: braced_body(text)?,
        })
    }
}

/// `<name>? ( "(" <variables> ")" )? "{" <body> "}"`, whitespace allowed between the parts.
fn operation(kind: OperationKind, header: &str) -> Option<Document<'_>> {
    let (name, rest) = take_name(header.trim_start());

    let rest = rest.trim_start();
    let (variables, rest) = match rest.strip_prefix('(') {
        Some(rest) => {
            let (variables, rest) = rest.split_once(')')?;
            (Some(variables), rest.trim_start())
        }
        None => (None, rest),
    };

    Some(Document {
        kind,
        name: (!name.is_empty()).then_some(name),
        variables,
        body: braced_body(rest)?,
    })
}

/// The trimmed text between a leading `{` and the final `}`.
fn braced_body(s: &str) -> Option<&str> {
    s.strip_prefix('{')?.strip_suffix('}').map(str::trim)
}
