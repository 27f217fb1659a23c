use indexmap::IndexMap;

use crate::spec::is_name_char;
use crate::spec::take_name;

/// One top-level unit of a selection body, such as `repo(id: "utils-lib") { id name }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldExpression<'a> {
    pub(crate) name: &'a str,
    /// String-literal arguments. Other argument syntax is ignored.
    pub(crate) arguments: IndexMap<&'a str, &'a str>,
    /// The raw text between the braces, `None` when absent or empty.
    pub(crate) sub_selection: Option<&'a str>,
}

impl<'a> FieldExpression<'a> {
    /// Parse `name ( "(" args ")" )? ( "{" sub "}" )?` against the whole unit.
    ///
    /// Returns `None` when the unit does not have that shape; such units are ignored.
    pub(crate) fn parse(unit: &'a str) -> Option<Self> {
        let (name, rest) = take_name(unit);
        if name.is_empty() {
            return None;
        }

        let rest = rest.trim_start();
        let (arguments, rest) = match rest.strip_prefix('(') {
            Some(rest) => {
                let (arguments, rest) = rest.split_once(')')?;
                (string_arguments(arguments), rest.trim_start())
            }
            None => (IndexMap::new(), rest),
        };

        let sub_selection = if rest.is_empty() {
            None
        } else {
            let sub = rest.strip_prefix('{')?.strip_suffix('}')?;
            (!sub.is_empty()).then_some(sub)
        };

        Some(FieldExpression {
            name,
            arguments,
            sub_selection,
        })
    }

    pub(crate) fn argument(&self, name: &str) -> Option<&'a str> {
        self.arguments.get(name).copied()
    }
}

/// Every `key <ws>* : <ws>* "value"` in `arguments`, scanned left to right.
///
/// Values have no escapes and end at the next `"`. A repeated key keeps its first position and
/// its last value.
fn string_arguments(arguments: &str) -> IndexMap<&str, &str> {
    let mut found = IndexMap::new();
    let mut position = 0;
    while position < arguments.len() {
        match string_argument(&arguments[position..]) {
            Some((key, value, consumed)) => {
                found.insert(key, value);
                position += consumed;
            }
            None => {
                position += arguments[position..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            }
        }
    }
    found
}

/// A single argument at the very start of `s`, with the number of bytes it spans.
fn string_argument(s: &str) -> Option<(&str, &str, usize)> {
    let key_end = s.find(|c: char| !is_name_char(c)).unwrap_or(s.len());
    if key_end == 0 {
        return None;
    }
    let key = &s[..key_end];

    let rest = s[key_end..].trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let (value, after) = rest.split_once('"')?;

    Some((key, value, s.len() - after.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_field() {
        let field = FieldExpression::parse("me").unwrap();
        assert_eq!(field.name, "me");
        assert!(field.arguments.is_empty());
        assert_eq!(field.sub_selection, None);
    }

    #[test]
    fn arguments_and_sub_selection() {
        let field = FieldExpression::parse(
            "promoteUser(userId: \"dev-001\", role: \"admin\") { id role repos }",
        )
        .unwrap();
        assert_eq!(field.name, "promoteUser");
        assert_eq!(field.argument("userId"), Some("dev-001"));
        assert_eq!(field.argument("role"), Some("admin"));
        assert_eq!(field.sub_selection, Some(" id role repos "));
    }

    #[test]
    fn whitespace_between_parts() {
        let field = FieldExpression::parse("repo (id:\"utils-lib\")\n{\nname\n}").unwrap();
        assert_eq!(field.argument("id"), Some("utils-lib"));
        assert_eq!(field.sub_selection, Some("\nname\n"));
    }

    #[test]
    fn empty_braces_are_no_sub_selection() {
        assert_eq!(FieldExpression::parse("me {}").unwrap().sub_selection, None);
        assert_eq!(
            FieldExpression::parse("me { }").unwrap().sub_selection,
            Some(" ")
        );
    }

    #[test]
    fn non_string_arguments_are_dropped() {
        let field =
            FieldExpression::parse("user(id: $id, limit: 3, email: \"\", id2 : \"x,y\")").unwrap();
        assert_eq!(field.argument("id"), None);
        assert_eq!(field.argument("limit"), None);
        assert_eq!(field.argument("email"), Some(""));
        assert_eq!(field.argument("id2"), Some("x,y"));
    }

    #[test]
    fn later_duplicates_win() {
        let field = FieldExpression::parse("user(id: \"dev-001\" id: \"dev-002\")").unwrap();
        assert_eq!(field.argument("id"), Some("dev-002"));
        assert_eq!(field.arguments.len(), 1);
    }

    #[test]
    fn malformed_units() {
        for unit in [
            "",
            "{ id }",
            "repo-name",
            "user(id: \"dev-001\"",
            "me { id } extra",
            "me { id",
            "two words",
        ] {
            assert_eq!(FieldExpression::parse(unit), None, "{unit}");
        }
    }
}
