/// Split a selection body into its top-level field expressions.
///
/// Units are separated by `,` or a newline outside any braces and argument parentheses. Neither
/// depth is clamped, so a stray `}` or `)` suppresses splitting until it is balanced again.
/// Braces and parentheses inside string literals count. Units are trimmed and empty units dropped.
pub(crate) fn split_selections(body: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut depth: isize = 0;
    let mut arguments: isize = 0;
    let mut start = 0;

    for (index, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            '(' => arguments += 1,
            ')' => arguments -= 1,
            ',' | '\n' if depth == 0 && arguments == 0 => {
                push_unit(&mut units, &body[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    push_unit(&mut units, &body[start..]);

    units
}

fn push_unit<'a>(units: &mut Vec<&'a str>, unit: &'a str) {
    let unit = unit.trim();
    if !unit.is_empty() {
        units.push(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_top_level_only() {
        assert_eq!(
            split_selections(r#"a { x y }, b(id: "1") { z }"#),
            ["a { x y }", r#"b(id: "1") { z }"#]
        );
        assert_eq!(
            split_selections("me {\n  id\n  email\n}\nrepos { id, name }"),
            ["me {\n  id\n  email\n}", "repos { id, name }"]
        );
    }

    #[test]
    fn spaces_do_not_split() {
        assert_eq!(split_selections("id username email"), ["id username email"]);
    }

    #[test]
    fn empty_units_are_dropped() {
        assert!(split_selections("").is_empty());
        assert!(split_selections(" ,\n, ").is_empty());
        assert_eq!(split_selections(",,me,,"), ["me"]);
    }

    #[test]
    fn unbalanced_braces() {
        // A stray closing brace keeps depth below zero for the rest of the body.
        assert_eq!(split_selections("a }, b, c"), ["a }, b, c"]);
        assert_eq!(split_selections("a } {, b"), ["a } {", "b"]);
        // An unclosed brace swallows everything after it.
        assert_eq!(split_selections("a {, b, c"), ["a {, b, c"]);
    }

    #[test]
    fn argument_lists_do_not_split() {
        assert_eq!(
            split_selections(r#"promoteUser(userId: "a", role: "b") { role }, me"#),
            [r#"promoteUser(userId: "a", role: "b") { role }"#, "me"]
        );
        assert_eq!(
            split_selections("user(\n  id: \"dev-001\"\n) { id }\nme"),
            ["user(\n  id: \"dev-001\"\n) { id }", "me"]
        );
        // An unclosed argument list swallows everything after it.
        assert_eq!(split_selections(r#"user(id: "a", me"#), [r#"user(id: "a", me"#]);
    }

    #[test]
    fn braces_in_string_literals_count() {
        assert_eq!(
            split_selections(r#"user(id: "{"), me"#),
            [r#"user(id: "{"), me"#]
        );
    }
}
