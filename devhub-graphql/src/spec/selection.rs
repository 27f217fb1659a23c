use std::borrow::Cow;

use crate::json_ext::Object;
use crate::json_ext::Value;
use crate::spec::split_selections;

/// A field of an object type, as named in a selection.
pub(crate) trait FieldSelector: Copy + Eq + 'static {
    /// The schema type this selector belongs to.
    const TYPE_NAME: &'static str;

    /// Every field, in schema order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

macro_rules! field_selector {
    ($(#[$meta:meta])* $selector:ident for $type_name:literal { $($variant:ident => $name:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub(crate) enum $selector {
            $($variant),+
        }

        impl FieldSelector for $selector {
            const TYPE_NAME: &'static str = $type_name;
            const ALL: &'static [Self] = &[$($selector::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($selector::$variant => $name),+
                }
            }
        }
    };
}

field_selector! {
    /// Fields of `User`.
    UserField for "User" {
        Id => "id",
        Username => "username",
        Email => "email",
        Role => "role",
        Repos => "repos",
    }
}

field_selector! {
    /// Fields of `Repo`.
    RepoField for "Repo" {
        Id => "id",
        Name => "name",
        Stars => "stars",
        Language => "language",
        IsPrivate => "isPrivate",
        Flag => "flag",
    }
}

/// A resolved object: its fields and their values, in output order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Resolved<F> {
    entries: Vec<(F, Value)>,
}

impl<F: FieldSelector> Resolved<F> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn with(mut self, field: F, value: Value) -> Self {
        self.entries.push((field, value));
        self
    }

    fn get(&self, field: F) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(candidate, value)| (*candidate == field).then_some(value))
    }

    pub(crate) fn into_object(self) -> Object {
        self.entries
            .into_iter()
            .map(|(field, value)| (field.name().into(), value))
            .collect()
    }

    /// Keep only the fields named by `sub_selection`.
    ///
    /// Only leaf names are honoured: a nested `{ ... }` in a unit is cut out first. Unknown names
    /// and fields this object does not carry are skipped, and when nothing is left the whole
    /// object is returned.
    pub(crate) fn project(self, sub_selection: Option<&str>) -> Value {
        let Some(sub_selection) = sub_selection else {
            return Value::Object(self.into_object());
        };

        let mut projected = Object::new();
        for unit in split_selections(sub_selection) {
            let leaf = without_nested_selection(unit);
            let Some(field) = F::from_name(leaf.trim()) else {
                continue;
            };
            if let Some(value) = self.get(field) {
                projected.insert(field.name(), value.clone());
            }
        }

        if projected.is_empty() {
            tracing::debug!(
                type_name = F::TYPE_NAME,
                sub_selection,
                "no selected field matched, returning every field"
            );
            Value::Object(self.into_object())
        } else {
            Value::Object(projected)
        }
    }
}

/// Cut the first `{` through the last `}` of the same line.
///
/// A `{` with no closing brace later on its line is left alone and the next one is tried. Lines
/// end at `\n`, `\r`, U+2028 and U+2029.
fn without_nested_selection(unit: &str) -> Cow<'_, str> {
    for (open, _) in unit.match_indices('{') {
        let line_end = unit[open..]
            .find(is_line_terminator)
            .map_or(unit.len(), |end| open + end);
        if let Some(close) = unit[open..line_end].rfind('}') {
            let close = open + close;
            return Cow::Owned(format!("{}{}", &unit[..open], &unit[close + 1..]));
        }
    }
    Cow::Borrowed(unit)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
