//! JSON helpers shared by the response and resolver code.

use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
pub use serde_json_bytes::Value;

/// A JSON object.
pub type Object = Map<ByteString, Value>;

/// A JSON string.
pub(crate) fn string(value: &str) -> Value {
    Value::String(value.into())
}

/// A JSON string, or `null` when absent.
pub(crate) fn optional_string(value: Option<&str>) -> Value {
    value.map(string).unwrap_or(Value::Null)
}

/// A JSON array of strings.
pub(crate) fn string_list<I, S>(values: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Value::Array(
        values
            .into_iter()
            .map(|value| string(value.as_ref()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strings_and_lists() {
        assert_eq!(string("dev"), Value::from(json!("dev")));
        assert_eq!(optional_string(None), Value::Null);
        assert_eq!(optional_string(Some("x")), Value::from(json!("x")));
        assert_eq!(
            string_list(["frontend-app", "utils-lib"]),
            Value::from(json!(["frontend-app", "utils-lib"]))
        );
        assert_eq!(string_list(Vec::<String>::new()), Value::from(json!([])));
    }
}
