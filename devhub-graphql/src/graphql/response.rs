use serde::Deserialize;
use serde::Serialize;

use crate::graphql::Error;
use crate::json_ext::Value;

/// A GraphQL response.
///
/// Exactly one of `data` and `errors` is set: a call either produces a result tree or fails as
/// a whole.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The response data.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Value>,

    /// The errors that aborted the call.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<Error>,
}

#[buildstructor::buildstructor]
impl Response {
    /// Constructor
    #[builder(visibility = "pub")]
    fn new(data: Option<Value>, errors: Vec<Error>) -> Self {
        Self { data, errors }
    }

    /// Whether the call produced a result tree.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_json_snapshot;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_data_is_still_serialized() {
        let response = Response::builder()
            .data(Value::Object(Default::default()))
            .build();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "data": {} })
        );
        assert!(response.is_success());
    }

    #[test]
    fn errors_only() {
        let response = Response::builder()
            .error(Error::new("Authentication required"))
            .build();
        assert!(!response.is_success());
        assert_json_snapshot!(response, @r###"
        {
          "errors": [
            {
              "message": "Authentication required"
            }
          ]
        }
        "###);
    }

    #[test]
    fn test_response() {
        let result = serde_json::from_str::<Response>(
            json!({ "data": { "me": { "email": "dev@devhub.io" } } })
                .to_string()
                .as_str(),
        );
        assert_eq!(
            result.unwrap(),
            Response::builder()
                .data(Value::from(json!({ "me": { "email": "dev@devhub.io" } })))
                .build()
        );
    }
}
