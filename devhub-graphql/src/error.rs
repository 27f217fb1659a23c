//! Engine errors.
use displaydoc::Display;
use http::StatusCode;
use thiserror::Error;

pub use crate::configuration::ConfigurationError;
use crate::graphql;
use crate::graphql::Response;

/// Error types for execution.
///
/// Every variant aborts the whole call. They are returned to the client as the single entry of
/// [`Response::errors`]. Malformed field expressions are not errors: they are dropped.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExecutionError {
    /// Query required
    DocumentEmpty,

    /// Could not parse query
    DocumentUnparseable,

    /// Authentication required
    Unauthenticated {
        /// The root field that needed a caller.
        field: String,
    },

    /// User not found
    TargetNotFound {
        /// The requested target id, if the argument was present.
        id: Option<String>,
    },

    /// Not authorized
    Forbidden {
        /// The root field that was refused.
        field: String,
    },
}

impl ExecutionError {
    /// Convert the execution error to a GraphQL error.
    pub fn to_graphql_error(&self) -> graphql::Error {
        graphql::Error::new(self.to_string())
    }

    /// The HTTP status a host should answer with when this error ends a call.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExecutionError::DocumentEmpty | ExecutionError::DocumentUnparseable => {
                StatusCode::BAD_REQUEST
            }
            ExecutionError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            ExecutionError::Forbidden { .. } => StatusCode::FORBIDDEN,
            // The target lookup happens after the request was accepted.
            ExecutionError::TargetNotFound { .. } => StatusCode::OK,
        }
    }
}

impl From<ExecutionError> for Response {
    fn from(err: ExecutionError) -> Self {
        Response::builder().error(err.to_graphql_error()).build()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn messages() {
        assert_eq!(ExecutionError::DocumentEmpty.to_string(), "Query required");
        assert_eq!(
            ExecutionError::DocumentUnparseable.to_string(),
            "Could not parse query"
        );
        assert_eq!(
            ExecutionError::Unauthenticated {
                field: "repos".to_string()
            }
            .to_string(),
            "Authentication required"
        );
        assert_eq!(
            ExecutionError::TargetNotFound {
                id: Some("dev-404".to_string())
            }
            .to_string(),
            "User not found"
        );
        assert_eq!(
            ExecutionError::Forbidden {
                field: "promoteUser".to_string()
            }
            .to_string(),
            "Not authorized"
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ExecutionError::DocumentEmpty.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExecutionError::Unauthenticated {
                field: "user".to_string()
            }
            .status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ExecutionError::TargetNotFound { id: None }.status_code(),
            StatusCode::OK
        );
    }

    #[test]
    fn into_response() {
        let response = Response::from(ExecutionError::DocumentUnparseable);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "errors": [{ "message": "Could not parse query" }] })
        );
    }
}
