//! The execution driver.

use std::sync::Arc;

use crate::authorization::AuthorizationPolicy;
use crate::authorization::PermissivePolicy;
use crate::configuration::Configuration;
use crate::context::Caller;
use crate::context::CallerLookup;
use crate::error::ExecutionError;
use crate::graphql::Request;
use crate::graphql::Response;
use crate::introspection::Introspection;
use crate::json_ext::Object;
use crate::json_ext::Value;
use crate::resolvers::ResolverContext;
use crate::resolvers::RootField;
use crate::spec::split_selections;
use crate::spec::Document;
use crate::spec::FieldExpression;
use crate::spec::OperationKind;
use crate::store::Store;

/// Executes documents against a shared [`Store`].
///
/// Each call runs to completion on the calling thread. Calls may run concurrently from several
/// threads; mutations of the same user are serialized by the store.
#[derive(Clone, Debug)]
pub struct Executor {
    store: Arc<Store>,
    policy: Arc<dyn AuthorizationPolicy>,
    introspection: Introspection,
}

impl Executor {
    /// An executor with the permissive policy.
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            policy: Arc::new(PermissivePolicy),
            introspection: Introspection::new(),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn AuthorizationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// A fresh store seeded from `configuration`, with the configured policy.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(Arc::new(Store::from(&configuration.seed)))
            .with_policy(configuration.authorization.mode.policy())
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Execute `request` on behalf of `caller`.
    pub fn execute(&self, request: &Request, caller: Option<&Caller>) -> Response {
        match self.try_execute(request, caller) {
            Ok(data) => Response::builder().data(Value::Object(data)).build(),
            Err(err) => {
                tracing::debug!(error = %err, status = %err.status_code(), "execution failed");
                err.into()
            }
        }
    }

    /// Execute `request` on behalf of whoever holds `token`.
    ///
    /// The caller is looked up once, before execution starts.
    pub fn execute_with_session(
        &self,
        request: &Request,
        sessions: &dyn CallerLookup,
        token: Option<&str>,
    ) -> Response {
        let caller = token.and_then(|token| sessions.lookup(token));
        self.execute(request, caller.as_ref())
    }

    fn try_execute(
        &self,
        request: &Request,
        caller: Option<&Caller>,
    ) -> Result<Object, ExecutionError> {
        let text = request
            .query
            .as_deref()
            .filter(|query| !query.is_empty())
            .ok_or(ExecutionError::DocumentEmpty)?;
        let document = Document::parse(text).ok_or(ExecutionError::DocumentUnparseable)?;

        let span = tracing::info_span!(
            "execute",
            "graphql.operation.kind" = %document.kind,
            "graphql.operation.name" = document.name,
            caller = caller.map(Caller::id),
        );
        let _guard = span.enter();

        if document.kind == OperationKind::Introspection {
            return Ok(self.introspection.execute());
        }
        if let Some(variables) = document.variables {
            tracing::trace!(variables, "variable definitions are not interpreted");
        }

        let context = ResolverContext {
            store: &self.store,
            policy: self.policy.as_ref(),
            caller,
        };

        let mut data = Object::new();
        for unit in split_selections(document.body) {
            let Some(field) = FieldExpression::parse(unit) else {
                tracing::debug!(unit, "skipping malformed field expression");
                continue;
            };
            let Some(root) = RootField::for_operation(document.kind, field.name) else {
                tracing::debug!(field = field.name, "skipping unknown root field");
                continue;
            };
            if root.requires_authentication() && caller.is_none() {
                tracing::warn!(field = root.name(), "unauthenticated access attempt");
                return Err(ExecutionError::Unauthenticated {
                    field: root.name().to_string(),
                });
            }

            let value = root.resolve(&context, &field)?;
            data.insert(root.name(), value);
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_log::test;

    use super::*;

    fn executor() -> Executor {
        Executor::new(Arc::new(Store::default()))
    }

    fn run(executor: &Executor, query: &str, caller: Option<&str>) -> serde_json::Value {
        let caller = caller.and_then(|id| executor.store().caller(id));
        serde_json::to_value(executor.execute(&Request::new(query), caller.as_ref())).unwrap()
    }

    #[test]
    fn missing_and_empty_documents() {
        let executor = executor();
        let expected = json!({ "errors": [{ "message": "Query required" }] });
        assert_eq!(
            serde_json::to_value(executor.execute(&Request::default(), None)).unwrap(),
            expected
        );
        assert_eq!(run(&executor, "", None), expected);
    }

    #[test]
    fn whitespace_document_is_unparseable() {
        assert_eq!(
            run(&executor(), "   ", None),
            json!({ "errors": [{ "message": "Could not parse query" }] })
        );
    }

    #[test]
    fn me_without_caller() {
        assert_eq!(
            run(&executor(), "{ me }", None),
            json!({ "data": { "me": null } })
        );
    }

    #[test]
    fn empty_selection() {
        assert_eq!(run(&executor(), "{ }", None), json!({ "data": {} }));
    }

    #[test]
    fn unknown_and_malformed_fields_are_skipped() {
        assert_eq!(
            run(
                &executor(),
                "{ me { email }, orders, repo-list, promoteUser(userId: \"dev-001\") }",
                Some("dev-001")
            ),
            json!({ "data": { "me": { "email": "dev@devhub.io" } } })
        );
    }

    #[test]
    fn authentication_aborts_the_whole_call() {
        assert_eq!(
            run(&executor(), "{ me\n repos { id } }", None),
            json!({ "errors": [{ "message": "Authentication required" }] })
        );
    }

    #[test]
    fn duplicate_fields_keep_the_last_value() {
        assert_eq!(
            run(
                &executor(),
                "{ user(id: \"dev-001\") { id }, me { id }, user(id: \"dev-002\") { id } }",
                Some("dev-003")
            ),
            json!({ "data": { "user": { "id": "dev-002" }, "me": { "id": "dev-003" } } })
        );
    }

    #[test]
    fn introspection_needs_no_caller() {
        let response = run(&executor(), "query { __type(name: \"Repo\") { name } }", None);
        assert_eq!(response["data"]["__schema"]["queryType"], json!({ "name": "Query" }));
    }

    #[test]
    fn earlier_mutations_stay_applied() {
        let executor = executor();
        assert_eq!(
            run(
                &executor,
                "mutation { updateProfile(email: \"x@devhub.io\") { email }\n promoteUser(userId: \"nobody\", role: \"admin\") }",
                Some("dev-001")
            ),
            json!({ "errors": [{ "message": "User not found" }] })
        );
        assert_eq!(executor.store().user("dev-001").unwrap().email, "x@devhub.io");
    }

    #[test]
    fn promotion_arguments_stay_in_one_field() {
        let executor = executor();
        assert_eq!(
            run(
                &executor,
                "mutation { promoteUser(userId: \"dev-001\", role: \"admin\") { role, repos }, updateProfile(email: \"a@devhub.io\") { email } }",
                Some("dev-001")
            ),
            json!({ "data": {
                "promoteUser": {
                    "role": "admin",
                    "repos": ["frontend-app", "utils-lib", "backend-api", "infra-secrets"]
                },
                "updateProfile": { "email": "a@devhub.io" }
            } })
        );
        assert_eq!(executor.store().user("dev-001").unwrap().role.as_deref(), Some("admin"));
    }

    #[test]
    fn enforced_configuration() {
        let configuration: Configuration = "authorization:\n  mode: enforced\n".parse().unwrap();
        let executor = Executor::from_configuration(&configuration);
        assert_eq!(
            run(
                &executor,
                "mutation { promoteUser(userId: \"dev-001\", role: \"admin\") { role } }",
                Some("dev-001")
            ),
            json!({ "errors": [{ "message": "Not authorized" }] })
        );
    }
}
