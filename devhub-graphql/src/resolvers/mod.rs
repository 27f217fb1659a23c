//! Root field resolvers.

mod mutation;
mod query;

use crate::authorization::AuthorizationPolicy;
use crate::context::Caller;
use crate::error::ExecutionError;
use crate::json_ext::Value;
use crate::spec::FieldExpression;
use crate::spec::OperationKind;
use crate::store::Store;

/// A root field of the query or the mutation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum RootField {
    Me,
    User,
    Repos,
    Repo,
    UpdateProfile,
    PromoteUser,
}

impl RootField {
    /// The root field `name` of an operation of kind `kind`.
    ///
    /// Query fields are not reachable from a mutation and mutation fields are not reachable
    /// from a query.
    pub(crate) fn for_operation(kind: OperationKind, name: &str) -> Option<Self> {
        match (kind, name) {
            (OperationKind::Query, "me") => Some(RootField::Me),
            (OperationKind::Query, "user") => Some(RootField::User),
            (OperationKind::Query, "repos") => Some(RootField::Repos),
            (OperationKind::Query, "repo") => Some(RootField::Repo),
            (OperationKind::Mutation, "updateProfile") => Some(RootField::UpdateProfile),
            (OperationKind::Mutation, "promoteUser") => Some(RootField::PromoteUser),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            RootField::Me => "me",
            RootField::User => "user",
            RootField::Repos => "repos",
            RootField::Repo => "repo",
            RootField::UpdateProfile => "updateProfile",
            RootField::PromoteUser => "promoteUser",
        }
    }

    /// `me` answers `null` to anonymous callers; every other root field aborts the call.
    pub(crate) fn requires_authentication(self) -> bool {
        !matches!(self, RootField::Me)
    }

    pub(crate) fn resolve(
        self,
        context: &ResolverContext<'_>,
        field: &FieldExpression<'_>,
    ) -> Result<Value, ExecutionError> {
        match self {
            RootField::Me => Ok(query::me(context, field)),
            RootField::User => query::user(context, field),
            RootField::Repos => query::repos(context, field),
            RootField::Repo => query::repo(context, field),
            RootField::UpdateProfile => mutation::update_profile(context, field),
            RootField::PromoteUser => mutation::promote_user(context, field),
        }
    }
}

/// What a resolver may consult.
pub(crate) struct ResolverContext<'a> {
    pub(crate) store: &'a Store,
    pub(crate) policy: &'a dyn AuthorizationPolicy,
    pub(crate) caller: Option<&'a Caller>,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn authenticated(&self, root: RootField) -> Result<&'a Caller, ExecutionError> {
        self.caller.ok_or_else(|| ExecutionError::Unauthenticated {
            field: root.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_fields_are_bound_to_their_operation() {
        assert_eq!(
            RootField::for_operation(OperationKind::Query, "repo"),
            Some(RootField::Repo)
        );
        assert_eq!(
            RootField::for_operation(OperationKind::Mutation, "repo"),
            None
        );
        assert_eq!(
            RootField::for_operation(OperationKind::Query, "promoteUser"),
            None
        );
        assert_eq!(
            RootField::for_operation(OperationKind::Introspection, "me"),
            None
        );
        assert_eq!(RootField::for_operation(OperationKind::Query, "Me"), None);
    }

    #[test]
    fn names_round_trip() {
        for (kind, root) in [
            (OperationKind::Query, RootField::Me),
            (OperationKind::Query, RootField::User),
            (OperationKind::Query, RootField::Repos),
            (OperationKind::Query, RootField::Repo),
            (OperationKind::Mutation, RootField::UpdateProfile),
            (OperationKind::Mutation, RootField::PromoteUser),
        ] {
            assert_eq!(RootField::for_operation(kind, root.name()), Some(root));
            assert_eq!(root.requires_authentication(), root != RootField::Me);
        }
    }
}
