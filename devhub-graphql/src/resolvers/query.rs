use super::ResolverContext;
use super::RootField;
use crate::error::ExecutionError;
use crate::json_ext::Value;
use crate::spec::FieldExpression;
use crate::store::UserRecord;

pub(super) fn me(context: &ResolverContext<'_>, field: &FieldExpression<'_>) -> Value {
    let Some(caller) = context.caller else {
        return Value::Null;
    };
    context
        .store
        .with_user(caller.id(), UserRecord::to_resolved)
        .map(|user| user.project(field.sub_selection))
        .unwrap_or(Value::Null)
}

/// Any user, whoever is asking.
pub(super) fn user(
    context: &ResolverContext<'_>,
    field: &FieldExpression<'_>,
) -> Result<Value, ExecutionError> {
    context.authenticated(RootField::User)?;
    Ok(field
        .argument("id")
        .and_then(|id| context.store.with_user(id, UserRecord::to_resolved))
        .map(|user| user.project(field.sub_selection))
        .unwrap_or(Value::Null))
}

/// The caller's own repositories. Ids without a record are skipped.
pub(super) fn repos(
    context: &ResolverContext<'_>,
    field: &FieldExpression<'_>,
) -> Result<Value, ExecutionError> {
    let caller = context.authenticated(RootField::Repos)?;
    Ok(Value::Array(
        caller
            .owned_repos()
            .iter()
            .filter_map(|id| context.store.repo(id))
            .map(|repo| repo.to_resolved().project(field.sub_selection))
            .collect(),
    ))
}

/// A single repository, subject to the authorization policy.
pub(super) fn repo(
    context: &ResolverContext<'_>,
    field: &FieldExpression<'_>,
) -> Result<Value, ExecutionError> {
    let caller = context.authenticated(RootField::Repo)?;
    let Some(repo) = field.argument("id").and_then(|id| context.store.repo(id)) else {
        return Ok(Value::Null);
    };
    if !context.policy.can_read_repo(caller, &repo.id) {
        tracing::debug!(caller = caller.id(), repo = %repo.id, "repository read refused");
        return Ok(Value::Null);
    }
    Ok(repo.to_resolved().project(field.sub_selection))
}
