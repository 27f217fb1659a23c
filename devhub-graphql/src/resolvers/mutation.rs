use super::ResolverContext;
use super::RootField;
use crate::error::ExecutionError;
use crate::json_ext::Value;
use crate::spec::FieldExpression;
use crate::store::ADMIN_ROLE;

/// Change the caller's own email. An absent or empty `email` leaves it unchanged.
pub(super) fn update_profile(
    context: &ResolverContext<'_>,
    field: &FieldExpression<'_>,
) -> Result<Value, ExecutionError> {
    let caller = context.authenticated(RootField::UpdateProfile)?;
    let email = field.argument("email").filter(|email| !email.is_empty());

    Ok(context
        .store
        .update_user(caller.id(), |user| {
            if let Some(email) = email {
                user.email = email.to_string();
            }
            user.to_profile()
        })
        .map(|profile| profile.project(field.sub_selection))
        .unwrap_or(Value::Null))
}

/// Set the role of `userId` to `role`. Promotion to admin also grants every repository.
pub(super) fn promote_user(
    context: &ResolverContext<'_>,
    field: &FieldExpression<'_>,
) -> Result<Value, ExecutionError> {
    let caller = context.authenticated(RootField::PromoteUser)?;
    let requested = field.argument("role");
    if !context.policy.can_promote(caller, requested) {
        return Err(ExecutionError::Forbidden {
            field: RootField::PromoteUser.name().to_string(),
        });
    }

    let target = field.argument("userId");
    let all_repos: Vec<String> = if requested == Some(ADMIN_ROLE) {
        context.store.repo_ids().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let promoted = target
        .and_then(|target| {
            context.store.update_user(target, |user| {
                user.role = requested.map(str::to_string);
                if requested == Some(ADMIN_ROLE) {
                    user.repos = all_repos;
                }
                user.to_resolved()
            })
        })
        .ok_or_else(|| ExecutionError::TargetNotFound {
            id: target.map(str::to_string),
        })?;

    tracing::info!(
        caller = caller.id(),
        target,
        role = requested,
        "user role changed"
    );
    Ok(promoted.project(field.sub_selection))
}
