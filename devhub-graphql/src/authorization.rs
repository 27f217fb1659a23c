//! Authorization policies consulted by the resolvers.

use std::fmt::Debug;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::context::Caller;
use crate::store::ADMIN_ROLE;

/// Which policy the executor installs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationMode {
    /// Any authenticated caller may read any repository and promote any user.
    #[default]
    Permissive,

    /// Repository reads are limited to owned repositories and only admins may promote.
    Enforced,
}

impl AuthorizationMode {
    pub fn policy(self) -> Arc<dyn AuthorizationPolicy> {
        match self {
            AuthorizationMode::Permissive => Arc::new(PermissivePolicy),
            AuthorizationMode::Enforced => Arc::new(EnforcedPolicy),
        }
    }
}

/// Decisions taken on behalf of an authenticated caller.
///
/// Authentication itself is checked by the executor before a resolver runs.
pub trait AuthorizationPolicy: Send + Sync + Debug {
    /// Whether `caller` may read the repository `repo_id` through a single-repository lookup.
    fn can_read_repo(&self, caller: &Caller, repo_id: &str) -> bool;

    /// Whether `caller` may change another user's role to `requested`.
    fn can_promote(&self, caller: &Caller, requested: Option<&str>) -> bool;
}

/// The default policy. Nothing beyond authentication is checked.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissivePolicy;

impl AuthorizationPolicy for PermissivePolicy {
    fn can_read_repo(&self, _caller: &Caller, _repo_id: &str) -> bool {
        true
    }

    fn can_promote(&self, caller: &Caller, requested: Option<&str>) -> bool {
        let guarded = requested != Some(ADMIN_ROLE) && !caller.is_admin();
        tracing::debug!(
            caller = caller.id(),
            requested,
            guarded,
            "promotion guard is not enforced"
        );
        true
    }
}

/// Ownership and role checks.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnforcedPolicy;

impl AuthorizationPolicy for EnforcedPolicy {
    fn can_read_repo(&self, caller: &Caller, repo_id: &str) -> bool {
        caller.owns(repo_id)
    }

    fn can_promote(&self, caller: &Caller, _requested: Option<&str>) -> bool {
        caller.is_admin()
    }
}
