use crate::store::ADMIN_ROLE;

/// The authenticated identity behind an execution call.
///
/// A caller is looked up once per call and is read-only for the rest of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    id: String,
    role: Option<String>,
    owned_repos: Vec<String>,
}

#[buildstructor::buildstructor]
impl Caller {
    /// Returns a builder for a caller identity.
    ///
    /// * `.id(impl Into<String>)` required.
    /// * `.role(impl Into<String>)` optional.
    /// * `.owned_repos(Vec<String>)` optional, defaults to no repositories.
    #[builder(visibility = "pub")]
    fn new(id: String, role: Option<String>, owned_repos: Vec<String>) -> Self {
        Self {
            id,
            role,
            owned_repos,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn owned_repos(&self) -> &[String] {
        &self.owned_repos
    }

    pub fn owns(&self, repo_id: &str) -> bool {
        self.owned_repos.iter().any(|owned| owned == repo_id)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(ADMIN_ROLE)
    }
}

/// Resolves an opaque session token to the caller behind it.
///
/// Implemented by [`crate::session::Sessions`]; hosts with their own session handling can
/// provide another implementation.
pub trait CallerLookup: Send + Sync {
    /// The caller for `token`, or `None` when the token names no live identity.
    fn lookup(&self, token: &str) -> Option<Caller>;
}
