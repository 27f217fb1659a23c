//! The in-memory record store the resolvers read and mutate.
//!
//! One store exists per process. Each user record sits behind its own lock so concurrent
//! mutations of the same user are serialized; repositories never change after construction.

use indexmap::IndexMap;
use parking_lot::RwLock;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Seed;
use crate::context::Caller;
use crate::json_ext;
use crate::json_ext::Value;
use crate::spec::RepoField;
use crate::spec::Resolved;
use crate::spec::UserField;

/// The privileged role. Promotion to it grants every repository.
pub const ADMIN_ROLE: &str = "admin";

/// A user account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    /// Login password, compared verbatim by [`Store::authenticate`].
    pub password: String,
    pub email: String,
    /// Absent after a promotion that did not name a role.
    #[serde(default)]
    pub role: Option<String>,
    /// Ids of the repositories this user owns.
    #[serde(default)]
    pub repos: Vec<String>,
}

/// A source repository.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RepoRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stars: i64,
    pub language: String,
    #[serde(default)]
    pub is_private: bool,
    /// Hidden data, only advertised through introspection.
    #[serde(default)]
    pub flag: Option<String>,
}

impl UserRecord {
    /// The caller-visible user object.
    pub(crate) fn to_resolved(&self) -> Resolved<UserField> {
        Resolved::new()
            .with(UserField::Id, json_ext::string(&self.id))
            .with(UserField::Username, json_ext::string(&self.username))
            .with(UserField::Email, json_ext::string(&self.email))
            .with(UserField::Role, json_ext::optional_string(self.role.as_deref()))
            .with(UserField::Repos, json_ext::string_list(&self.repos))
    }

    /// The user object returned by profile updates, which does not carry repositories.
    pub(crate) fn to_profile(&self) -> Resolved<UserField> {
        Resolved::new()
            .with(UserField::Id, json_ext::string(&self.id))
            .with(UserField::Username, json_ext::string(&self.username))
            .with(UserField::Email, json_ext::string(&self.email))
            .with(UserField::Role, json_ext::optional_string(self.role.as_deref()))
    }

    fn to_caller(&self) -> Caller {
        Caller::builder()
            .id(self.id.clone())
            .and_role(self.role.clone())
            .owned_repos(self.repos.clone())
            .build()
    }
}

impl RepoRecord {
    pub(crate) fn to_resolved(&self) -> Resolved<RepoField> {
        Resolved::new()
            .with(RepoField::Id, json_ext::string(&self.id))
            .with(RepoField::Name, json_ext::string(&self.name))
            .with(RepoField::Stars, Value::Number(self.stars.into()))
            .with(RepoField::Language, json_ext::string(&self.language))
            .with(RepoField::IsPrivate, Value::Bool(self.is_private))
            .with(RepoField::Flag, json_ext::optional_string(self.flag.as_deref()))
    }
}

/// Users and repositories, keyed by id in insertion order.
#[derive(Debug)]
pub struct Store {
    users: IndexMap<String, RwLock<UserRecord>>,
    repos: IndexMap<String, RepoRecord>,
}

impl Store {
    /// Build a store. A later record with an already seen id replaces the earlier one.
    pub fn new(
        users: impl IntoIterator<Item = UserRecord>,
        repos: impl IntoIterator<Item = RepoRecord>,
    ) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id.clone(), RwLock::new(user)))
                .collect(),
            repos: repos
                .into_iter()
                .map(|repo| (repo.id.clone(), repo))
                .collect(),
        }
    }

    /// A snapshot of the user `id`.
    pub fn user(&self, id: &str) -> Option<UserRecord> {
        self.with_user(id, UserRecord::clone)
    }

    pub fn repo(&self, id: &str) -> Option<&RepoRecord> {
        self.repos.get(id)
    }

    /// Every repository id, in insertion order.
    pub fn repo_ids(&self) -> impl Iterator<Item = &str> {
        self.repos.keys().map(String::as_str)
    }

    /// The user id matching these credentials.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<String> {
        self.users.values().find_map(|user| {
            let user = user.read();
            (user.username == username && user.password == password).then(|| user.id.clone())
        })
    }

    /// The current identity of user `id`.
    pub fn caller(&self, id: &str) -> Option<Caller> {
        self.with_user(id, UserRecord::to_caller)
    }

    /// The caller-visible object of user `id`, with every field.
    pub fn profile(&self, id: &str) -> Option<Value> {
        self.with_user(id, |user| user.to_resolved().project(None))
    }

    pub(crate) fn with_user<R>(&self, id: &str, f: impl FnOnce(&UserRecord) -> R) -> Option<R> {
        self.users.get(id).map(|user| f(&user.read()))
    }

    /// Mutate user `id` while holding its write lock.
    pub(crate) fn update_user<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut UserRecord) -> R,
    ) -> Option<R> {
        self.users.get(id).map(|user| f(&mut user.write()))
    }
}

impl From<&Seed> for Store {
    fn from(seed: &Seed) -> Self {
        Store::new(seed.users.iter().cloned(), seed.repos.iter().cloned())
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::from(&Seed::default())
    }
}
