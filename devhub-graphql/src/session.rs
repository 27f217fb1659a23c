//! Login sessions.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::context::Caller;
use crate::context::CallerLookup;
use crate::store::Store;

const TOKEN_PREFIX: &str = "sess_";

/// Opaque session tokens mapped to user ids.
///
/// Lookups read the user record at lookup time, so a role change is visible to the next call
/// made with an existing token.
#[derive(Debug)]
pub struct Sessions {
    store: Arc<Store>,
    sessions: DashMap<String, String>,
}

impl Sessions {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            sessions: DashMap::new(),
        }
    }

    /// Open a session for these credentials.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        let Some(user_id) = self.store.authenticate(username, password) else {
            tracing::warn!(username, "invalid credentials");
            return None;
        };
        let token = format!("{TOKEN_PREFIX}{}", Uuid::new_v4().simple());
        tracing::info!(user = %user_id, "session opened");
        self.sessions.insert(token.clone(), user_id);
        Some(token)
    }

    /// Close a session. Returns whether `token` was open.
    pub fn logout(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl CallerLookup for Sessions {
    fn lookup(&self, token: &str) -> Option<Caller> {
        let user_id = self.sessions.get(token)?.value().clone();
        self.store.caller(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::store::UserRecord;

    #[test]
    fn login_and_logout() {
        let sessions = Sessions::new(Arc::new(Store::default()));
        assert!(sessions.is_empty());

        let token = sessions.login("developer", "dev2024").unwrap();
        assert!(token.starts_with("sess_"));
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions.lookup(&token).unwrap().id(), "dev-001");

        assert!(sessions.logout(&token));
        assert!(!sessions.logout(&token));
        assert_eq!(sessions.lookup(&token), None);
    }

    #[test]
    fn bad_credentials() {
        let sessions = Sessions::new(Arc::new(Store::default()));
        assert_eq!(sessions.login("developer", "dev2025"), None);
        assert_eq!(sessions.login("Developer", "dev2024"), None);
        assert!(sessions.is_empty());
    }

    #[test]
    fn tokens_are_unique() {
        let sessions = Sessions::new(Arc::new(Store::default()));
        let first = sessions.login("admin", "Adm!n_S3cur3#2024").unwrap();
        let second = sessions.login("admin", "Adm!n_S3cur3#2024").unwrap();
        assert_ne!(first, second);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn lookup_reads_the_live_record() {
        let store = Arc::new(Store::default());
        let sessions = Sessions::new(store.clone());
        let token = sessions.login("developer", "dev2024").unwrap();
        assert!(!sessions.lookup(&token).unwrap().is_admin());

        store.update_user("dev-001", |user| user.role = Some("admin".to_string()));
        assert!(sessions.lookup(&token).unwrap().is_admin());
    }

    #[test]
    fn token_for_unknown_user() {
        let store = Arc::new(Store::new(Vec::<UserRecord>::new(), Vec::new()));
        let sessions = Sessions::new(store);
        sessions
            .sessions
            .insert("sess_orphan".to_string(), "dev-001".to_string());
        assert_eq!(sessions.lookup("sess_orphan"), None);
        assert_eq!(sessions.lookup("sess_unknown"), None);
    }
}
