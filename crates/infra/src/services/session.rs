use plantpal_auth::{AuthResult, IdentityProvider, User};

use crate::store::{KeyValueStore, keys, load_or_default, save};

/// Remembers the signed-in user under [`keys::SESSION`].
///
/// There are no tokens and no expiry: a stored user stays signed in until
/// `logout`.
#[derive(Debug)]
pub struct SessionService<S, P> {
    store: S,
    provider: P,
    user: Option<User>,
}

impl<S, P> SessionService<S, P>
where
    S: KeyValueStore,
    P: IdentityProvider,
{
    pub fn load(store: S, provider: P) -> Self {
        let user: Option<User> = load_or_default(&store, keys::SESSION);
        if let Some(user) = &user {
            tracing::debug!(user_id = %user.id, "restored session");
        }
        Self {
            store,
            provider,
            user,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> AuthResult<User> {
        let user = self.provider.login(email, password).await?;
        tracing::info!(user_id = %user.id, "logged in");
        self.remember(user.clone());
        Ok(user)
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        let user = self.provider.signup(name, email, password).await?;
        tracing::info!(user_id = %user.id, "signed up");
        self.remember(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "logged out");
        }
        if let Err(err) = self.store.remove(keys::SESSION) {
            tracing::error!(error = %err, "failed to clear stored session");
        }
    }

    fn remember(&mut self, user: User) {
        if let Err(err) = save(&self.store, keys::SESSION, &user) {
            tracing::error!(error = %err, "failed to persist session");
        }
        self.user = Some(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use plantpal_auth::{AuthError, SimulatedIdentityProvider};
    use std::sync::Arc;
    use std::time::Duration;

    fn provider() -> SimulatedIdentityProvider {
        SimulatedIdentityProvider::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn login_persists_until_logout() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = SessionService::load(store.clone(), provider());
        assert!(!session.is_signed_in());

        session.login("moss@example.com", "pw").await.unwrap();
        assert_eq!(session.current_user().map(|u| u.name.as_str()), Some("moss"));

        let restored = SessionService::load(store.clone(), provider());
        assert_eq!(restored.current_user().map(|u| u.email.as_str()), Some("moss@example.com"));

        session.logout();
        assert!(!session.is_signed_in());
        assert_eq!(store.get(keys::SESSION).unwrap(), None);
        assert!(!SessionService::load(store, provider()).is_signed_in());
    }

    #[tokio::test]
    async fn failed_login_keeps_previous_state() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = SessionService::load(store.clone(), provider());

        let err = session.login("not-an-email", "pw").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidEmail);
        assert!(!session.is_signed_in());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn signup_signs_in_new_user() {
        let mut session = SessionService::load(InMemoryStore::new(), Arc::new(provider()));
        let user = session.signup("Moss", "moss@example.com", "pw").await.unwrap();
        assert_eq!(session.current_user(), Some(&user));
        assert_eq!(user.name, "Moss");
    }

    #[test]
    fn corrupt_session_is_ignored() {
        let store = InMemoryStore::new();
        store.set(keys::SESSION, "{\"id\": 1}").unwrap();
        assert!(!SessionService::load(store, provider()).is_signed_in());
    }
}
