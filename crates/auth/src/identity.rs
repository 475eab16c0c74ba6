//! Identity provider port and a local simulation of it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use plantpal_core::UserId;

use crate::error::{AuthError, AuthResult};
use crate::user::User;

/// Supplies a user identity on login or signup.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> AuthResult<User>;

    async fn signup(&self, name: &str, email: &str, password: &str) -> AuthResult<User>;
}

#[async_trait]
impl<P> IdentityProvider for Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        (**self).login(email, password).await
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        (**self).signup(name, email, password).await
    }
}

/// Fabricates identities locally after a fixed pause; nothing is verified
/// against an authority and no credentials are stored.
#[derive(Debug, Clone)]
pub struct SimulatedIdentityProvider {
    delay: Duration,
}

impl SimulatedIdentityProvider {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Delay in whole milliseconds, saturating.
    pub fn delay_millis(&self) -> u64 {
        u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::debug!(delay_ms = self.delay_millis(), "simulating identity round-trip");
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for SimulatedIdentityProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

/// Checks the shape of an e-mail address and returns its local part.
pub fn email_local_part(email: &str) -> AuthResult<&str> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(local),
        _ => Err(AuthError::InvalidEmail),
    }
}

fn require_password(password: &str) -> AuthResult<()> {
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

#[async_trait]
impl IdentityProvider for SimulatedIdentityProvider {
    /// Any well-formed e-mail with a non-empty password signs in as user "1",
    /// named after the e-mail local part.
    async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let local = email_local_part(email)?;
        require_password(password)?;
        self.pause().await;

        Ok(User::new(UserId::new("1"), local, email.trim()))
    }

    /// Creates a user whose id is the current time in milliseconds.
    async fn signup(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        if name.trim().is_empty() {
            return Err(AuthError::MissingName);
        }
        email_local_part(email)?;
        require_password(password)?;
        self.pause().await;

        let id = UserId::new(Utc::now().timestamp_millis().to_string());
        Ok(User::new(id, name.trim(), email.trim()))
    }
}
