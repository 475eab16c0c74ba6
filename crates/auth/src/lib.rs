//! `plantpal-auth` — user identity and the identity-provider boundary.
//!
//! This crate is decoupled from storage; the session that remembers the
//! signed-in user lives in `plantpal-infra`.

pub mod error;
pub mod identity;
pub mod user;

pub use error::{AuthError, AuthResult};
pub use identity::{IdentityProvider, SimulatedIdentityProvider, email_local_part};
pub use user::{DEFAULT_AVATAR, User};
