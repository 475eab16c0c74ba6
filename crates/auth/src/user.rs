//! Signed-in user identity.

use serde::{Deserialize, Serialize};

use plantpal_core::UserId;

/// Placeholder avatar assigned to every locally created identity.
pub const DEFAULT_AVATAR: &str =
    "https://images.pexels.com/photos/1704488/pexels-photo-1704488.jpeg?auto=compress&cs=tinysrgb&w=100";

/// Identity handed out by the identity provider and kept in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar: DEFAULT_AVATAR.to_string(),
        }
    }
}
