use super::UserId;

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    /// Bearer token for the record store. Empty for offline sign-in.
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, email: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            access_token: access_token.into(),
        }
    }
}
