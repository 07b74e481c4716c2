//! Sign-in against the identity provider.

pub mod supabase;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::model::{AuthenticatedUser, UserId};

pub use supabase::SupabaseClient;

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Reject blank credentials before any provider sees them.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}

/// Development sign-in for local deployments without an identity provider.
/// Any non-blank credentials are accepted; the email becomes the user id.
#[derive(Debug, Clone, Default)]
pub struct OfflineAuthenticator;

#[async_trait]
impl Authenticator for OfflineAuthenticator {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        validate_credentials(email, password)?;
        let email = email.trim().to_lowercase();
        tracing::warn!(%email, "offline sign-in, credentials not verified");
        Ok(AuthenticatedUser::new(UserId::new(email.clone()), email, ""))
    }
}
