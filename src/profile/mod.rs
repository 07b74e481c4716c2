//! Durable storage of each user's session bookmark.

pub mod file;

use async_trait::async_trait;

use crate::error::ProfileStoreError;
use crate::model::{AuthenticatedUser, SessionBookmark};

pub use file::FileProfileStore;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Stored bookmark for `user`, or an empty one when no record exists yet.
    async fn fetch(&self, user: &AuthenticatedUser) -> Result<SessionBookmark, ProfileStoreError>;

    /// Insert-or-replace the user's entire bookmark. Never a partial merge.
    async fn save(
        &self,
        user: &AuthenticatedUser,
        bookmark: &SessionBookmark,
    ) -> Result<(), ProfileStoreError>;
}
