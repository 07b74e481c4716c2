//! Session resumption: what to show when the agent changes, and keeping the
//! bookmark in step with session ids the backend confirms.

use std::sync::Arc;

use crate::error::{ProfileStoreError, WrapperError};
use crate::model::{AgentName, AuthenticatedUser, SessionBookmark, SessionId, Transcript};
use crate::profile::ProfileStore;
use crate::wrapper::{AgentWrapper, HistoryOutcome};

/// Transcript to display after an agent switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub transcript: Transcript,
    /// Set when history could not be fetched; the transcript is then empty.
    pub failure: Option<WrapperError>,
}

/// What `record_new_session` did with a returned session id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkUpdate {
    /// Absent or identical id: nothing written.
    Unchanged,
    Persisted,
    /// In-memory bookmark updated but the durable copy is now behind.
    PersistFailed(ProfileStoreError),
}

#[derive(Clone)]
pub struct SessionResolver {
    wrapper: Arc<dyn AgentWrapper>,
    store: Arc<dyn ProfileStore>,
}

impl SessionResolver {
    pub fn new(wrapper: Arc<dyn AgentWrapper>, store: Arc<dyn ProfileStore>) -> Self {
        Self { wrapper, store }
    }

    pub fn wrapper(&self) -> &Arc<dyn AgentWrapper> {
        &self.wrapper
    }

    pub fn store(&self) -> &Arc<dyn ProfileStore> {
        &self.store
    }

    /// Fetch the transcript for `agent` using its bookmarked session, if any.
    ///
    /// The bookmark is never modified here, even when a known session comes
    /// back empty or the fetch fails.
    pub async fn resolve_on_agent_switch(
        &self,
        agent: &AgentName,
        bookmark: &SessionBookmark,
        user: &AuthenticatedUser,
    ) -> Resolution {
        let session_id = bookmark.get(agent);
        let outcome = self
            .wrapper
            .fetch_history(agent, &user.user_id, session_id)
            .await;

        let failure = outcome.failure().cloned();
        if let HistoryOutcome::Loaded(ref messages) = outcome {
            tracing::debug!(agent = %agent, messages = messages.len(), "history resumed");
        }

        Resolution {
            transcript: Transcript::from_messages(outcome.into_messages()),
            failure,
        }
    }

    /// Adopt `returned` as the current session for `agent` if it differs from
    /// the bookmark, then persist the whole bookmark.
    pub async fn record_new_session(
        &self,
        agent: &AgentName,
        bookmark: &mut SessionBookmark,
        returned: Option<&SessionId>,
        user: &AuthenticatedUser,
    ) -> BookmarkUpdate {
        let Some(returned) = returned else {
            return BookmarkUpdate::Unchanged;
        };
        if !bookmark.set(agent.clone(), returned.clone()) {
            return BookmarkUpdate::Unchanged;
        }

        tracing::info!(agent = %agent, session = %returned, "new session bookmarked");
        match self.store.save(user, bookmark).await {
            Ok(()) => BookmarkUpdate::Persisted,
            Err(e) => {
                tracing::warn!(agent = %agent, error = %e, "failed to persist bookmark");
                BookmarkUpdate::PersistFailed(e)
            }
        }
    }
}
