//! Per-user chat flow: sign-in gate, agent switching, turns, logout.
//!
//! All state lives in an explicit [`SessionState`] handed to every call.
//! One call runs to completion before the next is accepted.

pub mod context;

use std::sync::Arc;

use crate::error::{OrchestratorError, ProfileStoreError, WrapperError};
use crate::identity::Authenticator;
use crate::model::{AgentName, Message, SessionBookmark};
use crate::resolver::{BookmarkUpdate, SessionResolver};
use crate::wrapper::TurnRequest;

pub use context::{SessionContext, SessionState};

/// Non-fatal problem the user should see. Rendering is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ProfileFetchFailed(ProfileStoreError),
    ProfileSaveFailed(ProfileStoreError),
    HistoryUnavailable { agent: AgentName, reason: WrapperError },
    TurnFailed { agent: AgentName, reason: WrapperError },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::ProfileFetchFailed(e) => write!(f, "Error fetching profile: {e}"),
            Notice::ProfileSaveFailed(e) => write!(f, "Error saving profile: {e}"),
            Notice::HistoryUnavailable { reason, .. } => {
                write!(f, "Failed to fetch history via wrapper: {reason}")
            }
            Notice::TurnFailed { reason, .. } => {
                write!(f, "Failed to connect to Agent Wrapper: {reason}")
            }
        }
    }
}

pub struct ChatOrchestrator {
    authenticator: Arc<dyn Authenticator>,
    resolver: SessionResolver,
    agents: Vec<AgentName>,
}

impl ChatOrchestrator {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        resolver: SessionResolver,
        agents: Vec<AgentName>,
    ) -> Self {
        Self {
            authenticator,
            resolver,
            agents,
        }
    }

    pub fn agents(&self) -> &[AgentName] {
        &self.agents
    }

    /// Unauthenticated -> Authenticated/Idle.
    ///
    /// Bad credentials leave `state` untouched. A profile fetch failure still
    /// signs the user in, with an empty bookmark.
    pub async fn login(
        &self,
        state: &mut SessionState,
        email: &str,
        password: &str,
    ) -> Result<Vec<Notice>, OrchestratorError> {
        let user = self.authenticator.sign_in(email, password).await?;

        let mut notices = Vec::new();
        let bookmark = match self.resolver.store().fetch(&user).await {
            Ok(bookmark) => bookmark,
            Err(e) => {
                tracing::warn!(user = %user.user_id, error = %e, "profile fetch failed, starting blank");
                notices.push(Notice::ProfileFetchFailed(e));
                SessionBookmark::new()
            }
        };

        tracing::info!(user = %user.user_id, bookmarks = bookmark.len(), "session started");
        *state = SessionState::Authenticated(SessionContext::new(user, bookmark));
        Ok(notices)
    }

    /// Show `agent`, replacing the transcript with its resumed history.
    /// Selecting the agent already on screen is a no-op.
    pub async fn switch_agent(
        &self,
        state: &mut SessionState,
        agent: &AgentName,
    ) -> Result<Vec<Notice>, OrchestratorError> {
        let ctx = state.context_mut()?;
        if !self.agents.contains(agent) {
            return Err(OrchestratorError::UnknownAgent(agent.to_string()));
        }
        if ctx.current_agent.as_ref() == Some(agent) {
            return Ok(Vec::new());
        }

        let resolution = self
            .resolver
            .resolve_on_agent_switch(agent, &ctx.bookmark, &ctx.user)
            .await;

        ctx.current_agent = Some(agent.clone());
        ctx.transcript = resolution.transcript;

        Ok(resolution
            .failure
            .map(|reason| Notice::HistoryUnavailable {
                agent: agent.clone(),
                reason,
            })
            .into_iter()
            .collect())
    }

    /// Send one turn to the agent on screen.
    ///
    /// The user message is appended first, then exactly one assistant message
    /// (the reply, or a synthetic error text when the wrapper is unusable).
    pub async fn submit(
        &self,
        state: &mut SessionState,
        text: &str,
    ) -> Result<Vec<Notice>, OrchestratorError> {
        let ctx = state.context_mut()?;
        let agent = ctx
            .current_agent
            .clone()
            .ok_or(OrchestratorError::NoAgentSelected)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        ctx.transcript.push(Message::user(text));
        let current_session = ctx.bookmark.get(&agent).cloned();

        let outcome = self
            .resolver
            .wrapper()
            .send_turn(TurnRequest {
                agent: &agent,
                message: text,
                user_id: &ctx.user.user_id,
                session_id: current_session.as_ref(),
            })
            .await;

        let mut notices = Vec::new();
        if let Some(reason) = outcome.failure() {
            notices.push(Notice::TurnFailed {
                agent: agent.clone(),
                reason: reason.clone(),
            });
        }

        let update = self
            .resolver
            .record_new_session(&agent, &mut ctx.bookmark, outcome.session_id(), &ctx.user)
            .await;
        if let BookmarkUpdate::PersistFailed(e) = update {
            notices.push(Notice::ProfileSaveFailed(e));
        }

        ctx.transcript.push(Message::assistant(outcome.response_text()));
        Ok(notices)
    }

    /// Any state -> Unauthenticated. Durable records are left alone.
    pub fn logout(&self, state: &mut SessionState) {
        if let SessionState::Authenticated(ctx) = state {
            tracing::info!(user = %ctx.user.user_id, "logged out");
        }
        *state = SessionState::Unauthenticated;
    }
}
