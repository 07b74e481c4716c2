//! Bridge to the remote agent wrapper service.
//!
//! Calls never fail past this boundary: a turn always yields text the UI can
//! show, a history fetch always yields a (possibly empty) message list. The
//! failure reason rides along so the caller can surface it.

pub mod http;
pub mod payload;

use async_trait::async_trait;

use crate::error::WrapperError;
use crate::model::{AgentName, Message, SessionId, UserId};

pub use http::HttpAgentWrapper;

pub const NOT_CONFIGURED_TEXT: &str = "Error: Frontend is not configured.";
pub const NO_CONTENT_TEXT: &str = "Error: No response content.";

/// Successful reply to one chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub response: String,
    pub session_id: Option<SessionId>,
}

/// Result of `send_turn`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied(TurnReply),
    /// The wrapper could not be used; `reason` explains why.
    Degraded { reason: WrapperError },
}

impl TurnOutcome {
    pub fn replied(response: impl Into<String>, session_id: Option<SessionId>) -> Self {
        TurnOutcome::Replied(TurnReply {
            response: response.into(),
            session_id,
        })
    }

    /// Text to append to the transcript as the assistant's message.
    pub fn response_text(&self) -> String {
        match self {
            TurnOutcome::Replied(reply) => reply.response.clone(),
            TurnOutcome::Degraded {
                reason: WrapperError::NotConfigured,
            } => NOT_CONFIGURED_TEXT.to_string(),
            TurnOutcome::Degraded { reason } => {
                format!("Error: Could not reach Agent Wrapper. Details: {reason}")
            }
        }
    }

    /// Session id minted or confirmed by the backend. Never set when degraded.
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            TurnOutcome::Replied(reply) => reply.session_id.as_ref(),
            TurnOutcome::Degraded { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&WrapperError> {
        match self {
            TurnOutcome::Replied(_) => None,
            TurnOutcome::Degraded { reason } => Some(reason),
        }
    }
}

/// Result of `fetch_history`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    /// No session id was known; the backend was not contacted.
    NoSession,
    Loaded(Vec<Message>),
    Failed(WrapperError),
}

impl HistoryOutcome {
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            HistoryOutcome::Loaded(messages) => messages,
            HistoryOutcome::NoSession | HistoryOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn failure(&self) -> Option<&WrapperError> {
        match self {
            HistoryOutcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// One chat turn addressed to an agent.
#[derive(Debug, Clone, Copy)]
pub struct TurnRequest<'a> {
    pub agent: &'a AgentName,
    pub message: &'a str,
    pub user_id: &'a UserId,
    pub session_id: Option<&'a SessionId>,
}

#[async_trait]
pub trait AgentWrapper: Send + Sync {
    async fn send_turn(&self, request: TurnRequest<'_>) -> TurnOutcome;

    async fn fetch_history(
        &self,
        agent: &AgentName,
        user_id: &UserId,
        session_id: Option<&SessionId>,
    ) -> HistoryOutcome;
}
