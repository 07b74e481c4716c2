use crate::error::OrchestratorError;
use crate::model::{AgentName, AuthenticatedUser, SessionBookmark, Transcript};

/// Everything one signed-in user's chat needs. Created at login, dropped at
/// logout, never shared between users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user: AuthenticatedUser,
    pub bookmark: SessionBookmark,
    /// `None` while idle (signed in, nothing selected yet).
    pub current_agent: Option<AgentName>,
    pub transcript: Transcript,
}

impl SessionContext {
    pub fn new(user: AuthenticatedUser, bookmark: SessionBookmark) -> Self {
        Self {
            user,
            bookmark,
            current_agent: None,
            transcript: Transcript::new(),
        }
    }

    pub fn is_viewing(&self) -> bool {
        self.current_agent.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(SessionContext),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn context(&self) -> Option<&SessionContext> {
        match self {
            SessionState::Authenticated(ctx) => Some(ctx),
            SessionState::Unauthenticated => None,
        }
    }

    /// Gatekeeper for every chat operation.
    pub fn context_mut(&mut self) -> Result<&mut SessionContext, OrchestratorError> {
        match self {
            SessionState::Authenticated(ctx) => Ok(ctx),
            SessionState::Unauthenticated => Err(OrchestratorError::NotAuthenticated),
        }
    }
}
