use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AgentName, SessionId, UserId};

/// Which backend session is "current" for each agent, for one user.
///
/// Agents the user never talked to have no entry. Ordered so that the
/// persisted payload is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionBookmark(BTreeMap<AgentName, SessionId>);

impl SessionBookmark {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, agent: &AgentName) -> Option<&SessionId> {
        self.0.get(agent)
    }

    /// Store `session` for `agent`. Returns `true` when the stored value changed.
    pub fn set(&mut self, agent: AgentName, session: SessionId) -> bool {
        match self.0.get(&agent) {
            Some(current) if *current == session => false,
            _ => {
                self.0.insert(agent, session);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentName, &SessionId)> {
        self.0.iter()
    }
}

impl FromIterator<(AgentName, SessionId)> for SessionBookmark {
    fn from_iter<I: IntoIterator<Item = (AgentName, SessionId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Durable per-user record mirrored to the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub agent_sessions: SessionBookmark,
}

impl Profile {
    pub fn new(id: UserId, agent_sessions: SessionBookmark) -> Self {
        Self { id, agent_sessions }
    }
}
