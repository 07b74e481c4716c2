//! Wire shapes for the wrapper's `/run_agent` and `/get_history` endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{Message, SessionId};

#[derive(Debug, Clone, Serialize)]
pub struct RunAgentRequest<'a> {
    pub agent_name: &'a str,
    pub message: &'a str,
    pub user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunAgentResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl RunAgentResponse {
    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id.clone().and_then(SessionId::try_new)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRequest<'a> {
    pub agent_name: &'a str,
    pub user_id: &'a str,
    pub session_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default, deserialize_with = "known_turns")]
    pub history: Vec<Message>,
}

/// Keep the entries that decode as chat turns. Tool calls, system prompts
/// and other roles the transcript cannot show are dropped one by one.
fn known_turns<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Message>(entry) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!(error = %e, "skipping history entry");
                None
            }
        })
        .collect())
}
