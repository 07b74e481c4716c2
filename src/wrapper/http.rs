use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::payload::{HistoryRequest, HistoryResponse, RunAgentRequest, RunAgentResponse};
use super::{AgentWrapper, HistoryOutcome, TurnOutcome, TurnRequest, NO_CONTENT_TEXT};
use crate::error::WrapperError;
use crate::model::{AgentName, Message, SessionId, UserId};

pub const RUN_AGENT_TIMEOUT: Duration = Duration::from_secs(90);
pub const HISTORY_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed wrapper client.
#[derive(Debug, Clone)]
pub struct HttpAgentWrapper {
    http: Client,
    base_url: Option<String>,
    run_timeout: Duration,
    history_timeout: Duration,
}

impl HttpAgentWrapper {
    pub fn new(http: Client, base_url: Option<String>) -> Self {
        Self {
            http,
            base_url,
            run_timeout: RUN_AGENT_TIMEOUT,
            history_timeout: HISTORY_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, run_timeout: Duration, history_timeout: Duration) -> Self {
        self.run_timeout = run_timeout;
        self.history_timeout = history_timeout;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn endpoint(&self, path: &str) -> Result<String, WrapperError> {
        self.base_url
            .as_deref()
            .map(|base| format!("{base}/{path}"))
            .ok_or(WrapperError::NotConfigured)
    }

    async fn post<B, R>(&self, path: &str, body: &B, timeout: Duration) -> Result<R, WrapperError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(WrapperError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| WrapperError::Decode(e.to_string()))
    }

    async fn run_agent(&self, request: TurnRequest<'_>) -> Result<RunAgentResponse, WrapperError> {
        let payload = RunAgentRequest {
            agent_name: request.agent.as_str(),
            message: request.message,
            user_id: request.user_id.as_str(),
            session_id: request.session_id.map(SessionId::as_str),
        };
        self.post("run_agent", &payload, self.run_timeout).await
    }

    async fn get_history(
        &self,
        agent: &AgentName,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> Result<Vec<Message>, WrapperError> {
        let payload = HistoryRequest {
            agent_name: agent.as_str(),
            user_id: user_id.as_str(),
            session_id: session_id.as_str(),
        };
        let response: HistoryResponse = self.post("get_history", &payload, self.history_timeout).await?;
        Ok(response.history)
    }
}

#[async_trait]
impl AgentWrapper for HttpAgentWrapper {
    async fn send_turn(&self, request: TurnRequest<'_>) -> TurnOutcome {
        tracing::debug!(
            agent = %request.agent,
            user = %request.user_id,
            session = request.session_id.map(SessionId::as_str).unwrap_or("<new>"),
            "run_agent"
        );

        match self.run_agent(request).await {
            Ok(response) => {
                let session_id = response.session_id();
                let text = response
                    .response
                    .unwrap_or_else(|| NO_CONTENT_TEXT.to_string());
                TurnOutcome::replied(text, session_id)
            }
            Err(reason) => {
                tracing::warn!(agent = %request.agent, error = %reason, "run_agent degraded");
                TurnOutcome::Degraded { reason }
            }
        }
    }

    async fn fetch_history(
        &self,
        agent: &AgentName,
        user_id: &UserId,
        session_id: Option<&SessionId>,
    ) -> HistoryOutcome {
        let Some(session_id) = session_id else {
            tracing::debug!(agent = %agent, "no bookmarked session, skipping history fetch");
            return HistoryOutcome::NoSession;
        };

        tracing::debug!(agent = %agent, user = %user_id, session = %session_id, "get_history");

        match self.get_history(agent, user_id, session_id).await {
            Ok(messages) => HistoryOutcome::Loaded(messages),
            Err(reason) => {
                tracing::warn!(agent = %agent, error = %reason, "get_history failed");
                HistoryOutcome::Failed(reason)
            }
        }
    }
}
