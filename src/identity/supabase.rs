//! Supabase REST client: password sign-in plus the profile table.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::{validate_credentials, Authenticator};
use crate::config::IdentitySettings;
use crate::error::{AuthError, ProfileStoreError};
use crate::model::{AgentName, AuthenticatedUser, Profile, SessionBookmark, SessionId, UserId};
use crate::profile::ProfileStore;

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    settings: IdentitySettings,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    agent_sessions: Option<BTreeMap<String, Option<String>>>,
}

/// Build a bookmark from a raw JSON column, dropping blank names and null ids.
pub fn bookmark_from_raw(raw: BTreeMap<String, Option<String>>) -> SessionBookmark {
    raw.into_iter()
        .filter_map(|(agent, session)| {
            let agent = AgentName::try_new(agent)?;
            let session = SessionId::try_new(session?)?;
            Some((agent, session))
        })
        .collect()
}

impl SupabaseClient {
    pub fn new(http: Client, settings: IdentitySettings) -> Self {
        Self { http, settings }
    }

    fn token_url(&self) -> String {
        format!("{}/auth/v1/token?grant_type=password", self.settings.url)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.settings.url, self.settings.profile_table)
    }

    /// Attach the project key and the caller's bearer token.
    fn authorize(&self, request: RequestBuilder, user: &AuthenticatedUser) -> RequestBuilder {
        let bearer = if user.access_token.is_empty() {
            &self.settings.api_key
        } else {
            &user.access_token
        };
        request
            .header("apikey", &self.settings.api_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }
}

#[async_trait]
impl Authenticator for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AuthError> {
        validate_credentials(email, password)?;

        let response = self
            .http
            .post(self.token_url())
            .header("apikey", &self.settings.api_key)
            .json(&PasswordGrant {
                email: email.trim(),
                password,
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
            tracing::info!(email = email.trim(), "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        let user_id = UserId::try_new(token.user.id)
            .ok_or_else(|| AuthError::Decode("empty user id".to_string()))?;
        let email = token.user.email.unwrap_or_else(|| email.trim().to_string());

        tracing::info!(user = %user_id, "signed in");
        Ok(AuthenticatedUser::new(user_id, email, token.access_token))
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn fetch(&self, user: &AuthenticatedUser) -> Result<SessionBookmark, ProfileStoreError> {
        let id_filter = format!("eq.{}", user.user_id);
        let request = self
            .http
            .get(self.table_url())
            .query(&[("select", "agent_sessions"), ("id", id_filter.as_str())]);
        let response = self.authorize(request, user).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<ProfileRow> = response
            .json()
            .await
            .map_err(|e| ProfileStoreError::Decode(e.to_string()))?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.agent_sessions)
            .map(bookmark_from_raw)
            .unwrap_or_default())
    }

    async fn save(
        &self,
        user: &AuthenticatedUser,
        bookmark: &SessionBookmark,
    ) -> Result<(), ProfileStoreError> {
        let record = Profile::new(user.user_id.clone(), bookmark.clone());
        let request = self
            .http
            .post(self.table_url())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record);
        let response = self.authorize(request, user).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileStoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(user = %user.user_id, entries = bookmark.len(), "profile upserted");
        Ok(())
    }
}
