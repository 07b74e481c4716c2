//! Wiring: pick the identity provider and profile store, build the orchestrator.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;

use crate::config::{AppConfig, IdentitySettings};
use crate::error::ConfigError;
use crate::identity::{Authenticator, OfflineAuthenticator, SupabaseClient};
use crate::orchestrator::ChatOrchestrator;
use crate::profile::{FileProfileStore, ProfileStore};
use crate::resolver::SessionResolver;
use crate::wrapper::{AgentWrapper, HttpAgentWrapper};

/// Which backends were selected, for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backends {
    /// Identity provider for sign-in and profile records
    Hosted,
    /// Identity provider for sign-in, profiles on local disk
    HostedWithLocalProfiles,
    /// No identity provider: unverified sign-in, profiles on local disk
    Offline,
}

pub struct Bootstrap {
    pub orchestrator: ChatOrchestrator,
    pub backends: Backends,
}

/// Build the orchestrator from config.
///
/// Missing identity secrets are fatal unless `profile_dir` is given, in which
/// case sign-in falls back to the offline authenticator.
pub fn build(
    config: &AppConfig,
    identity: Result<IdentitySettings, ConfigError>,
    profile_dir: Option<PathBuf>,
    http: Client,
) -> Result<Bootstrap, ConfigError> {
    let wrapper: Arc<dyn AgentWrapper> =
        Arc::new(HttpAgentWrapper::new(http.clone(), config.wrapper_url.clone()));
    if config.wrapper_url.is_none() {
        tracing::warn!(environment = %config.environment, "wrapper_url not configured, chat will degrade");
    }

    let (authenticator, store, backends) = match (identity, profile_dir) {
        (Ok(settings), None) => {
            let client = Arc::new(SupabaseClient::new(http, settings));
            let authenticator: Arc<dyn Authenticator> = client.clone();
            let store: Arc<dyn ProfileStore> = client;
            (authenticator, store, Backends::Hosted)
        }
        (Ok(settings), Some(dir)) => {
            let authenticator: Arc<dyn Authenticator> =
                Arc::new(SupabaseClient::new(http, settings));
            let store: Arc<dyn ProfileStore> = Arc::new(FileProfileStore::new(dir));
            (authenticator, store, Backends::HostedWithLocalProfiles)
        }
        (Err(ConfigError::MissingSecret(name)), Some(dir)) => {
            tracing::warn!(missing = name, "identity provider not configured, using offline sign-in");
            let authenticator: Arc<dyn Authenticator> = Arc::new(OfflineAuthenticator);
            let store: Arc<dyn ProfileStore> = Arc::new(FileProfileStore::new(dir));
            (authenticator, store, Backends::Offline)
        }
        (Err(e), _) => return Err(e),
    };

    tracing::info!(?backends, "backends selected");
    let resolver = SessionResolver::new(wrapper, store);
    Ok(Bootstrap {
        orchestrator: ChatOrchestrator::new(authenticator, resolver, config.agents.clone()),
        backends,
    })
}
