//! Startup configuration.
//!
//! `config.json` holds one block per deployment environment plus the ordered
//! list of agents offered in the picker. The environment is chosen by
//! `--env` / `APP_ENV` on the command line (default `local`). Identity-store secrets come from the process
//! environment so they never live in the checked-in file.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::AgentName;

pub const ENV_VAR: &str = "APP_ENV";
pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const DEFAULT_PROFILE_TABLE: &str = "adk_n8n_hybrid_profiles";

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    environments: BTreeMap<String, EnvironmentBlock>,
    #[serde(default)]
    agents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentBlock {
    #[serde(default)]
    wrapper_url: Option<String>,
    #[serde(default)]
    adk_bundle_url: Option<String>,
}

/// Resolved settings for the selected environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: String,
    /// Base URL of the agent wrapper, trailing slash trimmed.
    /// `None` leaves the app running with every wrapper call degraded.
    pub wrapper_url: Option<String>,
    /// Carried for deployments that serve the agent bundle; unused by chat.
    pub adk_bundle_url: Option<String>,
    pub agents: Vec<AgentName>,
}

/// Identity provider / record store connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    pub url: String,
    pub api_key: String,
    pub profile_table: String,
}

/// Normalize the environment chosen on the command line (`--env` or
/// `APP_ENV`). Blank or absent selects the default.
pub fn selected_environment(chosen: Option<&str>) -> String {
    chosen
        .map(|env| env.trim().to_lowercase())
        .filter(|env| !env.is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Read and resolve `path` for `environment`.
pub fn load(path: &Path, environment: &str) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse(&content, environment)?;

    tracing::info!(
        environment = %config.environment,
        wrapper_url = config.wrapper_url.as_deref().unwrap_or("<unset>"),
        agents = config.agents.len(),
        "config loaded"
    );
    Ok(config)
}

/// Pure parse of the config document for one environment.
pub fn parse(content: &str, environment: &str) -> Result<AppConfig, ConfigError> {
    let file: ConfigFile = serde_json::from_str(content)?;

    let block = file
        .environments
        .get(environment)
        .ok_or_else(|| ConfigError::MissingEnvironment(environment.to_string()))?;

    if file.agents.is_empty() {
        return Err(ConfigError::NoAgents);
    }

    let mut seen = HashSet::new();
    let mut agents = Vec::with_capacity(file.agents.len());
    for raw in &file.agents {
        let name = AgentName::try_new(raw.trim())
            .ok_or_else(|| ConfigError::InvalidAgent(raw.clone()))?;
        if !seen.insert(name.clone()) {
            return Err(ConfigError::InvalidAgent(raw.clone()));
        }
        agents.push(name);
    }

    Ok(AppConfig {
        environment: environment.to_string(),
        wrapper_url: normalize_url(block.wrapper_url.as_deref()),
        adk_bundle_url: normalize_url(block.adk_bundle_url.as_deref()),
        agents,
    })
}

fn normalize_url(raw: Option<&str>) -> Option<String> {
    raw.map(|url| url.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

impl IdentitySettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup` so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = non_blank("SUPABASE_URL").ok_or(ConfigError::MissingSecret("SUPABASE_URL"))?;
        let api_key = non_blank("SUPABASE_KEY").ok_or(ConfigError::MissingSecret("SUPABASE_KEY"))?;
        let profile_table =
            non_blank("PROFILE_TABLE").unwrap_or_else(|| DEFAULT_PROFILE_TABLE.to_string());

        Ok(Self {
            url: url.trim().trim_end_matches('/').to_string(),
            api_key,
            profile_table,
        })
    }
}
