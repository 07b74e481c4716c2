//! Error types for agent-desk
//!
//! One thiserror enum per external concern. Client errors carry rendered
//! strings so they stay `Clone` and can travel inside view state.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("configuration for environment '{0}' not found in config.json")]
    MissingEnvironment(String),
    #[error("no agents configured")]
    NoAgents,
    #[error("invalid agent name {0:?}")]
    InvalidAgent(String),
    #[error("missing secret {0}")]
    MissingSecret(&'static str),
}

/// Failure talking to the agent wrapper service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WrapperError {
    #[error("wrapper URL is not configured")]
    NotConfigured,
    #[error("{0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for WrapperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WrapperError::Transport(format!("request timed out: {e}"))
        } else if e.is_decode() {
            WrapperError::Decode(e.to_string())
        } else {
            WrapperError::Transport(e.to_string())
        }
    }
}

/// Failure reading or writing a user's profile record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("I/O {path}: {message}")]
    Io { path: String, message: String },
    #[error("JSON {path}: {message}")]
    Json { path: String, message: String },
}

impl From<reqwest::Error> for ProfileStoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProfileStoreError::Decode(e.to_string())
        } else {
            ProfileStoreError::Http(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email and password are required")]
    MissingCredentials,
    #[error("identity provider unreachable: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AuthError::Decode(e.to_string())
        } else {
            AuthError::Transport(e.to_string())
        }
    }
}

/// Errors returned by chat orchestration entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrchestratorError {
    #[error("You must be logged in to access this page.")]
    NotAuthenticated,
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),
    #[error("unknown agent {0}")]
    UnknownAgent(String),
    #[error("no agent selected")]
    NoAgentSelected,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to initialise logging in {path}: {source}")]
    Logging {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
