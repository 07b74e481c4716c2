use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::ProfileStore;
use crate::error::ProfileStoreError;
use crate::model::{AuthenticatedUser, Profile, SessionBookmark, UserId};

// ============================================================================
// FUNCTIONAL CORE: pure serialization and naming
// ============================================================================

/// Serialize a profile record to pretty JSON.
pub fn serialize_profile(profile: &Profile) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(profile)
}

/// Parse a profile record.
pub fn deserialize_profile(content: &str) -> Result<Profile, serde_json::Error> {
    serde_json::from_str(content)
}

/// Deterministic file name for a user's record: `{user_id}.json`.
/// Path separators in the id are replaced so a record can never escape its directory.
pub fn profile_filename(user_id: &UserId) -> String {
    let safe: String = user_id
        .as_str()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
        .collect();
    format!("{safe}.json")
}

// ============================================================================
// IMPERATIVE SHELL: one JSON file per user
// ============================================================================

/// Profile store backed by a directory of JSON files, for local deployments.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, user_id: &UserId) -> PathBuf {
        self.dir.join(profile_filename(user_id))
    }
}

/// Load the record at `path`. Missing file means a first-time user.
pub async fn load_profile(path: &Path, user_id: &UserId) -> Result<Profile, ProfileStoreError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Profile::new(user_id.clone(), SessionBookmark::new()));
        }
        Err(e) => {
            return Err(ProfileStoreError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };

    deserialize_profile(&content).map_err(|e| ProfileStoreError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Replace the record at `path`, creating the parent directory if needed.
pub async fn write_profile(path: &Path, profile: &Profile) -> Result<(), ProfileStoreError> {
    let content = serialize_profile(profile).map_err(|e| ProfileStoreError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ProfileStoreError::Io {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|e| ProfileStoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn fetch(&self, user: &AuthenticatedUser) -> Result<SessionBookmark, ProfileStoreError> {
        let path = self.path_for(&user.user_id);
        let profile = load_profile(&path, &user.user_id).await?;
        Ok(profile.agent_sessions)
    }

    async fn save(
        &self,
        user: &AuthenticatedUser,
        bookmark: &SessionBookmark,
    ) -> Result<(), ProfileStoreError> {
        let path = self.path_for(&user.user_id);
        let profile = Profile::new(user.user_id.clone(), bookmark.clone());
        write_profile(&path, &profile).await?;
        tracing::debug!(path = %path.display(), entries = bookmark.len(), "profile written");
        Ok(())
    }
}
