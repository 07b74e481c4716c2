use std::path::{Path, PathBuf};

/// Resolved file locations for agent-desk.
/// Pure data structure with no I/O.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Environment/agent config file
    /// Example: <working_dir>/config.json
    pub config: PathBuf,

    /// Directory receiving the log file
    /// Example: ~/.local/share/agent-desk/logs/
    pub log_dir: PathBuf,
}

impl Paths {
    /// Resolves default paths relative to the given working directory.
    ///
    /// Does NOT create directories or verify file existence - that is the caller's responsibility.
    ///
    /// # Environment
    ///
    /// * `HOME` - Used to resolve the log directory. Defaults to "/tmp" if unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use agent_desk::paths::Paths;
    ///
    /// let paths = Paths::resolve(Path::new("/srv/desk"));
    /// assert_eq!(paths.config, Path::new("/srv/desk/config.json"));
    /// ```
    pub fn resolve(working_dir: &Path) -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        Self::resolve_with_home(working_dir, Path::new(&home))
    }

    pub fn resolve_with_home(working_dir: &Path, home: &Path) -> Self {
        Self {
            config: working_dir.join("config.json"),
            log_dir: home
                .join(".local")
                .join("share")
                .join("agent-desk")
                .join("logs"),
        }
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        if let Some(config) = config {
            self.config = config;
        }
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        if let Some(log_dir) = log_dir {
            self.log_dir = log_dir;
        }
        self
    }
}
