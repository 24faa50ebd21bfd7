use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_DIR: &str = "taskdesk";

/// Resolved default paths for all taskdesk file locations.
/// Pure data structure with no I/O.
#[derive(Debug, Clone)]
pub struct Paths {
    /// TOML configuration file
    /// Example: ~/.config/taskdesk/config.toml
    pub config_file: PathBuf,

    /// Persisted bearer token
    /// Example: ~/.local/share/taskdesk/token
    pub token_file: PathBuf,

    /// Directory for rolling log files
    /// Example: ~/.local/share/taskdesk/logs/
    pub log_dir: PathBuf,
}

impl Paths {
    /// Resolves all paths below the given base directories.
    ///
    /// Pure function: only performs path concatenation.
    /// Does NOT create directories or verify file existence - that is the caller's responsibility.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use taskdesk_tui::paths::Paths;
    ///
    /// let paths = Paths::resolve(Path::new("/home/u/.config"), Path::new("/home/u/.local/share"));
    ///
    /// assert_eq!(paths.token_file, Path::new("/home/u/.local/share/taskdesk/token"));
    /// ```
    pub fn resolve(config_dir: &Path, data_dir: &Path) -> Self {
        Self {
            config_file: config_dir.join(APP_DIR).join("config.toml"),
            token_file: data_dir.join(APP_DIR).join("token"),
            log_dir: data_dir.join(APP_DIR).join("logs"),
        }
    }

    /// Resolve against the platform's config and data directories.
    pub fn platform() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoHomeDir)?;
        let data_dir = dirs::data_local_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::resolve(&config_dir, &data_dir))
    }
}
